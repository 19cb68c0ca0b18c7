pub mod cast;
pub mod coerce;
mod document;
pub mod lexer;
pub mod reader;
mod scan;
mod types;

use std::path::Path;

use snafu::ResultExt;

pub use coerce::NumberDecoder;
pub use document::Document;
pub use lexer::{Lexer, TokenKind};
pub use reader::parse_value;
pub use types::{Number, NumberKind, NumberTarget, Value};

#[derive(Debug, snafu::Snafu)]
pub struct Error(error::Error);

/// Decodes the JSON document at `path`.
pub fn load_document(path: &Path) -> Result<Document, Error> {
    let document = Document::from_path(path).context(error::Document)?;
    Ok(document)
}

mod error {
    use snafu::Snafu;

    use crate::document;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("Error while reading document"))]
        Document { source: document::Error },
    }
}
