use std::{fs::File, path::Path};

use memmap2::Mmap;
use snafu::ResultExt;

use crate::{
    lexer::{Lexer, TokenKind},
    reader,
    types::Value,
};

#[derive(Debug, snafu::Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// A fully decoded JSON document.
#[derive(Debug)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Memory-maps the file at `path` and decodes it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|_| error::OpenFileSnafu {
            path: path.to_path_buf(),
        })?;
        let map = unsafe { Mmap::map(&file) }.with_context(|_| error::MmapSnafu {
            path: path.to_path_buf(),
        })?;

        let text = std::str::from_utf8(&map).with_context(|_| error::Utf8Snafu {
            path: path.to_path_buf(),
        })?;

        Self::from_text(text)
    }

    /// Decodes in-memory JSON text. The input must hold exactly one value.
    pub fn from_text(input: &str) -> Result<Self> {
        let mut lexer = Lexer::new(input).context(error::LexSnafu)?;
        let root = reader::parse_value(&mut lexer).context(error::ParseSnafu)?;

        if lexer.token() != TokenKind::Eof {
            return Err(error::Error::TrailingContent {
                offset: lexer.offset(),
            }
            .into());
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

mod error {
    use std::path::PathBuf;

    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Failed to open file: {}", path.display()))]
        OpenFile {
            path: PathBuf,
            source: std::io::Error,
        },

        #[snafu(display("Failed to create mmap for file: {}", path.display()))]
        Mmap {
            path: PathBuf,
            source: std::io::Error,
        },

        #[snafu(display("File is not valid UTF-8: {}", path.display()))]
        Utf8 {
            path: PathBuf,
            source: std::str::Utf8Error,
        },

        #[snafu(display("Error while scanning tokens"))]
        Lex { source: crate::lexer::Error },

        #[snafu(display("Error while parsing document"))]
        Parse { source: crate::reader::Error },

        #[snafu(display("Trailing content after the document root at offset {offset}"))]
        TrailingContent { offset: usize },
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;
    use crate::types::Value;

    #[test]
    fn decodes_a_file_end_to_end() {
        let path = std::env::temp_dir().join("numo-document-test.json");
        fs::write(&path, "{\"count\": 3, \"items\": [1, 2, 3]}").unwrap();

        let document = Document::from_path(&path).unwrap();
        assert_eq!(document.root().get("count"), Some(&Value::Integer(3)));
        assert_eq!(
            document.root().get("items").unwrap().as_array().unwrap().len(),
            3
        );

        fs::remove_file(&path).ok();
    }

    #[test]
    fn decodes_in_memory_text() {
        let document = Document::from_text("[true, null]").unwrap();
        let items = document.root().as_array().unwrap();
        assert_eq!(items, &[Value::Bool(true), Value::Null]);
    }

    #[test]
    fn rejects_trailing_content() {
        let result = Document::from_text("1 2");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = Document::from_path(Path::new("/nonexistent/numo.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }
}
