mod ident;
mod number;
mod string;
mod whitespace;

pub use ident::ident;
pub use number::{NumberLexeme, number};
pub use string::string;
pub use whitespace::{is_whitespace, whitespace};
