mod number;
mod value;

pub use number::{Number, NumberKind, NumberTarget};
pub use value::Value;
