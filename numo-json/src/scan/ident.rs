use nom::{
    IResult, Parser,
    bytes::complete::take_while,
    character::complete::satisfy,
    combinator::recognize,
    sequence::preceded,
};

/// Parses an ASCII identifier (`[A-Za-z_][A-Za-z0-9_]*`) from a string slice.
///
/// JSON proper has no identifiers; this recognizes the `true`, `false` and
/// `null` keywords along with bare words such as `NaN` that some producers
/// emit in place of a numeric literal.
pub fn ident(input: &str) -> IResult<&str, &str> {
    recognize(preceded(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}
