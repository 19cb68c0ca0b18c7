use nom::{IResult, Parser, bytes::complete::take_while1, combinator::value};

/// Checks if a character is JSON insignificant whitespace as defined by RFC 8259.
///
/// Whitespace is limited to space (0x20), tab (0x09), LF (0x0A), and CR (0x0D).
/// Returns `true` if the character is a whitespace, `false` otherwise.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Parses one or more JSON whitespace characters (space, tab, LF, CR).
///
/// Returns `Ok` with an empty tuple if whitespace is found, otherwise `Err`.
/// Consumes the entire input if it consists solely of whitespace.
pub fn whitespace(input: &str) -> IResult<&str, ()> {
    value((), take_while1(is_whitespace)).parse(input)
}
