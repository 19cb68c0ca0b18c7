use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1, take_while_m_n},
    combinator::value,
    multi::fold,
    sequence::{delimited, preceded},
};

/// Parses a JSON string enclosed in double quotes, decoding escape sequences.
///
/// Handles the short escapes (`\" \\ \/ \b \f \n \r \t`) and `\uXXXX` code
/// units, pairing UTF-16 surrogates when both halves are present. Raw control
/// characters below 0x20 terminate the match and fail at the closing quote.
pub fn string(input: &str) -> IResult<&str, String> {
    #[derive(Debug)]
    enum Fragment<'a> {
        Literal(&'a str),
        EscapedChar(char),
    }

    let escaped_char = preceded(
        tag("\\"),
        alt((
            value('"', tag("\"")),
            value('\\', tag("\\")),
            value('/', tag("/")),
            value('\x08', tag("b")),
            value('\x0C', tag("f")),
            value('\n', tag("n")),
            value('\r', tag("r")),
            value('\t', tag("t")),
        )),
    )
    .map(Fragment::EscapedChar);

    let literal =
        take_while1(|c: char| c != '"' && c != '\\' && c >= '\u{20}').map(Fragment::Literal);

    let content = alt((
        literal,
        escaped_char,
        unicode_escape.map(Fragment::EscapedChar),
    ));

    let final_str = fold(0.., content, String::new, |mut data, fragment| {
        match fragment {
            Fragment::Literal(chunk) => data.push_str(chunk),
            Fragment::EscapedChar(c) => data.push(c),
        }
        data
    });

    delimited(tag("\""), final_str, tag("\"")).parse(input)
}

/// Parses a single `\uXXXX` code unit.
fn hex_unit(input: &str) -> IResult<&str, u16> {
    preceded(
        tag("\\u"),
        take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
    )
    .map_res(|code: &str| u16::from_str_radix(code, 16))
    .parse(input)
}

/// Decodes a `\uXXXX` escape into a character.
///
/// A high surrogate followed by a low surrogate escape combines into one
/// supplementary-plane character. An unpaired surrogate is rejected.
fn unicode_escape(input: &str) -> IResult<&str, char> {
    let (rest, unit) = hex_unit(input)?;

    if (0xD800..=0xDBFF).contains(&unit) {
        if let Ok((rest, low)) = hex_unit(rest) {
            if (0xDC00..=0xDFFF).contains(&low) {
                let combined =
                    0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                if let Some(c) = char::from_u32(combined) {
                    return Ok((rest, c));
                }
            }
        }
    }

    match char::from_u32(u32::from(unit)) {
        Some(c) => Ok((rest, c)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        ))),
    }
}
