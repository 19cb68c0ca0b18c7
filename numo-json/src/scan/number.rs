use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::preceded,
};

/// A raw numeric lexeme as it appeared in the input.
///
/// The original text is kept verbatim so callers can choose how to decode it.
/// Parsing a double from the unmodified digit sequence rounds differently
/// than converting an intermediate integer or decimal reading would.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NumberLexeme<'a> {
    /// The matched text, sign and exponent included.
    pub text: &'a str,
    /// `true` if the lexeme carries a fraction or an exponent.
    pub float: bool,
}

/// Parses a numeric lexeme from a string slice as defined by RFC 8259.
///
/// Recognizes `-?(0|[1-9][0-9]*)(.[0-9]+)?([eE][+-]?[0-9]+)?` and classifies
/// the match as integer or float without converting it. Leading zeros stop
/// the match after the first digit, matching the JSON grammar.
pub fn number(input: &str) -> IResult<&str, NumberLexeme<'_>> {
    let integer = alt((
        recognize(preceded(one_of("123456789"), digit0)),
        tag("0"),
    ));

    let (remaining, text) = recognize(preceded(
        opt(tag("-")),
        (
            integer,
            opt(recognize((tag("."), digit1))),
            opt(recognize((one_of("eE"), opt(one_of("+-")), digit1))),
        ),
    ))
    .parse(input)?;

    let float = text.contains(['.', 'e', 'E']);
    Ok((remaining, NumberLexeme { text, float }))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_number_parser() {
        #[derive(Debug, PartialEq)]
        struct TestCase {
            name: &'static str,
            input: &'static str,
            expected: bool,
            expected_result: Option<NumberLexeme<'static>>,
            expected_remainder: Option<&'static str>,
        }

        let test_cases = [
            TestCase {
                name: "valid integer '123'",
                input: "123",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "123",
                    float: false,
                }),
                expected_remainder: Some(""),
            },
            TestCase {
                name: "valid negative integer '-456'",
                input: "-456",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "-456",
                    float: false,
                }),
                expected_remainder: Some(""),
            },
            TestCase {
                name: "valid zero '0'",
                input: "0",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "0",
                    float: false,
                }),
                expected_remainder: Some(""),
            },
            TestCase {
                name: "leading zero stops the match '0123'",
                input: "0123",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "0",
                    float: false,
                }),
                expected_remainder: Some("123"),
            },
            TestCase {
                name: "valid real number '123.45'",
                input: "123.45",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "123.45",
                    float: true,
                }),
                expected_remainder: Some(""),
            },
            TestCase {
                name: "exponent classifies as float '4e4'",
                input: "4e4",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "4e4",
                    float: true,
                }),
                expected_remainder: Some(""),
            },
            TestCase {
                name: "signed exponent '1.5E-3'",
                input: "1.5E-3",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "1.5E-3",
                    float: true,
                }),
                expected_remainder: Some(""),
            },
            TestCase {
                name: "invalid 'abc'",
                input: "abc",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "bare minus is invalid '-'",
                input: "-",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "leading dot is invalid '.45'",
                input: ".45",
                expected: false,
                expected_result: None,
                expected_remainder: None,
            },
            TestCase {
                name: "trailing dot left in remainder '12.'",
                input: "12.",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "12",
                    float: false,
                }),
                expected_remainder: Some("."),
            },
            TestCase {
                name: "number with residual text '123.45a'",
                input: "123.45a",
                expected: true,
                expected_result: Some(NumberLexeme {
                    text: "123.45",
                    float: true,
                }),
                expected_remainder: Some("a"),
            },
        ];

        for case in &test_cases {
            let result = number(case.input);
            let success = result.is_ok();
            assert_eq!(
                success, case.expected,
                "Test '{}' failed: expected success: {}, got: {}",
                case.name, case.expected, success
            );

            if case.expected {
                let (actual_remainder, result) = match result {
                    Ok((rem, res)) => (rem, res),
                    Err(e) => panic!(
                        "Parsing failed for test '{}', input: {:#?}, error: {e:?}",
                        case.name, case.input
                    ),
                };
                let expected_result = case.expected_result.as_ref().unwrap();
                assert_eq!(
                    result, *expected_result,
                    "Test '{}' failed: expected result: {:?}, got: {:?}",
                    case.name, *expected_result, result
                );
                assert_eq!(
                    actual_remainder,
                    case.expected_remainder.unwrap(),
                    "Test '{}' failed: expected remainder: {:?}, got: {:?}",
                    case.name,
                    case.expected_remainder.unwrap(),
                    actual_remainder
                );
            }
        }
    }
}
