use bigdecimal::BigDecimal;
use snafu::{OptionExt, ResultExt, Snafu};

use crate::{
    cast,
    lexer::{Lexer, TokenKind},
    reader,
    types::{Number, NumberKind, NumberTarget},
};

/// Decodes the numeric token under a lexer's cursor into the representation
/// a caller asked for.
///
/// The engine owns the decision between the fast literal paths and the
/// generic fallback. On the fast paths it reads the literal straight off the
/// lexer and advances the cursor itself; on the fallback path the generic
/// parse is responsible for the advancement. Either way, after a successful
/// call the cursor sits on the token that follows the consumed value.
///
/// The engine keeps no state; it is a plain function dressed as a type so
/// the fast-match declaration has somewhere to live.
pub struct NumberDecoder;

impl NumberDecoder {
    /// The token kind this decoder primarily expects. A dispatcher can route
    /// tokens of this kind here without probing; this is an optimization
    /// hint, not a correctness constraint.
    pub const FAST_MATCH_TOKEN: TokenKind = TokenKind::IntLiteral;

    /// Coerces the value at the cursor to `target`.
    ///
    /// Returns `Ok(None)` in exactly two cases: a `NaN` identifier under a
    /// target with no NaN reading, and a `null` materialized by the fallback
    /// parse. Everything else either produces a number or fails.
    ///
    /// `field` is an opaque label attached to fallback cast failures for
    /// diagnostic attribution; it plays no part in the decoding itself.
    pub fn coerce(
        lexer: &mut Lexer,
        target: NumberTarget,
        field: &str,
    ) -> Result<Option<Number>> {
        match lexer.token() {
            TokenKind::IntLiteral => Self::coerce_int_literal(lexer, target).map(Some),
            TokenKind::FloatLiteral => Self::coerce_float_literal(lexer, target).map(Some),
            TokenKind::Identifier if lexer.ident_text() == "NaN" => {
                lexer.advance()?;

                // Only the nullable floating targets have a NaN reading;
                // every other target quietly yields nothing.
                Ok(match (target.kind, target.nullable) {
                    (NumberKind::Double, true) => Some(Number::Double(f64::NAN)),
                    (NumberKind::Float, true) => Some(Number::Float(f32::NAN)),
                    _ => None,
                })
            }
            _ => Self::coerce_fallback(lexer, target, field),
        }
    }

    fn coerce_int_literal(lexer: &mut Lexer, target: NumberTarget) -> Result<Number> {
        if target.is_double_family() {
            // The raw text must be parsed directly: converting the decoded
            // i64 reading would not round the digit sequence the same way a
            // floating-point parse does.
            let text = lexer.number_text();
            lexer.advance_expecting(TokenKind::Comma)?;
            return Ok(Number::Double(parse_double(text)?));
        }

        let value = lexer.long_value()?;
        lexer.advance_expecting(TokenKind::Comma)?;

        match target.kind {
            NumberKind::Short => {
                if value > i64::from(i16::MAX) || value < i64::from(i16::MIN) {
                    return OverflowSnafu {
                        target: NumberKind::Short,
                        value: value.to_string(),
                    }
                    .fail();
                }
                Ok(Number::Short(value as i16))
            }
            NumberKind::Byte => {
                if value > i64::from(i8::MAX) || value < i64::from(i8::MIN) {
                    return OverflowSnafu {
                        target: NumberKind::Byte,
                        value: value.to_string(),
                    }
                    .fail();
                }
                Ok(Number::Byte(value as i8))
            }
            _ => {
                // Implicit widening: the output width follows the literal's
                // magnitude, not the request.
                if value >= i64::from(i32::MIN) && value <= i64::from(i32::MAX) {
                    Ok(Number::Int(value as i32))
                } else {
                    Ok(Number::Long(value))
                }
            }
        }
    }

    fn coerce_float_literal(lexer: &mut Lexer, target: NumberTarget) -> Result<Number> {
        if target.is_double_family() {
            let text = lexer.number_text();
            lexer.advance_expecting(TokenKind::Comma)?;
            return Ok(Number::Double(parse_double(text)?));
        }

        let value = lexer.decimal_value()?;
        lexer.advance_expecting(TokenKind::Comma)?;

        match target.kind {
            NumberKind::Short => {
                if value > BigDecimal::from(i16::MAX) || value < BigDecimal::from(i16::MIN) {
                    return OverflowSnafu {
                        target: NumberKind::Short,
                        value: value.to_string(),
                    }
                    .fail();
                }
                let short = cast::decimal_trunc_i16(&value).context(OverflowSnafu {
                    target: NumberKind::Short,
                    value: value.to_string(),
                })?;
                Ok(Number::Short(short))
            }
            NumberKind::Byte => {
                // No range check on this arm, unlike Short above: oversized
                // decimals keep their low 8 bits. Candidate fix: bound-check
                // the way the Short arm does.
                Ok(Number::Byte(cast::decimal_low_byte(&value)))
            }
            // A decimal is exactly representable for every remaining target,
            // so it is returned unchanged.
            _ => Ok(Number::Decimal(value)),
        }
    }

    fn coerce_fallback(
        lexer: &mut Lexer,
        target: NumberTarget,
        field: &str,
    ) -> Result<Option<Number>> {
        let value = reader::parse_value(lexer)?;

        if value.is_null() {
            return Ok(None);
        }

        let number = match target.kind {
            NumberKind::Double => {
                Number::Double(cast::to_double(&value).context(CastSnafu {
                    what: "Double",
                    field,
                })?)
            }
            NumberKind::Short => Number::Short(cast::to_short(&value).context(CastSnafu {
                what: "Short",
                field,
            })?),
            NumberKind::Byte => Number::Byte(cast::to_byte(&value).context(CastSnafu {
                what: "Byte",
                field,
            })?),
            // Every remaining target falls back to the exact decimal, the
            // universal output of this path.
            _ => Number::Decimal(cast::to_decimal(&value).context(CastSnafu {
                what: "Decimal",
                field,
            })?),
        };

        Ok(Some(number))
    }
}

fn parse_double(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .ok()
        .context(FloatTextSnafu { text })
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// A literal does not fit the requested narrow target. Both narrow
    /// targets report "short overflow"; the text is kept as-is for output
    /// compatibility.
    #[snafu(display("short overflow : {value}"))]
    Overflow { target: NumberKind, value: String },

    /// The generic caster failed on the fallback path. The field label is
    /// attached for attribution and the cause is preserved.
    #[snafu(display("parse{what} error, field : {field}"))]
    Cast {
        what: &'static str,
        field: String,
        source: cast::Error,
    },

    #[snafu(display("float literal '{text}' is not a valid floating value"))]
    FloatText { text: String },

    #[snafu(context(false), display("{source}"))]
    Lex { source: crate::lexer::Error },

    #[snafu(context(false), display("{source}"))]
    Parse { source: reader::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    fn coerce_one(input: &str, target: NumberTarget) -> Result<Option<Number>> {
        let mut lexer = Lexer::new(input).unwrap();
        NumberDecoder::coerce(&mut lexer, target, "field")
    }

    #[test]
    fn byte_round_trips_across_its_full_range() {
        for i in -128..=127i64 {
            let text = i.to_string();
            let result = coerce_one(&text, NumberTarget::byte()).unwrap();
            assert_eq!(result, Some(Number::Byte(i as i8)), "literal {text}");
        }
    }

    #[test]
    fn byte_overflows_outside_its_range() {
        for text in ["128", "-129", "1000"] {
            let err = coerce_one(text, NumberTarget::byte()).unwrap_err();
            assert!(
                err.to_string().contains("short overflow"),
                "literal {text}: {err}"
            );
            assert!(matches!(
                err,
                Error::Overflow {
                    target: NumberKind::Byte,
                    ..
                }
            ));
        }
    }

    #[test]
    fn short_round_trips_within_its_range() {
        for i in [-32768i64, -1, 0, 1, 32767] {
            let result = coerce_one(&i.to_string(), NumberTarget::short()).unwrap();
            assert_eq!(result, Some(Number::Short(i as i16)));
        }
    }

    #[test]
    fn short_overflows_outside_its_range() {
        for text in ["32768", "-32769", "40000"] {
            let err = coerce_one(text, NumberTarget::short()).unwrap_err();
            assert!(err.to_string().contains("short overflow : "));
        }
    }

    #[test]
    fn integer_widening_follows_the_magnitude() {
        assert_eq!(
            coerce_one("42", NumberTarget::any()).unwrap(),
            Some(Number::Int(42))
        );
        assert_eq!(
            coerce_one("2147483647", NumberTarget::any()).unwrap(),
            Some(Number::Int(2147483647))
        );
        assert_eq!(
            coerce_one("2147483648", NumberTarget::any()).unwrap(),
            Some(Number::Long(2147483648))
        );
        assert_eq!(
            coerce_one("-2147483648", NumberTarget::any()).unwrap(),
            Some(Number::Int(-2147483648))
        );
        assert_eq!(
            coerce_one("-2147483649", NumberTarget::any()).unwrap(),
            Some(Number::Long(-2147483649))
        );
    }

    #[test]
    fn widening_also_applies_to_long_and_decimal_requests() {
        assert_eq!(
            coerce_one("42", NumberTarget::long()).unwrap(),
            Some(Number::Int(42))
        );
        assert_eq!(
            coerce_one("42", NumberTarget::decimal()).unwrap(),
            Some(Number::Int(42))
        );
    }

    #[test]
    fn double_target_parses_the_raw_text() {
        let result = coerce_one("3.14", NumberTarget::boxed_double()).unwrap();
        let Some(Number::Double(value)) = result else {
            panic!("expected a double, got {result:?}");
        };
        assert_eq!(value.to_string(), "3.14");
    }

    #[test]
    fn float_target_reads_a_64_bit_value() {
        assert_eq!(
            coerce_one("3.5", NumberTarget::float()).unwrap(),
            Some(Number::Double(3.5))
        );
        assert_eq!(
            coerce_one("42", NumberTarget::boxed_float()).unwrap(),
            Some(Number::Double(42.0))
        );
    }

    #[test]
    fn int_literal_with_double_target_goes_through_text() {
        assert_eq!(
            coerce_one("42", NumberTarget::double()).unwrap(),
            Some(Number::Double(42.0))
        );
    }

    #[test]
    fn float_literal_to_short_checks_decimal_bounds() {
        let err = coerce_one("40000.0", NumberTarget::short()).unwrap_err();
        assert!(err.to_string().contains("short overflow"));

        let err = coerce_one("4e4", NumberTarget::short()).unwrap_err();
        assert!(err.to_string().contains("short overflow"));

        assert_eq!(
            coerce_one("1.9", NumberTarget::short()).unwrap(),
            Some(Number::Short(1))
        );
        assert_eq!(
            coerce_one("-1.9", NumberTarget::short()).unwrap(),
            Some(Number::Short(-1))
        );
    }

    #[test]
    fn float_literal_to_byte_narrows_without_a_bound_check() {
        // Pins the unchecked low-8-bits behavior of the decimal byte arm.
        assert_eq!(
            coerce_one("300.9", NumberTarget::byte()).unwrap(),
            Some(Number::Byte(44))
        );
        assert_eq!(
            coerce_one("1.9", NumberTarget::byte()).unwrap(),
            Some(Number::Byte(1))
        );
    }

    #[test]
    fn float_literal_defaults_to_the_exact_decimal() {
        for target in [
            NumberTarget::any(),
            NumberTarget::long(),
            NumberTarget::decimal(),
        ] {
            assert_eq!(
                coerce_one("3.14", target).unwrap(),
                Some(Number::Decimal("3.14".parse().unwrap())),
                "target {target:?}"
            );
        }
    }

    #[test]
    fn nan_is_recognized_for_nullable_floating_targets_only() {
        let result = coerce_one("NaN", NumberTarget::boxed_double()).unwrap();
        assert!(matches!(result, Some(Number::Double(v)) if v.is_nan()));

        let result = coerce_one("NaN", NumberTarget::boxed_float()).unwrap();
        assert!(matches!(result, Some(Number::Float(v)) if v.is_nan()));

        assert_eq!(coerce_one("NaN", NumberTarget::long()).unwrap(), None);
        assert_eq!(coerce_one("NaN", NumberTarget::any()).unwrap(), None);
        // the non-nullable floating forms have no NaN reading either
        assert_eq!(coerce_one("NaN", NumberTarget::double()).unwrap(), None);
        assert_eq!(coerce_one("NaN", NumberTarget::float()).unwrap(), None);
    }

    #[test]
    fn fallback_casts_a_string_token() {
        assert_eq!(
            coerce_one("\"123\"", NumberTarget::boxed_double()).unwrap(),
            Some(Number::Double(123.0))
        );
        assert_eq!(
            coerce_one("\"12\"", NumberTarget::short()).unwrap(),
            Some(Number::Short(12))
        );
        assert_eq!(
            coerce_one("\"1.25\"", NumberTarget::any()).unwrap(),
            Some(Number::Decimal("1.25".parse().unwrap()))
        );
    }

    #[test]
    fn fallback_null_yields_nothing() {
        assert_eq!(coerce_one("null", NumberTarget::boxed_double()).unwrap(), None);
        assert_eq!(coerce_one("null", NumberTarget::any()).unwrap(), None);
    }

    #[test]
    fn fallback_cast_failures_carry_the_field_label() {
        let err = coerce_one("\"abc\"", NumberTarget::boxed_double()).unwrap_err();
        assert_eq!(err.to_string(), "parseDouble error, field : field");

        let result = coerce_one("true", NumberTarget::any());
        assert_eq!(result.unwrap(), Some(Number::Decimal(1.into())));

        let err = coerce_one("[1]", NumberTarget::short()).unwrap_err();
        assert!(err.to_string().contains("parseShort error, field : field"));
    }

    #[test]
    fn fast_paths_advance_exactly_past_the_literal() {
        let mut lexer = Lexer::new("42, 7").unwrap();
        NumberDecoder::coerce(&mut lexer, NumberTarget::any(), "field").unwrap();
        assert_eq!(lexer.token(), TokenKind::Comma);

        let mut lexer = Lexer::new("2.5]").unwrap();
        NumberDecoder::coerce(&mut lexer, NumberTarget::any(), "field").unwrap();
        assert_eq!(lexer.token(), TokenKind::RightBracket);

        let mut lexer = Lexer::new("NaN, 1").unwrap();
        NumberDecoder::coerce(&mut lexer, NumberTarget::long(), "field").unwrap();
        assert_eq!(lexer.token(), TokenKind::Comma);
    }

    #[test]
    fn fallback_path_advances_through_the_parsed_value() {
        let mut lexer = Lexer::new("\"9\", true").unwrap();
        NumberDecoder::coerce(&mut lexer, NumberTarget::any(), "field").unwrap();
        assert_eq!(lexer.token(), TokenKind::Comma);
    }

    #[test]
    fn independent_sources_with_identical_text_agree() {
        for (text, target) in [
            ("37", NumberTarget::any()),
            ("1.5", NumberTarget::decimal()),
            ("100", NumberTarget::byte()),
        ] {
            let first = coerce_one(text, target).unwrap();
            let second = coerce_one(text, target).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn fast_match_token_is_the_integer_literal() {
        assert_eq!(NumberDecoder::FAST_MATCH_TOKEN, TokenKind::IntLiteral);
    }
}
