use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use snafu::{OptionExt, Snafu};

use crate::types::Value;

/// Conversions from the generic value model into specific numeric
/// representations.
///
/// These are the fallback casts the coercion engine reaches for when the
/// current token was not a numeric literal: the value has already been
/// materialized (string, boolean, number, ...) and now has to become the
/// requested width. Strings parse, booleans map to 1/0, numbers range-check,
/// everything else is an unsupported cast.

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("can not cast to {target} : {value}"))]
    Unsupported { target: &'static str, value: String },

    #[snafu(display("{target} overflow : {value}"))]
    Overflow { target: &'static str, value: String },

    #[snafu(display("can not parse '{text}' as {target}"))]
    Parse { target: &'static str, text: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn to_double(value: &Value) -> Result<f64> {
    match value {
        Value::Integer(data) => Ok(*data as f64),
        Value::Double(data) => Ok(*data),
        Value::Decimal(data) => data.to_f64().context(UnsupportedSnafu {
            target: "double",
            value: data.to_string(),
        }),
        Value::Bool(data) => Ok(if *data { 1.0 } else { 0.0 }),
        Value::String(data) => data
            .trim()
            .parse::<f64>()
            .ok()
            .context(ParseSnafu {
                target: "double",
                text: data.clone(),
            }),
        other => UnsupportedSnafu {
            target: "double",
            value: format!("{other:?}"),
        }
        .fail(),
    }
}

pub fn to_short(value: &Value) -> Result<i16> {
    match value {
        Value::Integer(data) => i16::try_from(*data).ok().context(OverflowSnafu {
            target: "short",
            value: data.to_string(),
        }),
        Value::Double(data) => {
            if *data > f64::from(i16::MAX) || *data < f64::from(i16::MIN) {
                return OverflowSnafu {
                    target: "short",
                    value: data.to_string(),
                }
                .fail();
            }
            Ok(data.trunc() as i16)
        }
        Value::Decimal(data) => {
            if *data > BigDecimal::from(i16::MAX) || *data < BigDecimal::from(i16::MIN) {
                return OverflowSnafu {
                    target: "short",
                    value: data.to_string(),
                }
                .fail();
            }
            decimal_trunc_i16(data).context(OverflowSnafu {
                target: "short",
                value: data.to_string(),
            })
        }
        Value::Bool(data) => Ok(i16::from(*data)),
        Value::String(data) => data.trim().parse::<i16>().ok().context(ParseSnafu {
            target: "short",
            text: data.clone(),
        }),
        other => UnsupportedSnafu {
            target: "short",
            value: format!("{other:?}"),
        }
        .fail(),
    }
}

pub fn to_byte(value: &Value) -> Result<i8> {
    match value {
        Value::Integer(data) => i8::try_from(*data).ok().context(OverflowSnafu {
            target: "byte",
            value: data.to_string(),
        }),
        Value::Double(data) => {
            if *data > f64::from(i8::MAX) || *data < f64::from(i8::MIN) {
                return OverflowSnafu {
                    target: "byte",
                    value: data.to_string(),
                }
                .fail();
            }
            Ok(data.trunc() as i8)
        }
        Value::Decimal(data) => {
            if *data > BigDecimal::from(i8::MAX) || *data < BigDecimal::from(i8::MIN) {
                return OverflowSnafu {
                    target: "byte",
                    value: data.to_string(),
                }
                .fail();
            }
            Ok(decimal_low_byte(data))
        }
        Value::Bool(data) => Ok(i8::from(*data)),
        Value::String(data) => data.trim().parse::<i8>().ok().context(ParseSnafu {
            target: "byte",
            text: data.clone(),
        }),
        other => UnsupportedSnafu {
            target: "byte",
            value: format!("{other:?}"),
        }
        .fail(),
    }
}

pub fn to_decimal(value: &Value) -> Result<BigDecimal> {
    match value {
        Value::Integer(data) => Ok(BigDecimal::from(*data)),
        Value::Decimal(data) => Ok(data.clone()),
        Value::Double(data) => BigDecimal::from_f64(*data).context(UnsupportedSnafu {
            target: "decimal",
            value: data.to_string(),
        }),
        Value::Bool(data) => Ok(BigDecimal::from(i32::from(*data))),
        Value::String(data) => data.trim().parse::<BigDecimal>().ok().context(ParseSnafu {
            target: "decimal",
            text: data.clone(),
        }),
        other => UnsupportedSnafu {
            target: "decimal",
            value: format!("{other:?}"),
        }
        .fail(),
    }
}

/// Integer part of a decimal, truncated toward zero.
fn integer_part(value: &BigDecimal) -> BigInt {
    value
        .with_scale_round(0, RoundingMode::Down)
        .as_bigint_and_exponent()
        .0
}

/// Truncates toward zero and narrows to 16 bits, if the integer part fits.
pub(crate) fn decimal_trunc_i16(value: &BigDecimal) -> Option<i16> {
    integer_part(value).to_i16()
}

/// Truncates toward zero and keeps the low 8 bits, two's complement.
///
/// This mirrors how a decimal-to-byte narrowing conversion behaves in
/// environments that drop the high bits instead of range-checking.
pub(crate) fn decimal_low_byte(value: &BigDecimal) -> i8 {
    let modulus = BigInt::from(256);
    let bits = ((integer_part(value) % &modulus) + &modulus) % &modulus;

    // `bits` is in [0, 256); the u8 reading reinterprets as two's complement
    bits.to_u8().unwrap_or_default() as i8
}
