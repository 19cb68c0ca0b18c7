use bigdecimal::BigDecimal;
use smol_str::SmolStr;

/// Represents an arbitrary decoded JSON value.
///
/// This is the generic model the document parser materializes when a caller
/// has not requested a specific representation. Two points differ from the
/// obvious mapping of the JSON grammar:
///
/// - Integer literals decode to [`Value::Integer`] (signed 64-bit); float
///   literals decode to [`Value::Decimal`], an exact base-10 representation.
///   [`Value::Double`] only appears when a caller constructs it or casts into
///   it, never from the generic parse. This keeps the generic path lossless.
/// - Object members keep their insertion order in a vector of pairs rather
///   than a map; duplicate keys are preserved as read.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    /// The `null` literal.
    Null,
    /// A `true` or `false` literal.
    Bool(bool),
    /// An integer literal, decoded as a signed 64-bit integer.
    Integer(i64),
    /// An IEEE double-precision value.
    Double(f64),
    /// A float literal, decoded exactly as an arbitrary-precision decimal.
    Decimal(BigDecimal),
    /// A string literal with all escapes resolved.
    String(String),
    /// An array of 0 or more values.
    Array(Vec<Value>),
    /// An object: ordered key-value member pairs.
    Object(Vec<(SmolStr, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(data) => Some(*data),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(data) => Some(data.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(data) => Some(data),
            _ => None,
        }
    }

    /// Looks up the first member with the given key, if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}
