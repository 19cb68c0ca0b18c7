use std::fmt;

use bigdecimal::BigDecimal;

/// The numeric representation a caller asks the coercion engine for.
///
/// `Any` is the implicit request: the caller wants "some number" and leaves
/// the width to the literal's magnitude (32-bit if it fits, 64-bit
/// otherwise). Every other kind is an explicit request with its own
/// narrowing or parsing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Any,
    Byte,
    Short,
    Long,
    Float,
    Double,
    Decimal,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberKind::Any => "number",
            NumberKind::Byte => "byte",
            NumberKind::Short => "short",
            NumberKind::Long => "long",
            NumberKind::Float => "float",
            NumberKind::Double => "double",
            NumberKind::Decimal => "decimal",
        };
        f.write_str(name)
    }
}

/// A requested target type: the kind plus whether the request is nullable.
///
/// Nullability models the difference between a field that can hold an absent
/// value and one that cannot. The engine itself consults it in exactly one
/// place, the `NaN` sentinel branch; null propagation for everything else is
/// the calling layer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberTarget {
    pub kind: NumberKind,
    pub nullable: bool,
}

impl NumberTarget {
    pub const fn new(kind: NumberKind, nullable: bool) -> Self {
        Self { kind, nullable }
    }

    pub const fn any() -> Self {
        Self::new(NumberKind::Any, true)
    }

    pub const fn byte() -> Self {
        Self::new(NumberKind::Byte, false)
    }

    pub const fn boxed_byte() -> Self {
        Self::new(NumberKind::Byte, true)
    }

    pub const fn short() -> Self {
        Self::new(NumberKind::Short, false)
    }

    pub const fn boxed_short() -> Self {
        Self::new(NumberKind::Short, true)
    }

    pub const fn long() -> Self {
        Self::new(NumberKind::Long, false)
    }

    pub const fn boxed_long() -> Self {
        Self::new(NumberKind::Long, true)
    }

    pub const fn float() -> Self {
        Self::new(NumberKind::Float, false)
    }

    pub const fn boxed_float() -> Self {
        Self::new(NumberKind::Float, true)
    }

    pub const fn double() -> Self {
        Self::new(NumberKind::Double, false)
    }

    pub const fn boxed_double() -> Self {
        Self::new(NumberKind::Double, true)
    }

    pub const fn decimal() -> Self {
        Self::new(NumberKind::Decimal, true)
    }

    /// Floating-point requests read the raw literal text on the fast paths,
    /// for either nullability.
    pub(crate) const fn is_double_family(&self) -> bool {
        matches!(self.kind, NumberKind::Float | NumberKind::Double)
    }
}

/// A coerced numeric value.
///
/// The variant is decided by the engine, not only by the request: an `Any`
/// request yields [`Number::Int`] or [`Number::Long`] depending on the
/// literal's magnitude, and a float literal under most targets yields the
/// exact [`Number::Decimal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn target_constructors_carry_nullability() {
        assert!(NumberTarget::boxed_double().nullable);
        assert!(!NumberTarget::double().nullable);
        assert_eq!(NumberTarget::boxed_double().kind, NumberKind::Double);
        assert!(NumberTarget::any().nullable);
    }

    #[test]
    fn double_family_covers_both_float_widths() {
        assert!(NumberTarget::double().is_double_family());
        assert!(NumberTarget::boxed_float().is_double_family());
        assert!(!NumberTarget::decimal().is_double_family());
        assert!(!NumberTarget::any().is_double_family());
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(NumberKind::Short.to_string(), "short");
        assert_eq!(NumberKind::Any.to_string(), "number");
    }
}
