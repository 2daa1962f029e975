//! Runtime value representation for the nib VM.
//!
//! Values are what live on the operand stack and in frame bindings.
//! They are small and copied by value; nothing in the language aliases
//! a value after it is pushed.

use std::fmt;

/// A runtime value.
///
/// Numbers are IEEE 754 doubles; comparisons produce distinct booleans
/// rather than numeric flags, so conditionals can reject non-boolean
/// inputs with a type error.
#[derive(Debug, Clone, Copy)]
pub enum Value {
    /// A number. Integer-valued numbers render without a fraction.
    Num(f64),
    /// A boolean, produced by the comparison builtins.
    Bool(bool),
}

// Bitwise equality for Num keeps Value deterministic under comparison
// even if arithmetic produces NaN (NaN == NaN when the bit patterns
// match). The `==` builtin goes through numeric equality separately.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Human-readable type name, used in type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "number",
            Value::Bool(_) => "boolean",
        }
    }

    /// The numeric payload, if this is a number.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Bool(_) => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Num(_) => None,
        }
    }
}

/// Value-as-text rendering: `30`, `2.5`, `true`. This is the single
/// rendering used by `puts`, stack/frame introspection, and the CLI.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_valued_numbers_render_without_fraction() {
        assert_eq!(Value::Num(30.0).to_string(), "30");
        assert_eq!(Value::Num(-100.0).to_string(), "-100");
        assert_eq!(Value::Num(0.0).to_string(), "0");
    }

    #[test]
    fn fractional_numbers_keep_their_fraction() {
        assert_eq!(Value::Num(2.5).to_string(), "2.5");
        assert_eq!(Value::Num(-0.125).to_string(), "-0.125");
    }

    #[test]
    fn booleans_render_as_words() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Num(1.0).type_name(), "number");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Num(4.0).as_num(), Some(4.0));
        assert_eq!(Value::Num(4.0).as_bool(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Bool(true).as_num(), None);
    }

    #[test]
    fn equality_within_types() {
        assert_eq!(Value::Num(42.0), Value::Num(42.0));
        assert_ne!(Value::Num(42.0), Value::Num(43.0));
        assert_eq!(Value::Bool(true), Value::Bool(true));
        assert_ne!(Value::Bool(true), Value::Bool(false));
    }

    #[test]
    fn equality_across_types() {
        assert_ne!(Value::Num(1.0), Value::Bool(true));
        assert_ne!(Value::Num(0.0), Value::Bool(false));
    }

    #[test]
    fn equality_nan_bitwise() {
        let nan = f64::NAN;
        assert_eq!(Value::Num(nan), Value::Num(nan));
    }

    #[test]
    fn equality_signed_zero() {
        // +0.0 and -0.0 have different bit patterns
        assert_ne!(Value::Num(0.0), Value::Num(-0.0));
    }
}
