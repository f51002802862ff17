//! # Typed Coercion
//!
//! Converts a stored [`Value`] into a requested Rust type. One generic
//! entry point ([`coerce`]) replaces a per-width family of getters.
//!
//! Rules:
//!
//! - `String` and `bool` need an exact kind match.
//! - Integer widths accept a stored `Int` or `UInt` and succeed only when
//!   the stored value actually fits the requested width. A narrower reader
//!   may read a wider-stored value.
//! - `f64` reads `Double` or `Float`. `f32` reads `Float`, or a `Double`
//!   whose magnitude fits in `f32`. Integers are never read as floats.
//! - `Value` reads anything (subtree clone).

use crate::error::CoercionError;
use crate::value::Value;

/// A Rust type that can be read out of a stored [`Value`].
pub trait FromValue: Sized {
    /// Type name used in diagnostics.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Result<Self, CoercionError>;
}

/// Convert `value` into `T`.
#[inline]
pub fn coerce<T: FromValue>(value: &Value) -> Result<T, CoercionError> {
    T::from_value(value)
}

fn mismatch<T: FromValue>(value: &Value) -> CoercionError {
    CoercionError::KindMismatch {
        expected: T::EXPECTED,
        found: value.kind_name(),
    }
}

macro_rules! from_value_int {
    ($($t:ty),*) => {
        $(impl FromValue for $t {
            const EXPECTED: &'static str = stringify!($t);

            fn from_value(value: &Value) -> Result<Self, CoercionError> {
                let converted = match value {
                    Value::Int(i) => <$t>::try_from(*i).map_err(|_| i.to_string()),
                    Value::UInt(u) => <$t>::try_from(*u).map_err(|_| u.to_string()),
                    _ => return Err(mismatch::<Self>(value)),
                };
                converted.map_err(|value| CoercionError::OutOfRange {
                    value,
                    target: Self::EXPECTED,
                })
            }
        })*
    };
}

from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Double(d) => Ok(*d),
            Value::Float(f) => Ok(f64::from(*f)),
            _ => Err(mismatch::<Self>(value)),
        }
    }
}

impl FromValue for f32 {
    const EXPECTED: &'static str = "f32";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Double(d) if d.is_finite() && d.abs() > f64::from(f32::MAX) => {
                Err(CoercionError::OutOfRange {
                    value: d.to_string(),
                    target: Self::EXPECTED,
                })
            }
            #[allow(clippy::cast_possible_truncation)]
            Value::Double(d) => Ok(*d as f32),
            _ => Err(mismatch::<Self>(value)),
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch::<Self>(value)),
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "String";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(mismatch::<Self>(value)),
        }
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "Value";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_reader_accepts_fitting_wide_value() {
        assert_eq!(coerce::<u8>(&Value::Int(200)), Ok(200u8));
        assert_eq!(coerce::<i8>(&Value::UInt(127)), Ok(127i8));
        assert_eq!(coerce::<i64>(&Value::UInt(42)), Ok(42i64));
        assert_eq!(coerce::<u64>(&Value::UInt(u64::MAX)), Ok(u64::MAX));
    }

    #[test]
    fn integer_overflow_is_out_of_range() {
        assert_eq!(
            coerce::<u8>(&Value::Int(300)),
            Err(CoercionError::OutOfRange {
                value: "300".to_string(),
                target: "u8"
            })
        );
        assert!(matches!(
            coerce::<u32>(&Value::Int(-1)),
            Err(CoercionError::OutOfRange { target: "u32", .. })
        ));
        assert!(matches!(
            coerce::<i64>(&Value::UInt(u64::MAX)),
            Err(CoercionError::OutOfRange { target: "i64", .. })
        ));
    }

    #[test]
    fn integers_are_not_floats_or_strings() {
        assert!(matches!(
            coerce::<f64>(&Value::Int(1)),
            Err(CoercionError::KindMismatch { expected: "f64", .. })
        ));
        assert!(matches!(
            coerce::<String>(&Value::UInt(1)),
            Err(CoercionError::KindMismatch { .. })
        ));
        assert!(matches!(
            coerce::<i32>(&Value::Double(1.0)),
            Err(CoercionError::KindMismatch { .. })
        ));
    }

    #[test]
    fn float_family() {
        assert_eq!(coerce::<f64>(&Value::Float(1.5)), Ok(1.5));
        assert_eq!(coerce::<f32>(&Value::Double(1.5)), Ok(1.5f32));
        assert!(matches!(
            coerce::<f32>(&Value::Double(1e300)),
            Err(CoercionError::OutOfRange { target: "f32", .. })
        ));
    }

    #[test]
    fn exact_kinds_for_bool_and_string() {
        assert_eq!(coerce::<bool>(&Value::Bool(true)), Ok(true));
        assert_eq!(coerce::<String>(&Value::from("x")), Ok("x".to_string()));
        assert_eq!(
            coerce::<bool>(&Value::from("true")),
            Err(CoercionError::KindMismatch {
                expected: "bool",
                found: "string"
            })
        );
        assert!(coerce::<String>(&Value::Null).is_err());
    }

    #[test]
    fn value_reads_anything() {
        let v = Value::from(vec![1i32, 2]);
        assert_eq!(coerce::<Value>(&v), Ok(v.clone()));
    }
}
