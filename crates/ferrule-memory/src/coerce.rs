//! Value coercion - caller-supplied values into the numeric domains writes need
//!
//! Integer coercion follows `to_int` semantics: floats truncate toward zero,
//! non-finite floats and everything non-numeric fail with a type error.
//! Float coercion widens integers, exact up to 2^53.

use crate::error::AccessError;
use crate::value::Value;

/// Coerce a value to a 64-bit integer.
pub fn integer(value: &Value) -> Result<i64, AccessError> {
    match value {
        Value::Integer(i) => Ok(*i),
        Value::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        other => Err(AccessError::TypeMismatch {
            expected: "integer",
            got: other.type_name().to_string(),
        }),
    }
}

/// Coerce a value to a 64-bit float.
pub fn float(value: &Value) -> Result<f64, AccessError> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Integer(i) => Ok(*i as f64),
        other => Err(AccessError::TypeMismatch {
            expected: "float",
            got: other.type_name().to_string(),
        }),
    }
}
