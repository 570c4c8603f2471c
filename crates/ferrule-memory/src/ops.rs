//! Named-operation dispatch over the typed accessor
//!
//! The dynamic surface exposes one operation per (access shape, kind name)
//! pair - `read_int32`, `put_array_of_uchar`, `get_double`, ... - well over
//! a hundred names. Rather than a hundred methods, a name parses into an
//! [`AccessShape`] prefix plus a kind suffix resolved through
//! [`PrimitiveKind::from_name`], and `call` dispatches the tuple to the
//! generic accessor. Alias groups (`read_char`/`read_int8`) collapse onto
//! the same tuple, so synonyms are bit-identical by construction.

use crate::coerce;
use crate::error::AccessError;
use crate::kind::PrimitiveKind;
use crate::pointer::Pointer;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// The scalar/array x implicit/explicit-offset axis of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessShape {
    /// `read_<kind>()` - scalar read at base
    Read,
    /// `write_<kind>(value)` - scalar write at base
    Write,
    /// `get_<kind>(offset)` - scalar read at base + offset
    Get,
    /// `put_<kind>(offset, value)` - scalar write at base + offset
    Put,
    /// `read_array_of_<kind>(length)` - array read at base
    ReadArray,
    /// `write_array_of_<kind>(sequence)` - array write at base
    WriteArray,
    /// `get_array_of_<kind>(offset, length)` - array read at base + offset
    GetArray,
    /// `put_array_of_<kind>(offset, sequence)` - array write at base + offset
    PutArray,
}

impl AccessShape {
    /// Argument count the shape's operations expect.
    pub fn arity(self) -> usize {
        match self {
            AccessShape::Read => 0,
            AccessShape::Write | AccessShape::Get | AccessShape::ReadArray | AccessShape::WriteArray => 1,
            AccessShape::Put | AccessShape::GetArray | AccessShape::PutArray => 2,
        }
    }
}

// Longest prefixes first: `read_array_of_char` must not parse as
// `read_` + `array_of_char`.
const SHAPE_PREFIXES: [(&str, AccessShape); 8] = [
    ("read_array_of_", AccessShape::ReadArray),
    ("write_array_of_", AccessShape::WriteArray),
    ("get_array_of_", AccessShape::GetArray),
    ("put_array_of_", AccessShape::PutArray),
    ("read_", AccessShape::Read),
    ("write_", AccessShape::Write),
    ("get_", AccessShape::Get),
    ("put_", AccessShape::Put),
];

/// Parse an operation name into its (shape, kind) tuple.
pub fn parse(name: &str) -> Option<(AccessShape, PrimitiveKind)> {
    for (prefix, shape) in SHAPE_PREFIXES {
        if let Some(kind_name) = name.strip_prefix(prefix) {
            return PrimitiveKind::from_name(kind_name).map(|kind| (shape, kind));
        }
    }
    None
}

/// Check if a name is a typed accessor operation.
pub fn is_accessor(name: &str) -> bool {
    parse(name).is_some()
}

/// Call a typed accessor operation by name.
///
/// Offset and length arguments coerce like any integer (floats truncate).
/// Write-shaped operations return the handle itself, preserving the fluent
/// chain style of the dynamic surface.
pub fn call(pointer: &Pointer, name: &str, args: &[Value]) -> Result<Value, AccessError> {
    let (shape, kind) = parse(name).ok_or_else(|| AccessError::UnknownOperation {
        name: name.to_string(),
    })?;
    let expected = shape.arity();
    if args.len() != expected {
        return Err(AccessError::Arity {
            name: name.to_string(),
            expected,
            got: args.len(),
        });
    }
    match shape {
        AccessShape::Read => pointer.read(kind),
        AccessShape::Write => {
            pointer.write(kind, &args[0])?;
            Ok(Value::Pointer(pointer.clone()))
        }
        AccessShape::Get => pointer.get(kind, coerce::integer(&args[0])?),
        AccessShape::Put => {
            pointer.put(kind, coerce::integer(&args[0])?, &args[1])?;
            Ok(Value::Pointer(pointer.clone()))
        }
        AccessShape::ReadArray => Ok(Value::array(
            pointer.read_array_of(kind, coerce::integer(&args[0])?)?,
        )),
        AccessShape::WriteArray => {
            pointer.write_array_of(kind, &args[0])?;
            Ok(Value::Pointer(pointer.clone()))
        }
        AccessShape::GetArray => Ok(Value::array(pointer.get_array_of(
            kind,
            coerce::integer(&args[0])?,
            coerce::integer(&args[1])?,
        )?)),
        AccessShape::PutArray => {
            pointer.put_array_of(kind, coerce::integer(&args[0])?, &args[1])?;
            Ok(Value::Pointer(pointer.clone()))
        }
    }
}

/// Every operation name the registry answers to: each shape crossed with
/// each kind's canonical name and aliases.
pub fn operation_names() -> Vec<String> {
    let mut names = Vec::new();
    for kind in PrimitiveKind::ALL {
        for (prefix, _) in SHAPE_PREFIXES {
            names.push(format!("{prefix}{}", kind.display_name()));
            for alias in kind.aliases() {
                names.push(format!("{prefix}{alias}"));
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_names() {
        assert_eq!(
            parse("read_int32"),
            Some((AccessShape::Read, PrimitiveKind::Int32))
        );
        assert_eq!(
            parse("write_double"),
            Some((AccessShape::Write, PrimitiveKind::Float64))
        );
        assert_eq!(
            parse("get_pointer"),
            Some((AccessShape::Get, PrimitiveKind::Pointer))
        );
        assert_eq!(
            parse("put_ulong_long"),
            Some((AccessShape::Put, PrimitiveKind::Uint64))
        );
    }

    #[test]
    fn test_parse_array_names_before_scalar_prefixes() {
        assert_eq!(
            parse("read_array_of_char"),
            Some((AccessShape::ReadArray, PrimitiveKind::Int8))
        );
        assert_eq!(
            parse("put_array_of_float"),
            Some((AccessShape::PutArray, PrimitiveKind::Float32))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(parse("read_int128"), None);
        assert_eq!(parse("peek_int32"), None);
        assert_eq!(parse("read_"), None);
        assert_eq!(parse("int32"), None);
    }

    #[test]
    fn test_aliases_parse_to_same_tuple() {
        for kind in PrimitiveKind::ALL {
            for alias in kind.aliases() {
                for (prefix, shape) in SHAPE_PREFIXES {
                    let canonical = format!("{prefix}{}", kind.display_name());
                    let aliased = format!("{prefix}{alias}");
                    assert_eq!(parse(&canonical), Some((shape, kind)));
                    assert_eq!(parse(&aliased), Some((shape, kind)));
                }
            }
        }
    }

    #[test]
    fn test_is_accessor() {
        assert!(is_accessor("read_uint8"));
        assert!(is_accessor("write_array_of_ushort"));
        assert!(!is_accessor("read_array_of_"));
        assert!(!is_accessor("malloc"));
    }

    #[test]
    fn test_arity_table() {
        assert_eq!(AccessShape::Read.arity(), 0);
        assert_eq!(AccessShape::Write.arity(), 1);
        assert_eq!(AccessShape::Get.arity(), 1);
        assert_eq!(AccessShape::Put.arity(), 2);
        assert_eq!(AccessShape::ReadArray.arity(), 1);
        assert_eq!(AccessShape::WriteArray.arity(), 1);
        assert_eq!(AccessShape::GetArray.arity(), 2);
        assert_eq!(AccessShape::PutArray.arity(), 2);
    }

    #[test]
    fn test_operation_names_cover_registry() {
        let names = operation_names();
        // 11 kinds + 12 aliases, each crossed with 8 shapes
        assert_eq!(names.len(), (11 + 12) * 8);
        for name in &names {
            assert!(is_accessor(name), "registry rejects its own name {name}");
        }
    }
}
