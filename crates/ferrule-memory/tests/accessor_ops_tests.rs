//! Integration tests for name-based accessor dispatch
//!
//! The dynamic surface: operation names parsed into (shape, kind) tuples,
//! arity checking, the fluent chain style of write-shaped operations, and
//! bit-identical behavior across alias groups.

mod common;

use common::region;
use ferrule_memory::{call_accessor, is_accessor, operation_names, AccessError, PrimitiveKind, Value};
use ferrule_memory::ops::{parse, AccessShape};
use pretty_assertions::assert_eq;

#[test]
fn unknown_operation_is_reported_by_name() {
    let (_mem, ptr) = region(8);
    assert_eq!(
        call_accessor(&ptr, "read_decimal", &[]).unwrap_err(),
        AccessError::UnknownOperation {
            name: "read_decimal".to_string()
        }
    );
}

#[test]
fn arity_is_checked_per_shape() {
    let (_mem, ptr) = region(8);
    assert_eq!(
        call_accessor(&ptr, "put_int32", &[Value::Integer(0)]).unwrap_err(),
        AccessError::Arity {
            name: "put_int32".to_string(),
            expected: 2,
            got: 1,
        }
    );
    assert!(matches!(
        call_accessor(&ptr, "read_int32", &[Value::Integer(0)]),
        Err(AccessError::Arity { .. })
    ));
}

#[test]
fn write_shapes_return_the_handle_for_chaining() {
    let (_mem, ptr) = region(8);
    let returned = call_accessor(&ptr, "write_int16", &[Value::Integer(300)]).unwrap();
    assert_eq!(returned, Value::Pointer(ptr.clone()));
    let returned =
        call_accessor(&ptr, "put_int16", &[Value::Integer(2), Value::Integer(-300)]).unwrap();
    assert_eq!(returned, Value::Pointer(ptr.clone()));
    assert_eq!(
        call_accessor(&ptr, "read_array_of_int16", &[Value::Integer(2)]).unwrap(),
        Value::array(vec![Value::Integer(300), Value::Integer(-300)])
    );
}

#[test]
fn offsets_and_lengths_coerce_like_integers() {
    let (_mem, ptr) = region(8);
    call_accessor(&ptr, "put_uint8", &[Value::Float(3.0), Value::Integer(9)]).unwrap();
    assert_eq!(
        call_accessor(&ptr, "get_uint8", &[Value::Integer(3)]).unwrap(),
        Value::Integer(9)
    );
    assert!(matches!(
        call_accessor(&ptr, "get_uint8", &[Value::string("3")]),
        Err(AccessError::TypeMismatch { .. })
    ));
}

#[test]
fn alias_groups_store_identical_bytes() {
    for kind in PrimitiveKind::ALL {
        let sample = if kind.is_float() {
            Value::Float(13.5)
        } else {
            Value::Integer(-13)
        };
        for alias in kind.aliases() {
            let (canonical_mem, canonical_ptr) = region(8);
            let (alias_mem, alias_ptr) = region(8);

            let canonical_op = format!("write_{}", kind.display_name());
            let alias_op = format!("write_{alias}");
            call_accessor(&canonical_ptr, &canonical_op, std::slice::from_ref(&sample)).unwrap();
            call_accessor(&alias_ptr, &alias_op, std::slice::from_ref(&sample)).unwrap();

            assert_eq!(
                canonical_mem.snapshot(),
                alias_mem.snapshot(),
                "{canonical_op} and {alias_op} must store identical bytes"
            );
            assert_eq!(
                call_accessor(&canonical_ptr, &format!("read_{alias}"), &[]).unwrap(),
                call_accessor(&alias_ptr, &format!("read_{}", kind.display_name()), &[]).unwrap(),
                "cross-name read-back must agree for {}",
                kind.display_name()
            );
        }
    }
}

#[test]
fn every_registered_operation_dispatches() {
    let (_mem, ptr) = region(64);
    let pair = Value::array(vec![Value::Integer(1), Value::Integer(2)]);
    for name in operation_names() {
        let (shape, _) = parse(&name).expect("registry name must parse");
        let args: Vec<Value> = match shape {
            AccessShape::Read => vec![],
            AccessShape::Write => vec![Value::Integer(1)],
            AccessShape::Get => vec![Value::Integer(0)],
            AccessShape::Put => vec![Value::Integer(0), Value::Integer(1)],
            AccessShape::ReadArray => vec![Value::Integer(2)],
            AccessShape::WriteArray => vec![pair.clone()],
            AccessShape::GetArray => vec![Value::Integer(0), Value::Integer(2)],
            AccessShape::PutArray => vec![Value::Integer(0), pair.clone()],
        };
        assert!(
            call_accessor(&ptr, &name, &args).is_ok(),
            "operation {name} failed to dispatch"
        );
        assert!(is_accessor(&name));
    }
}

#[test]
fn float_writes_accept_integers() {
    let (_mem, ptr) = region(8);
    call_accessor(&ptr, "write_double", &[Value::Integer(2)]).unwrap();
    assert_eq!(
        call_accessor(&ptr, "read_float64", &[]).unwrap(),
        Value::Float(2.0)
    );
}

#[test]
fn integer_writes_truncate_float_inputs() {
    let (_mem, ptr) = region(8);
    call_accessor(&ptr, "write_int", &[Value::Float(7.9)]).unwrap();
    assert_eq!(
        call_accessor(&ptr, "read_int32", &[]).unwrap(),
        Value::Integer(7)
    );
}
