//! Runtime value representation
//!
//! The dynamic value surface the accessor reads and writes:
//! - Integers, Floats, Bools, Null: immediate values (stack-allocated)
//! - Strings: heap-allocated, reference-counted (Arc<String>), immutable
//! - Arrays: copy-on-write (ValueArray wrapping Arc<Vec<Value>>), value semantics
//! - Pointers: non-owning handles into foreign memory (cheap to clone)
//! - Structs: pointer-carrying records exposing the `to_ptr` capability

use crate::pointer::Pointer;
use std::fmt;
use std::sync::Arc;

/// Copy-on-write array. Cheap to clone (refcount bump).
/// Mutations on a shared array clone the inner Vec first (Arc::make_mut).
#[derive(Clone, Debug)]
pub struct ValueArray(Arc<Vec<Value>>);

impl ValueArray {
    pub fn new() -> Self {
        ValueArray(Arc::new(Vec::new()))
    }

    pub fn from_vec(v: Vec<Value>) -> Self {
        ValueArray(Arc::new(v))
    }

    /// Read access - no clone needed.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get element by index - returns reference into inner Vec.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Mutating access - triggers CoW if Arc is shared.
    pub fn push(&mut self, value: Value) {
        Arc::make_mut(&mut self.0).push(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Convert to owned Vec - clones only if shared.
    pub fn into_vec(self) -> Vec<Value> {
        Arc::try_unwrap(self.0).unwrap_or_else(|arc| (*arc).clone())
    }
}

impl Default for ValueArray {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice() == other.0.as_slice()
    }
}

impl std::ops::Index<usize> for ValueArray {
    type Output = Value;
    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl From<Vec<Value>> for ValueArray {
    fn from(v: Vec<Value>) -> Self {
        ValueArray::from_vec(v)
    }
}

impl FromIterator<Value> for ValueArray {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueArray(Arc::new(iter.into_iter().collect()))
    }
}

/// The duck-typed "convert to pointer" capability.
///
/// Records that carry a pointer (struct wrappers, memory-backed buffers)
/// implement this so pointer-value resolution can accept them wherever a
/// raw pointer is expected. Resolution consults this capability only after
/// the handle, null, and integer strategies have been tried.
pub trait ToPointer: Send + Sync {
    /// The pointer this record stands for.
    fn to_ptr(&self) -> Pointer;
}

/// Runtime value type
#[derive(Clone)]
pub enum Value {
    /// Integer value (64-bit two's complement)
    Integer(i64),
    /// Floating-point value (IEEE 754 double-precision)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Null value (the canonical "no value" sentinel)
    Null,
    /// String value (reference-counted, immutable)
    String(Arc<String>),
    /// Array value (copy-on-write, value semantics)
    Array(ValueArray),
    /// Foreign-memory handle (non-owning, compared by address)
    Pointer(Pointer),
    /// Pointer-carrying record exposing the `to_ptr` capability
    Struct(Arc<dyn ToPointer>),
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create a new array value
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(ValueArray::from_vec(values))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Pointer(_) => "pointer",
            Value::Struct(_) => "struct",
        }
    }
}

impl PartialEq for Value {
    /// Equality contract:
    ///
    /// **Value types** (content equality):
    /// - Integer, Float, Bool, Null, String: primitive equality
    /// - Array: CoW wrapper compares by content
    /// - Pointer: compares by address (extent and backend are not identity)
    ///
    /// **Reference types** (identity equality):
    /// - Struct: pointer-carrying records have no meaningful content
    ///   equality; only the same allocation is equal
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Pointer(a), Value::Pointer(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => Arc::ptr_eq(a, b),
            // Different variants are never equal
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(n) => {
                // Keep whole floats distinguishable from integers
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Array(arr) => {
                let elements: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Pointer(p) => write!(f, "{}", p),
            Value::Struct(_) => write!(f, "<struct>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "Integer({})", i),
            Value::Float(n) => write!(f, "Float({})", n),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Null => write!(f, "Null"),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Array(arr) => write!(f, "Array({:?})", arr.as_slice()),
            Value::Pointer(p) => write!(f, "Pointer({:?})", p),
            Value::Struct(_) => write!(f, "Struct(<to_ptr>)"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Pointer> for Value {
    fn from(p: Pointer) -> Self {
        Value::Pointer(p)
    }
}
