//! The typed memory accessor - bounds-checked reads and writes through a handle
//!
//! A [`Pointer`] is a non-owning handle over a base address in a foreign
//! address space, with an optional declared extent. All typed access funnels
//! through one bounds gate (`check_bounds`) and one encode/decode pair
//! parameterized by [`PrimitiveKind`]; the array operations add a single
//! combined up-front check and then decode/encode per slot.
//!
//! Offset arithmetic never mutates a handle: `at_offset` returns a new
//! handle at `base + delta` with the remaining extent. Writes mutate the
//! foreign memory, not the handle, and return `&self` for call chaining.

use crate::coerce;
use crate::error::AccessError;
use crate::kind::PrimitiveKind;
use crate::memory::RawMemory;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Non-owning handle over a base address in a raw memory backend.
///
/// Cheap to clone (refcount bump on the backend). Equality is by address;
/// the extent and the backend are not part of a handle's identity.
#[derive(Clone, Debug)]
pub struct Pointer {
    address: u64,
    extent: Option<u64>,
    memory: Arc<dyn RawMemory>,
}

impl Pointer {
    /// A handle with unknown extent. Bounds checking degrades to rejecting
    /// negative offsets; hard-fault detection is the backend's.
    pub fn new(memory: Arc<dyn RawMemory>, address: u64) -> Self {
        Self {
            address,
            extent: None,
            memory,
        }
    }

    /// A handle over `extent` addressable bytes starting at `address`.
    pub fn with_extent(memory: Arc<dyn RawMemory>, address: u64, extent: u64) -> Self {
        Self {
            address,
            extent: Some(extent),
            memory,
        }
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn extent(&self) -> Option<u64> {
        self.extent
    }

    pub fn is_null(&self) -> bool {
        self.address == 0
    }

    /// A new handle at `base + delta` over the same backend.
    ///
    /// A known extent shrinks by `delta` (to zero at most); stepping
    /// backwards leaves the new handle unbounded, deferring to the backend.
    pub fn at_offset(&self, delta: i64) -> Pointer {
        let extent = if delta >= 0 {
            self.extent.map(|e| e.saturating_sub(delta as u64))
        } else {
            None
        };
        Pointer {
            address: self.address.wrapping_add(delta as u64),
            extent,
            memory: self.memory.clone(),
        }
    }

    /// The shared bounds gate. Negative offsets and lengths always fail;
    /// a known extent additionally bounds `offset + len`.
    fn check_bounds(&self, offset: i64, len: i64) -> Result<(), AccessError> {
        if offset < 0 || len < 0 {
            return Err(AccessError::OutOfBounds { offset, len });
        }
        if let Some(extent) = self.extent {
            let within = (offset as u64)
                .checked_add(len as u64)
                .is_some_and(|end| end <= extent);
            if !within {
                return Err(AccessError::OutOfBounds { offset, len });
            }
        }
        Ok(())
    }

    /// Read one value of `kind` at the handle's base address.
    pub fn read(&self, kind: PrimitiveKind) -> Result<Value, AccessError> {
        self.check_bounds(0, kind.width() as i64)?;
        Ok(self.decode(kind, self.address))
    }

    /// Coerce `value` and store it at the handle's base address.
    pub fn write(&self, kind: PrimitiveKind, value: &Value) -> Result<&Self, AccessError> {
        self.check_bounds(0, kind.width() as i64)?;
        self.encode(kind, self.address, value)?;
        Ok(self)
    }

    /// Read one value of `kind` at `base + offset`.
    pub fn get(&self, kind: PrimitiveKind, offset: i64) -> Result<Value, AccessError> {
        self.check_bounds(offset, kind.width() as i64)?;
        Ok(self.decode(kind, self.address.wrapping_add(offset as u64)))
    }

    /// Coerce `value` and store it at `base + offset`.
    pub fn put(
        &self,
        kind: PrimitiveKind,
        offset: i64,
        value: &Value,
    ) -> Result<&Self, AccessError> {
        self.check_bounds(offset, kind.width() as i64)?;
        self.encode(kind, self.address.wrapping_add(offset as u64), value)?;
        Ok(self)
    }

    /// Read `length` consecutive values of `kind` starting at the base
    /// address. One combined bounds check up front, then independent
    /// decodes per slot. `length == 0` yields an empty vec.
    pub fn read_array_of(
        &self,
        kind: PrimitiveKind,
        length: i64,
    ) -> Result<Vec<Value>, AccessError> {
        let bytes = self.array_byte_len(kind, length)?;
        self.check_bounds(0, bytes)?;
        let width = kind.width() as u64;
        let mut values = Vec::with_capacity(length as usize);
        for i in 0..length as u64 {
            values.push(self.decode(kind, self.address.wrapping_add(i * width)));
        }
        Ok(values)
    }

    /// Store a homogeneous sequence of values at consecutive slots starting
    /// at the base address. One combined bounds check up front; elements
    /// are coerced and written in index order. No rollback: a coercion
    /// failure on element k leaves elements 0..k written.
    pub fn write_array_of(&self, kind: PrimitiveKind, values: &Value) -> Result<&Self, AccessError> {
        let items = match values {
            Value::Array(items) => items,
            other => {
                return Err(AccessError::TypeMismatch {
                    expected: "array",
                    got: other.type_name().to_string(),
                })
            }
        };
        let bytes = self.array_byte_len(kind, items.len() as i64)?;
        self.check_bounds(0, bytes)?;
        let width = kind.width() as u64;
        for (i, value) in items.iter().enumerate() {
            self.encode(kind, self.address.wrapping_add(i as u64 * width), value)?;
        }
        Ok(self)
    }

    /// Array read at `base + offset`: delegates to the base-relative read
    /// through a derived handle.
    pub fn get_array_of(
        &self,
        kind: PrimitiveKind,
        offset: i64,
        length: i64,
    ) -> Result<Vec<Value>, AccessError> {
        self.check_bounds(offset, 0)?;
        self.at_offset(offset).read_array_of(kind, length)
    }

    /// Array write at `base + offset`: delegates to the base-relative write
    /// through a derived handle. Takes the offset explicitly, symmetric
    /// with [`get_array_of`](Self::get_array_of).
    pub fn put_array_of(
        &self,
        kind: PrimitiveKind,
        offset: i64,
        values: &Value,
    ) -> Result<&Self, AccessError> {
        self.check_bounds(offset, 0)?;
        self.at_offset(offset).write_array_of(kind, values)?;
        Ok(self)
    }

    /// Resolve an arbitrary value to a raw address for the pointer kind.
    ///
    /// Strategy order is part of the contract - the handle check runs
    /// before the integer check, since a handle may also be integer-like:
    /// handle, null sentinel, integer, `to_ptr` capability, then failure
    /// naming the value.
    fn pointer_value(&self, value: &Value) -> Result<u64, AccessError> {
        match value {
            Value::Pointer(p) => Ok(p.address()),
            Value::Null => Ok(0),
            Value::Integer(i) => Ok(*i as u64),
            Value::Struct(record) => Ok(record.to_ptr().address()),
            other => Err(AccessError::NotAPointer {
                value: other.to_string(),
            }),
        }
    }

    fn array_byte_len(&self, kind: PrimitiveKind, length: i64) -> Result<i64, AccessError> {
        if length < 0 {
            return Err(AccessError::OutOfBounds {
                offset: 0,
                len: length,
            });
        }
        length
            .checked_mul(kind.width() as i64)
            .ok_or(AccessError::OutOfBounds {
                offset: 0,
                len: length,
            })
    }

    fn load<const N: usize>(&self, address: u64) -> [u8; N] {
        let mut buf = [0u8; N];
        self.memory.load(address, &mut buf);
        buf
    }

    /// Decode one value of `kind` at an absolute address. Native byte
    /// order; integers widen into `i64` (unsigned 64-bit keeps its two's
    /// complement bit pattern), floats widen into `f64`, the pointer kind
    /// yields a derived unbounded handle over the same backend.
    fn decode(&self, kind: PrimitiveKind, address: u64) -> Value {
        match kind {
            PrimitiveKind::Int8 => Value::Integer(i8::from_ne_bytes(self.load(address)) as i64),
            PrimitiveKind::Uint8 => Value::Integer(u8::from_ne_bytes(self.load(address)) as i64),
            PrimitiveKind::Int16 => Value::Integer(i16::from_ne_bytes(self.load(address)) as i64),
            PrimitiveKind::Uint16 => Value::Integer(u16::from_ne_bytes(self.load(address)) as i64),
            PrimitiveKind::Int32 => Value::Integer(i32::from_ne_bytes(self.load(address)) as i64),
            PrimitiveKind::Uint32 => Value::Integer(u32::from_ne_bytes(self.load(address)) as i64),
            PrimitiveKind::Int64 => Value::Integer(i64::from_ne_bytes(self.load(address))),
            PrimitiveKind::Uint64 => {
                Value::Integer(u64::from_ne_bytes(self.load(address)) as i64)
            }
            PrimitiveKind::Float32 => Value::Float(f32::from_ne_bytes(self.load(address)) as f64),
            PrimitiveKind::Float64 => Value::Float(f64::from_ne_bytes(self.load(address))),
            PrimitiveKind::Pointer => Value::Pointer(Pointer::new(
                self.memory.clone(),
                u64::from_ne_bytes(self.load(address)),
            )),
        }
    }

    /// Coerce and store one value of `kind` at an absolute address.
    /// Integer stores truncate to the kind's declared width (two's
    /// complement); float32 narrows from `f64`.
    fn encode(&self, kind: PrimitiveKind, address: u64, value: &Value) -> Result<(), AccessError> {
        match kind {
            PrimitiveKind::Int8 | PrimitiveKind::Uint8 => {
                let v = coerce::integer(value)?;
                self.memory.store(address, &(v as u8).to_ne_bytes());
            }
            PrimitiveKind::Int16 | PrimitiveKind::Uint16 => {
                let v = coerce::integer(value)?;
                self.memory.store(address, &(v as u16).to_ne_bytes());
            }
            PrimitiveKind::Int32 | PrimitiveKind::Uint32 => {
                let v = coerce::integer(value)?;
                self.memory.store(address, &(v as u32).to_ne_bytes());
            }
            PrimitiveKind::Int64 | PrimitiveKind::Uint64 => {
                let v = coerce::integer(value)?;
                self.memory.store(address, &(v as u64).to_ne_bytes());
            }
            PrimitiveKind::Float32 => {
                let v = coerce::float(value)?;
                self.memory.store(address, &(v as f32).to_ne_bytes());
            }
            PrimitiveKind::Float64 => {
                let v = coerce::float(value)?;
                self.memory.store(address, &v.to_ne_bytes());
            }
            PrimitiveKind::Pointer => {
                let addr = self.pointer_value(value)?;
                self.memory.store(address, &addr.to_ne_bytes());
            }
        }
        Ok(())
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Pointer {}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Pointer address=0x{:x}>", self.address)
    }
}
