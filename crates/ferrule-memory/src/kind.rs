//! Primitive kind registry - the fixed-width types the accessor supports
//!
//! Every typed access names one of these kinds. Width and value domain are
//! fixed per kind and never inferred at call time: the caller selects the
//! kind, the kind dictates the byte count and the decode/encode rule.
//!
//! Kind names come in alias groups inherited from the C naming tradition
//! (`char`/`int8`, `long`/`long_long`/`int64`, ...). `from_name` resolves
//! every synonym to the same variant, so aliased operations are identical
//! by construction.

use serde::{Deserialize, Serialize};

/// A fixed-width primitive type addressable through a [`Pointer`].
///
/// [`Pointer`]: crate::pointer::Pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Signed 8-bit integer (`char`)
    Int8,
    /// Unsigned 8-bit integer (`uchar`)
    Uint8,
    /// Signed 16-bit integer (`short`)
    Int16,
    /// Unsigned 16-bit integer (`ushort`)
    Uint16,
    /// Signed 32-bit integer (`int`)
    Int32,
    /// Unsigned 32-bit integer (`uint`)
    Uint32,
    /// Signed 64-bit integer (`long`, `long_long`)
    Int64,
    /// Unsigned 64-bit integer (`ulong`, `ulong_long`)
    Uint64,
    /// IEEE-754 binary32 (`float`)
    Float32,
    /// IEEE-754 binary64 (`double`)
    Float64,
    /// Opaque native-width address (8 bytes, no arithmetic semantics)
    Pointer,
}

impl PrimitiveKind {
    /// Every kind, in declaration order. Used by the dispatch registry and
    /// by table-driven tests.
    pub const ALL: [PrimitiveKind; 11] = [
        PrimitiveKind::Int8,
        PrimitiveKind::Uint8,
        PrimitiveKind::Int16,
        PrimitiveKind::Uint16,
        PrimitiveKind::Int32,
        PrimitiveKind::Uint32,
        PrimitiveKind::Int64,
        PrimitiveKind::Uint64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::Pointer,
    ];

    /// Byte width of one value of this kind.
    pub fn width(self) -> usize {
        match self {
            PrimitiveKind::Int8 | PrimitiveKind::Uint8 => 1,
            PrimitiveKind::Int16 | PrimitiveKind::Uint16 => 2,
            PrimitiveKind::Int32 | PrimitiveKind::Uint32 | PrimitiveKind::Float32 => 4,
            PrimitiveKind::Int64 | PrimitiveKind::Uint64 | PrimitiveKind::Float64 => 8,
            PrimitiveKind::Pointer => 8,
        }
    }

    /// Canonical lowercase name (`"int8"`, ..., `"pointer"`).
    pub fn display_name(self) -> &'static str {
        match self {
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Uint32 => "uint32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Pointer => "pointer",
        }
    }

    /// C-tradition synonyms for this kind. Empty for `pointer`.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            PrimitiveKind::Int8 => &["char"],
            PrimitiveKind::Uint8 => &["uchar"],
            PrimitiveKind::Int16 => &["short"],
            PrimitiveKind::Uint16 => &["ushort"],
            PrimitiveKind::Int32 => &["int"],
            PrimitiveKind::Uint32 => &["uint"],
            PrimitiveKind::Int64 => &["long", "long_long"],
            PrimitiveKind::Uint64 => &["ulong", "ulong_long"],
            PrimitiveKind::Float32 => &["float"],
            PrimitiveKind::Float64 => &["double"],
            PrimitiveKind::Pointer => &[],
        }
    }

    /// Resolve a canonical name or any alias to its kind.
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        match name {
            "int8" | "char" => Some(PrimitiveKind::Int8),
            "uint8" | "uchar" => Some(PrimitiveKind::Uint8),
            "int16" | "short" => Some(PrimitiveKind::Int16),
            "uint16" | "ushort" => Some(PrimitiveKind::Uint16),
            "int32" | "int" => Some(PrimitiveKind::Int32),
            "uint32" | "uint" => Some(PrimitiveKind::Uint32),
            "int64" | "long" | "long_long" => Some(PrimitiveKind::Int64),
            "uint64" | "ulong" | "ulong_long" => Some(PrimitiveKind::Uint64),
            "float32" | "float" => Some(PrimitiveKind::Float32),
            "float64" | "double" => Some(PrimitiveKind::Float64),
            "pointer" => Some(PrimitiveKind::Pointer),
            _ => None,
        }
    }

    /// True for the signed integer kinds.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8 | PrimitiveKind::Int16 | PrimitiveKind::Int32 | PrimitiveKind::Int64
        )
    }

    /// True for any integer kind, signed or unsigned.
    pub fn is_integer(self) -> bool {
        !matches!(
            self,
            PrimitiveKind::Float32 | PrimitiveKind::Float64 | PrimitiveKind::Pointer
        )
    }

    /// True for the IEEE-754 kinds.
    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::Float32 | PrimitiveKind::Float64)
    }
}
