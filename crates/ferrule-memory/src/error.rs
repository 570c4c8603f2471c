//! Accessor failure taxonomy
//!
//! Every failure is surfaced synchronously to the immediate caller; nothing
//! is retried or clamped. Hard faults in the raw backend (touching memory
//! the process does not own) are deliberately NOT represented here - they
//! are unrecoverable backend failures, not accessor errors.

use thiserror::Error;

/// Errors produced by typed memory access operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The access would leave the handle's validated extent. Also covers
    /// negative offsets and negative array lengths.
    #[error("Memory access offset={offset} size={len} is out of bounds")]
    OutOfBounds { offset: i64, len: i64 },

    /// A write or coercion received a value outside the operation's domain
    /// (non-numeric scalar, or a non-array where an array is required).
    #[error("no implicit conversion of {got} into {expected}")]
    TypeMismatch { expected: &'static str, got: String },

    /// Pointer-value resolution exhausted every strategy. Carries a display
    /// rendering of the offending value for diagnosability.
    #[error("{value} is not a pointer")]
    NotAPointer { value: String },

    /// The named operation is not part of the accessor surface.
    #[error("unknown accessor operation: {name}")]
    UnknownOperation { name: String },

    /// The named operation was called with the wrong number of arguments.
    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
}
