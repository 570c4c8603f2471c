//! Shared helpers for ferrule-memory integration tests

use ferrule_memory::{BufferMemory, Pointer};
use std::sync::Arc;

/// An owned region with a handle over its full extent. The backend is
/// returned too, for byte-level assertions against the stored contents.
pub fn region(len: usize) -> (Arc<BufferMemory>, Pointer) {
    let memory = Arc::new(BufferMemory::new(len));
    let pointer = Pointer::with_extent(memory.clone(), 0, len as u64);
    (memory, pointer)
}
