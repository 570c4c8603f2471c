//! Raw memory backends - byte-level load/store at absolute addresses
//!
//! The accessor never touches memory directly; it delegates to an injected
//! [`RawMemory`] collaborator. The backend contract is byte-precise and
//! alignment-tolerant, and it does NOT report recoverable errors: touching
//! an address the backing store does not own is a hard fault (a panic, or
//! for [`NativeMemory`] whatever the OS does to the process). The accessor
//! only prevents known-bad offsets relative to a handle's declared extent.
//!
//! # Safety
//!
//! All `unsafe` raw-pointer access is isolated in this module behind the
//! safe `RawMemory` surface.

use std::fmt;
use std::sync::Mutex;

/// Byte-precise load/store into an address space.
///
/// Implementations must tolerate unaligned addresses. Faults are fatal by
/// contract; neither method returns a `Result`.
pub trait RawMemory: fmt::Debug + Send + Sync {
    /// Copy `out.len()` bytes starting at `address` into `out`.
    fn load(&self, address: u64, out: &mut [u8]);

    /// Copy `bytes` into the address space starting at `address`.
    fn store(&self, address: u64, bytes: &[u8]);
}

/// The process's own address space, addressed by raw pointer value.
///
/// # Safety
///
/// `load` and `store` perform unaligned copies at the given address. The
/// caller-side contract is that every address handed to a [`Pointer`] over
/// this backend refers to live, appropriately sized memory; there is no
/// detection here, only the bounds checking the owning handle performs
/// against its declared extent.
///
/// [`Pointer`]: crate::pointer::Pointer
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeMemory;

impl RawMemory for NativeMemory {
    fn load(&self, address: u64, out: &mut [u8]) {
        unsafe {
            std::ptr::copy_nonoverlapping(address as usize as *const u8, out.as_mut_ptr(), out.len());
        }
    }

    fn store(&self, address: u64, bytes: &[u8]) {
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), address as usize as *mut u8, bytes.len());
        }
    }
}

/// An owned, zero-based byte region.
///
/// Addresses index into the buffer directly (address 0 is the first byte).
/// Access past the end of the region panics, simulating the hard fault a
/// foreign backend would raise - which makes this the deterministic test
/// double for fault behavior, as well as a real backend for script-owned
/// buffers.
pub struct BufferMemory {
    bytes: Mutex<Vec<u8>>,
}

impl BufferMemory {
    /// A zero-filled region of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: Mutex::new(vec![0; len]),
        }
    }

    /// A region initialized with the given bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(bytes.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().expect("BufferMemory lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current region contents. Used by tests asserting
    /// byte-identical stores.
    pub fn snapshot(&self) -> Vec<u8> {
        self.bytes.lock().expect("BufferMemory lock poisoned").clone()
    }
}

impl RawMemory for BufferMemory {
    fn load(&self, address: u64, out: &mut [u8]) {
        let bytes = self.bytes.lock().expect("BufferMemory lock poisoned");
        let start = address as usize;
        let end = start
            .checked_add(out.len())
            .filter(|end| *end <= bytes.len())
            .unwrap_or_else(|| panic!("raw memory fault: load of {} bytes at address {}", out.len(), address));
        out.copy_from_slice(&bytes[start..end]);
    }

    fn store(&self, address: u64, data: &[u8]) {
        let mut bytes = self.bytes.lock().expect("BufferMemory lock poisoned");
        let start = address as usize;
        let end = start
            .checked_add(data.len())
            .filter(|end| *end <= bytes.len())
            .unwrap_or_else(|| panic!("raw memory fault: store of {} bytes at address {}", data.len(), address));
        bytes[start..end].copy_from_slice(data);
    }
}

impl fmt::Debug for BufferMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BufferMemory(len={})", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_round_trip() {
        let mem = BufferMemory::new(8);
        mem.store(2, &[0xAA, 0xBB, 0xCC]);
        let mut out = [0u8; 3];
        mem.load(2, &mut out);
        assert_eq!(out, [0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_buffer_from_bytes_snapshot() {
        let mem = BufferMemory::from_bytes(vec![1, 2, 3]);
        assert_eq!(mem.len(), 3);
        assert_eq!(mem.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "raw memory fault")]
    fn test_buffer_load_fault() {
        let mem = BufferMemory::new(4);
        let mut out = [0u8; 8];
        mem.load(0, &mut out);
    }

    #[test]
    #[should_panic(expected = "raw memory fault")]
    fn test_buffer_store_fault() {
        let mem = BufferMemory::new(4);
        mem.store(3, &[0, 0]);
    }

    #[test]
    fn test_native_memory_over_local_buffer() {
        let data: [u8; 4] = [9, 8, 7, 6];
        let mem = NativeMemory;
        let mut out = [0u8; 4];
        mem.load(data.as_ptr() as usize as u64, &mut out);
        assert_eq!(out, data);

        let mut target = [0u8; 2];
        mem.store(target.as_mut_ptr() as usize as u64, &[5, 4]);
        assert_eq!(target, [5, 4]);
    }
}
