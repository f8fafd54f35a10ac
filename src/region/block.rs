//! Block management - host memory acquisition
//!
//! Design: Blocks are plain owned byte buffers with no header; all bookkeeping
//! lives in the region and pool that own them. Contents are never zeroed.

use crate::logging::{log_block_allocated, trace, warn};
use std::alloc::{alloc, dealloc, Layout};

use super::BLOCK_SIZE;

/// Natural alignment of every block and chunk base address.
pub(super) const BLOCK_ALIGN: usize = 16;

/// An owned contiguous byte buffer, either a standard bump-allocation slab
/// of `BLOCK_SIZE` bytes or a dedicated oversized chunk.
pub struct Block {
    start: *mut u8,
    layout: Layout,
}

impl Block {
    /// Allocate a standard slab from the host
    ///
    /// Returns `None` on host allocation exhaustion.
    pub fn new() -> Option<Self> {
        Self::with_size(BLOCK_SIZE)
    }

    /// Allocate a dedicated chunk for a single oversized request
    pub fn chunk(size: usize) -> Option<Self> {
        debug_assert!(size > BLOCK_SIZE, "chunks are for oversized requests");
        Self::with_size(size)
    }

    fn with_size(size: usize) -> Option<Self> {
        let layout = Layout::from_size_align(size, BLOCK_ALIGN).ok()?;

        trace!(size_bytes = size, "Requesting block from host");

        let start = unsafe { alloc(layout) };
        if start.is_null() {
            warn!(size_bytes = size, "Failed to allocate block from host");
            return None;
        }

        log_block_allocated(size, start);

        Some(Self { start, layout })
    }

    /// Base address of the buffer
    #[inline]
    pub fn base(&self) -> *mut u8 {
        self.start
    }

    /// Buffer size in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        trace!(
            address = ?self.start,
            size_bytes = self.layout.size(),
            "Releasing block"
        );
        unsafe {
            dealloc(self.start, self.layout);
        }
    }
}
