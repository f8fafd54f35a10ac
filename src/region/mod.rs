//! Region allocator - bump allocation with pooled recycling
//!
//! Design: Three-layer architecture for coarse-grained lifetimes:
//! 1. Bump allocation within a current block (fast path)
//! 2. Block rollover and oversized chunks (slow path)
//! 3. Pool-level recycling of blocks and whole regions (bulk reclamation)
//!
//! A region is a logical lifetime scope: many allocations, one clear.
//! Regions extend each other's lifetimes through parent references.

mod block;
mod handle;
mod pool;


pub use block::Block;
pub use handle::RegionHandle;
pub use pool::RegionPool;

use crate::logging::{debug, log_chunk_allocated};
use core::ptr::NonNull;

/// Bump-allocation slab size. Requests larger than this get a dedicated chunk.
pub const BLOCK_SIZE: usize = 64 * 1024;

/// A bump-allocation scope owning its blocks, oversized chunks, and outgoing
/// parent references.
///
/// Regions are constructed and recycled only through a [`RegionPool`]; user
/// code reaches them through [`RegionHandle`]s. The reference count lives
/// here, on the region, so any handle can adjust it without indirection.
pub struct Region {
    /// Non-owning back-reference to the owning pool. The pool outlives every
    /// region it created, so a raw pointer is sufficient.
    pool: *mut RegionPool,
    references: u32,
    block_offset: usize,
    current_block: Block,
    used_blocks: Vec<Block>,
    big_chunks: Vec<Block>,
    parents: Vec<RegionHandle>,
}

impl Region {
    /// Construct a region armed with one block from the pool
    ///
    /// Returns `None` on host allocation exhaustion, before any pool state
    /// besides the block cache is touched.
    fn new(pool: &mut RegionPool) -> Option<Box<Region>> {
        let current_block = pool.get_block()?;
        Some(Box::new(Region {
            pool: pool as *mut RegionPool,
            references: 0,
            block_offset: 0,
            current_block,
            used_blocks: Vec::new(),
            big_chunks: Vec::new(),
            parents: Vec::new(),
        }))
    }

    /// Advance the bump offset to the next multiple of `align`
    ///
    /// `align` must be a power of two no larger than [`BLOCK_SIZE`]. Overshoot
    /// of the current block is detected by the next allocation, not here.
    #[inline]
    pub fn align(&mut self, align: usize) {
        debug_assert!(align.is_power_of_two(), "alignment must be power of 2");
        self.block_offset = align_up(self.block_offset, align);
    }

    /// Reserve `n` bytes with no alignment constraint
    #[inline]
    pub fn allocate(&mut self, n: usize) -> Option<NonNull<u8>> {
        self.allocate_aligned(1, n)
    }

    /// Align to `align`, then reserve `n` bytes
    ///
    /// Returns `None` only on host allocation exhaustion; the region stays
    /// usable for smaller requests afterwards.
    #[inline]
    pub fn allocate_aligned(&mut self, align: usize, n: usize) -> Option<NonNull<u8>> {
        debug_assert!(align.is_power_of_two(), "alignment must be power of 2");

        if n > BLOCK_SIZE {
            return self.allocate_big_chunk(n);
        }

        let aligned = align_up(self.block_offset, align);
        if aligned + n <= BLOCK_SIZE {
            self.block_offset = aligned + n;
            NonNull::new(unsafe { self.current_block.base().add(aligned) })
        } else {
            self.allocate_new_block(n)
        }
    }

    /// Roll over to a fresh block and serve `n` bytes from its base
    fn allocate_new_block(&mut self, n: usize) -> Option<NonNull<u8>> {
        debug!(
            requested = n,
            used_blocks = self.used_blocks.len(),
            "Current block full, rolling to a new block"
        );

        // Acquire before retiring the current block: a failed request must
        // leave the region untouched.
        let block = unsafe { (*self.pool).get_block() }?;
        let old = core::mem::replace(&mut self.current_block, block);
        self.used_blocks.push(old);
        self.block_offset = n;
        NonNull::new(self.current_block.base())
    }

    /// Serve an oversized request from a dedicated chunk
    ///
    /// The current block and bump offset are untouched. Chunk base alignment
    /// is the host allocator's natural alignment.
    fn allocate_big_chunk(&mut self, n: usize) -> Option<NonNull<u8>> {
        let chunk = Block::chunk(n)?;
        let base = chunk.base();
        log_chunk_allocated(n, base);
        self.big_chunks.push(chunk);
        NonNull::new(base)
    }

    /// Bulk reclamation: reset the bump offset, return used blocks to the
    /// pool's block cache, free oversized chunks, and release parents.
    ///
    /// The current block is kept, so the region stays armed for its next
    /// user. Dropping parent handles may cascade further clears; each of
    /// those runs iteratively inside the handle release protocol.
    pub fn clear(&mut self) {
        self.block_offset = 0;
        unsafe { (*self.pool).reclaim_blocks(&mut self.used_blocks) };
        self.big_chunks.clear();
        self.parents.clear();
    }

    /// Acquire a sibling region from the owning pool
    pub fn get_region(&self) -> Option<RegionHandle> {
        unsafe { (*self.pool).get_region() }
    }

    /// Declare that holders of this region's memory may also touch `other`'s
    pub fn add_reference_to(&mut self, other: RegionHandle) {
        self.parents.push(other);
    }

    /// Number of parent slots, including null ones
    pub fn num_parents(&self) -> usize {
        self.parents.len()
    }

    /// Resize the parent slots to exactly `n`, padding with nulls
    pub fn set_num_parents(&mut self, n: usize) {
        self.parents.resize_with(n, RegionHandle::null);
    }

    /// Store `other` at parent slot `i`, releasing the previous occupant
    pub fn set_parent_reference(&mut self, other: RegionHandle, i: usize) {
        self.parents[i] = other;
    }

    /// Copy of the handle at parent slot `i` (possibly null)
    pub fn get_parent_reference(&self, i: usize) -> RegionHandle {
        self.parents[i].clone()
    }

    /// Acquire a fresh region, store it at slot `i`, and return it
    pub fn new_parent_reference(&mut self, i: usize) -> Option<RegionHandle> {
        let handle = self.get_region()?;
        self.parents[i] = handle.clone();
        Some(handle)
    }

    /// Null out parent slot `i`, releasing the previous occupant
    pub fn clear_parent_reference(&mut self, i: usize) {
        self.parents[i] = RegionHandle::null();
    }
}

/// Align offset upward to the next multiple of alignment
///
/// Uses bit manipulation for branch-free execution:
/// - Add (align - 1) to round up
/// - Mask with !(align - 1) to align down
#[inline(always)]
const fn align_up(offset: usize, align: usize) -> usize {
    (offset.wrapping_add(align).wrapping_sub(1)) & !align.wrapping_sub(1)
}
