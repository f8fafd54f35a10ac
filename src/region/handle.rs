//! Reference-counted region handle
//!
//! Design: Minimal overhead smart reference with:
//! - Zero-cost cloning (just inc refcount)
//! - Deterministic recycling on last release
//! - Nullable, so parent slots can hold empty positions
//!
//! The count lives on the region, not the handle, so any copy can adjust it
//! without indirection. One pool and everything under it is single-threaded
//! by contract; the raw-pointer field keeps handles `!Send` and `!Sync`.

use crate::logging::trace;
use core::ptr::NonNull;

use super::Region;

/// A handle to a [`Region`](super::Region), or null.
///
/// Cloning increments the region's reference count; dropping decrements it.
/// When the last handle drops, the region clears and returns itself to its
/// pool's free list.
pub struct RegionHandle {
    region: Option<NonNull<Region>>,
}

impl RegionHandle {
    /// Create a handle to `region`, incrementing its reference count
    #[inline]
    pub(super) fn new(region: NonNull<Region>) -> Self {
        unsafe {
            let r = region.as_ptr();
            debug_assert!((*r).references < u32::MAX, "refcount overflow");
            (*r).references += 1;
            trace!(event = "handle_new", address = ?r, count = (*r).references);
        }
        Self {
            region: Some(region),
        }
    }

    /// The null handle
    #[inline]
    pub const fn null() -> Self {
        Self { region: None }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.region.is_none()
    }

    /// Borrow the referenced region, if any
    #[inline]
    pub fn region(&self) -> Option<&Region> {
        self.region.map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// Mutably borrow the referenced region, if any
    #[inline]
    pub fn region_mut(&mut self) -> Option<&mut Region> {
        self.region.map(|ptr| unsafe { &mut *ptr.as_ptr() })
    }

    /// Current reference count of the target region (for debugging/testing)
    #[inline]
    pub fn ref_count(&self) -> u32 {
        self.region
            .map(|ptr| unsafe { (*ptr.as_ptr()).references })
            .unwrap_or(0)
    }

    /// Consume the handle without decrementing, returning the raw target
    #[inline]
    pub(super) fn into_raw(self) -> Option<NonNull<Region>> {
        let ptr = self.region;
        core::mem::forget(self);
        ptr
    }
}

impl Clone for RegionHandle {
    #[inline]
    fn clone(&self) -> Self {
        if let Some(ptr) = self.region {
            unsafe {
                debug_assert!((*ptr.as_ptr()).references < u32::MAX, "refcount overflow");
                (*ptr.as_ptr()).references += 1;
            }
        }
        Self {
            region: self.region,
        }
    }
}

impl Drop for RegionHandle {
    #[inline]
    fn drop(&mut self) {
        if let Some(ptr) = self.region.take() {
            unsafe { release(ptr) };
        }
    }
}

/// Last-release protocol (cold path)
///
/// Decrements the target's count; a count of zero clears the region and
/// pushes it on its pool's free list. Parent handles released by the clear
/// are fed back into the worklist rather than dropped, so arbitrarily deep
/// cascades run in constant stack space.
#[cold]
unsafe fn release(start: NonNull<Region>) {
    let mut pending = vec![start];

    while let Some(ptr) = pending.pop() {
        let region = ptr.as_ptr();
        debug_assert!((*region).references > 0, "refcount underflow");
        (*region).references -= 1;

        trace!(event = "handle_release", address = ?region, count = (*region).references);

        if (*region).references != 0 {
            continue;
        }

        (*region).block_offset = 0;
        let pool = (*region).pool;
        (*pool).reclaim_blocks(&mut (*region).used_blocks);
        (*region).big_chunks.clear();
        for parent in (*region).parents.drain(..) {
            if let Some(target) = parent.into_raw() {
                pending.push(target);
            }
        }
        (*pool).retire_region(ptr);
    }
}
