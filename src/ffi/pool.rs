//! Pool operations - C API for pool lifecycle and diagnostics

use crate::region::RegionPool;

/// Construct a pool
///
/// The returned pointer is owned by the caller and must be released with
/// `regionpool_pool_destroy` (or consumed by `regionpool_pool_own`).
#[no_mangle]
pub extern "C" fn regionpool_pool_new() -> *mut RegionPool {
    Box::into_raw(RegionPool::new())
}

/// Destroy a pool, reclaiming all its regions, blocks, and chunks
///
/// # Safety
/// - Null-safe (no-op for null pointers)
/// - Every handle and address derived from the pool must already be dead
#[no_mangle]
pub extern "C" fn regionpool_pool_destroy(pool: *mut RegionPool) {
    if pool.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(pool) });
}

/// Total number of regions ever created under the pool
///
/// # Safety
/// - Returns 0 for null pointers
#[no_mangle]
pub extern "C" fn regionpool_pool_num_regions(pool: *const RegionPool) -> usize {
    if pool.is_null() {
        return 0;
    }
    unsafe { (*pool).num_regions() }
}

/// Number of cleared regions currently idle in the pool
///
/// # Safety
/// - Returns 0 for null pointers
#[no_mangle]
pub extern "C" fn regionpool_pool_num_free_regions(pool: *const RegionPool) -> usize {
    if pool.is_null() {
        return 0;
    }
    unsafe { (*pool).num_free_regions() }
}

/// Number of blocks in the pool's recycling cache
///
/// # Safety
/// - Returns 0 for null pointers
#[no_mangle]
pub extern "C" fn regionpool_pool_num_free_blocks(pool: *const RegionPool) -> usize {
    if pool.is_null() {
        return 0;
    }
    unsafe { (*pool).num_free_blocks() }
}

/// Migrate every live region out of `other` into `pool`, then destroy `other`
///
/// Handles to migrated regions stay valid and route to `pool` on release.
///
/// # Safety
/// - No-op if either pointer is null or both name the same pool
/// - `other` is consumed and must not be used afterwards
#[no_mangle]
pub extern "C" fn regionpool_pool_own(pool: *mut RegionPool, other: *mut RegionPool) {
    if pool.is_null() || other.is_null() || core::ptr::eq(pool, other) {
        return;
    }
    let other = unsafe { Box::from_raw(other) };
    unsafe { &mut *pool }.own(other);
}
