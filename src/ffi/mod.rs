//! C FFI - Stable ABI for the host runtime
//!
//! Design: Zero-overhead C bindings with:
//! 1. Pool lifecycle (construct, counters, ownership transfer, destroy)
//! 2. Region slots - nullable handle cells passed across the boundary
//! 3. Raw-address allocation primitives
//! 4. Error propagation via null pointers

mod pool;
mod region;


pub use pool::{
    regionpool_pool_destroy, regionpool_pool_new, regionpool_pool_num_free_blocks,
    regionpool_pool_num_free_regions, regionpool_pool_num_regions, regionpool_pool_own,
};
pub use region::{
    regionpool_region_add_reference, regionpool_region_align, regionpool_region_align_allocate,
    regionpool_region_allocate, regionpool_region_clear, regionpool_region_clear_parent,
    regionpool_region_destroy, regionpool_region_drop, regionpool_region_get_parent_into,
    regionpool_region_new, regionpool_region_new_empty, regionpool_region_num_parents,
    regionpool_region_refresh, regionpool_region_set_num_parents, regionpool_region_set_parent,
    RegionSlot,
};

use crate::logging::{debug, info};

/// Initialize FFI subsystem (called once at program start)
#[no_mangle]
pub extern "C" fn regionpool_ffi_init() {
    info!("FFI subsystem initializing");
    debug!("FFI ready for host interop");
}

/// Cleanup FFI subsystem (called at program exit)
#[no_mangle]
pub extern "C" fn regionpool_ffi_cleanup() {
    debug!("Cleaning up FFI subsystem");
}
