//! Regionpool - region-based allocation runtime for host language runtimes
//!
//! This crate provides the native allocation core statically linked into a
//! managed host runtime: bump-pointer regions, a pool recycling blocks and
//! regions, and reference-counted region handles.

#![allow(dead_code)]

pub mod ffi;
pub mod logging;
pub mod region;

// Re-export core types
pub use region::{Block, Region, RegionHandle, RegionPool, BLOCK_SIZE};

// Re-export logging for convenience
pub use logging::{
    init_runtime_logging, log_block_allocated, log_block_recycled, log_chunk_allocated,
    log_pool_adopted, log_pool_created, log_region_created, log_region_recycled,
    log_runtime_init, log_runtime_shutdown,
};

/// Runtime initialization
#[no_mangle]
pub extern "C" fn regionpool_runtime_init() {
    // Initialize logging first
    init_runtime_logging();
    log_runtime_init();
}

/// Runtime cleanup
#[no_mangle]
pub extern "C" fn regionpool_runtime_cleanup() {
    log_runtime_shutdown();
}
