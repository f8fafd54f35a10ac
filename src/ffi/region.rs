//! Region slot operations - C API for allocation and lifetime management
//!
//! A slot is a heap cell holding a nullable region handle; the host passes
//! slot pointers across the boundary and never sees handles directly. Every
//! entry point is null-safe: a null slot or an empty handle is a no-op, and
//! allocation failures surface as null addresses.

use crate::region::{Region, RegionHandle, RegionPool};

/// Heap cell holding a nullable region handle
pub struct RegionSlot {
    handle: RegionHandle,
}

/// Resolve a slot pointer to its live region, if any (internal helper)
#[inline(always)]
unsafe fn region_of<'a>(slot: *mut RegionSlot) -> Option<&'a mut Region> {
    if slot.is_null() {
        return None;
    }
    (*slot).handle.region_mut()
}

/// Acquire a region from `pool` into a fresh slot
///
/// # Safety
/// - Returns null if `pool` is null or the host allocator is exhausted
/// - The slot must be released with `regionpool_region_destroy`
#[no_mangle]
pub extern "C" fn regionpool_region_new(pool: *mut RegionPool) -> *mut RegionSlot {
    if pool.is_null() {
        return core::ptr::null_mut();
    }
    match unsafe { &mut *pool }.get_region() {
        Some(handle) => Box::into_raw(Box::new(RegionSlot { handle })),
        None => core::ptr::null_mut(),
    }
}

/// Construct a slot containing a null handle, to be populated later
#[no_mangle]
pub extern "C" fn regionpool_region_new_empty() -> *mut RegionSlot {
    Box::into_raw(Box::new(RegionSlot {
        handle: RegionHandle::null(),
    }))
}

/// Release the slot's handle and free the slot storage
///
/// # Safety
/// - Null-safe (no-op for null pointers)
#[no_mangle]
pub extern "C" fn regionpool_region_destroy(slot: *mut RegionSlot) {
    if slot.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(slot) });
}

/// Null the slot, releasing its handle; the slot itself stays usable
#[no_mangle]
pub extern "C" fn regionpool_region_drop(slot: *mut RegionSlot) {
    if slot.is_null() {
        return;
    }
    unsafe {
        (*slot).handle = RegionHandle::null();
    }
}

/// Clear the slot's region in place, keeping the handle and its memory armed
#[no_mangle]
pub extern "C" fn regionpool_region_clear(slot: *mut RegionSlot) {
    if let Some(region) = unsafe { region_of(slot) } {
        region.clear();
    }
}

/// Release the slot's handle and acquire a fresh region from the same pool
#[no_mangle]
pub extern "C" fn regionpool_region_refresh(slot: *mut RegionSlot) {
    if slot.is_null() {
        return;
    }
    unsafe {
        // Acquire before releasing: handle assignment increments the new
        // target first, then decrements the old.
        if let Some(fresh) = (*slot).handle.region().and_then(|r| r.get_region()) {
            (*slot).handle = fresh;
        }
    }
}

/// Advance the region's bump offset to the next multiple of `align`
///
/// # Safety
/// - `align` must be a power of two
#[no_mangle]
pub extern "C" fn regionpool_region_align(slot: *mut RegionSlot, align: usize) {
    if let Some(region) = unsafe { region_of(slot) } {
        region.align(align);
    }
}

/// Aligned allocation; returns the raw address or null
///
/// # Safety
/// - `align` must be a power of two
/// - The address is valid until the region next clears or its last handle drops
#[no_mangle]
pub extern "C" fn regionpool_region_align_allocate(
    slot: *mut RegionSlot,
    align: usize,
    n: usize,
) -> *mut u8 {
    match unsafe { region_of(slot) } {
        Some(region) => region
            .allocate_aligned(align, n)
            .map_or(core::ptr::null_mut(), |p| p.as_ptr()),
        None => core::ptr::null_mut(),
    }
}

/// Unaligned allocation; returns the raw address or null
#[no_mangle]
pub extern "C" fn regionpool_region_allocate(slot: *mut RegionSlot, n: usize) -> *mut u8 {
    match unsafe { region_of(slot) } {
        Some(region) => region
            .allocate(n)
            .map_or(core::ptr::null_mut(), |p| p.as_ptr()),
        None => core::ptr::null_mut(),
    }
}

/// Append `other`'s handle to the slot region's parent references
#[no_mangle]
pub extern "C" fn regionpool_region_add_reference(slot: *mut RegionSlot, other: *const RegionSlot) {
    if other.is_null() {
        return;
    }
    let parent = unsafe { (*other).handle.clone() };
    if let Some(region) = unsafe { region_of(slot) } {
        region.add_reference_to(parent);
    }
}

/// Number of parent slots, including null ones
///
/// # Safety
/// - Returns 0 for null or empty slots
#[no_mangle]
pub extern "C" fn regionpool_region_num_parents(slot: *mut RegionSlot) -> usize {
    match unsafe { region_of(slot) } {
        Some(region) => region.num_parents(),
        None => 0,
    }
}

/// Resize the parent slots to exactly `n`, padding with nulls
#[no_mangle]
pub extern "C" fn regionpool_region_set_num_parents(slot: *mut RegionSlot, n: usize) {
    if let Some(region) = unsafe { region_of(slot) } {
        region.set_num_parents(n);
    }
}

/// Store `other`'s handle at parent index `i`
///
/// # Safety
/// - `i` must be within the parent slots
#[no_mangle]
pub extern "C" fn regionpool_region_set_parent(
    slot: *mut RegionSlot,
    other: *const RegionSlot,
    i: usize,
) {
    if other.is_null() {
        return;
    }
    let parent = unsafe { (*other).handle.clone() };
    if let Some(region) = unsafe { region_of(slot) } {
        region.set_parent_reference(parent, i);
    }
}

/// Copy parent `i` into `dest`; a null parent auto-creates a fresh region
///
/// # Safety
/// - `i` must be within the parent slots
/// - `dest`'s previous handle is released
#[no_mangle]
pub extern "C" fn regionpool_region_get_parent_into(
    slot: *mut RegionSlot,
    dest: *mut RegionSlot,
    i: usize,
) {
    if dest.is_null() {
        return;
    }
    let region = match unsafe { region_of(slot) } {
        Some(region) => region,
        None => return,
    };

    let mut parent = region.get_parent_reference(i);
    if parent.is_null() {
        parent = match region.new_parent_reference(i) {
            Some(handle) => handle,
            None => RegionHandle::null(),
        };
    }
    unsafe {
        (*dest).handle = parent;
    }
}

/// Null out parent index `i`, releasing the previous occupant
///
/// # Safety
/// - `i` must be within the parent slots
#[no_mangle]
pub extern "C" fn regionpool_region_clear_parent(slot: *mut RegionSlot, i: usize) {
    if let Some(region) = unsafe { region_of(slot) } {
        region.clear_parent_reference(i);
    }
}
