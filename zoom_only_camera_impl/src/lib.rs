#![allow(non_snake_case)]

//! Vendor camera stand-in exporting only `cameraOpen` and `setZoom` of the
//! camera contract.

use std::sync::atomic::{AtomicU32, Ordering};

static ZOOM: AtomicU32 = AtomicU32::new(0);

/// Echoes the requested id so callers can check what was forwarded.
#[unsafe(no_mangle)]
pub extern "C" fn cameraOpen(camera_id: u32) -> i16 {
    camera_id as i16
}

#[unsafe(no_mangle)]
pub extern "C" fn setZoom(zoom: u32) {
    ZOOM.store(zoom, Ordering::SeqCst);
}

/// Inspection hook outside the camera contract: the zoom step last applied.
#[unsafe(no_mangle)]
pub extern "C" fn zoomOnlyCurrentZoom() -> u32 {
    ZOOM.load(Ordering::SeqCst)
}
