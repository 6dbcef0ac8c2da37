#![allow(non_snake_case)]

//! Vendor camera stand-in exporting the full entry-point contract.

use serde::Deserialize;
use std::os::raw::{c_int, c_void};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, OnceLock};

const SUCCESS: i16 = 0;
const FAILURE: i16 = -1;

const SET_FPS: c_int = 1;
const SET_RESOLUTION: c_int = 2;

#[derive(Deserialize, Debug)]
#[serde(default)]
struct Config {
    cameras: u32,
    max_zoom: i16,
    zoom_supported: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cameras: 2,
            max_zoom: 10,
            zoom_supported: true,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct Resolution {
    width: c_int,
    height: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union CameraParams {
    fps: c_int,
    camera_resolution: Resolution,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct CameraParamContainer {
    kind: c_int,
    params: CameraParams,
}

static CONFIG: OnceLock<Config> = OnceLock::new();
static OPEN: AtomicBool = AtomicBool::new(false);
static PREVIEWING: AtomicBool = AtomicBool::new(false);
static RECORDING: AtomicBool = AtomicBool::new(false);
static ZOOM: AtomicU32 = AtomicU32::new(0);
static PARAMS: Mutex<CameraParams> = Mutex::new(CameraParams {
    camera_resolution: Resolution {
        width: 0,
        height: 0,
    },
});

/// Defaults, overridden by the TOML file named in `FAKE_IMSCAMERA_CONFIG`.
fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        std::env::var("FAKE_IMSCAMERA_CONFIG")
            .ok()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    })
}

fn is_open() -> bool {
    OPEN.load(Ordering::SeqCst)
}

#[unsafe(no_mangle)]
pub extern "C" fn cameraOpen(camera_id: u32) -> i16 {
    if camera_id >= config().cameras {
        return FAILURE;
    }
    OPEN.store(true, Ordering::SeqCst);
    SUCCESS
}

#[unsafe(no_mangle)]
pub extern "C" fn cameraRelease() -> i16 {
    PREVIEWING.store(false, Ordering::SeqCst);
    RECORDING.store(false, Ordering::SeqCst);
    OPEN.store(false, Ordering::SeqCst);
    SUCCESS
}

#[unsafe(no_mangle)]
pub extern "C" fn startCameraPreview() -> i16 {
    if !is_open() {
        return FAILURE;
    }
    PREVIEWING.store(true, Ordering::SeqCst);
    SUCCESS
}

/// Refused while recording, since recording feeds off the preview stream.
#[unsafe(no_mangle)]
pub extern "C" fn stopCameraPreview() -> i16 {
    if !is_open() || RECORDING.load(Ordering::SeqCst) {
        return FAILURE;
    }
    PREVIEWING.store(false, Ordering::SeqCst);
    SUCCESS
}

#[unsafe(no_mangle)]
pub extern "C" fn startCameraRecording() -> i16 {
    if !is_open() || !PREVIEWING.load(Ordering::SeqCst) {
        return FAILURE;
    }
    RECORDING.store(true, Ordering::SeqCst);
    SUCCESS
}

#[unsafe(no_mangle)]
pub extern "C" fn stopCameraRecording() -> i16 {
    if !RECORDING.swap(false, Ordering::SeqCst) {
        return FAILURE;
    }
    SUCCESS
}

#[unsafe(no_mangle)]
pub extern "C" fn setCameraParameter(container: CameraParamContainer) -> i16 {
    match container.kind {
        SET_FPS | SET_RESOLUTION => {
            let mut params = PARAMS.lock().unwrap_or_else(|e| e.into_inner());
            if container.kind == SET_FPS {
                // SAFETY: SET_FPS promises the `fps` member is populated.
                params.fps = unsafe { container.params.fps };
            } else {
                *params = container.params;
            }
            SUCCESS
        }
        _ => FAILURE,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn getCameraParameter(_query: *mut c_void) -> CameraParams {
    *PARAMS.lock().unwrap_or_else(|e| e.into_inner())
}

#[unsafe(no_mangle)]
pub extern "C" fn setNearEndSurface(_env: *mut c_void, surface: *mut c_void) -> i16 {
    if surface.is_null() {
        return FAILURE;
    }
    SUCCESS
}

#[unsafe(no_mangle)]
pub extern "C" fn setPreviewDisplayOrientation(rotation: u32) -> i16 {
    if rotation % 90 != 0 {
        return FAILURE;
    }
    SUCCESS
}

#[unsafe(no_mangle)]
pub extern "C" fn getMaxZoom() -> i16 {
    config().max_zoom
}

#[unsafe(no_mangle)]
pub extern "C" fn isZoomSupported() -> bool {
    config().zoom_supported
}

#[unsafe(no_mangle)]
pub extern "C" fn setZoom(zoom: u32) {
    let max = u32::try_from(config().max_zoom).unwrap_or(0);
    ZOOM.store(zoom.min(max), Ordering::SeqCst);
}

/// Inspection hook outside the camera contract: the zoom step last applied.
#[unsafe(no_mangle)]
pub extern "C" fn fakeCameraCurrentZoom() -> u32 {
    ZOOM.load(Ordering::SeqCst)
}
