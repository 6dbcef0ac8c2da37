use std::fmt;

use jni::sys::{JNIEnv, jobject};

use crate::params::{CameraParam, RawCameraParams};

/// The fixed set of symbols a vendor camera library may export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `int16_t cameraOpen(uint32_t)`
    Open,
    /// `int16_t cameraRelease(void)`
    Release,
    /// `int16_t startCameraPreview(void)`
    StartPreview,
    /// `int16_t stopCameraPreview(void)`
    StopPreview,
    /// `int16_t startCameraRecording(void)`
    StartRecording,
    /// `int16_t stopCameraRecording(void)`
    StopRecording,
    /// `int16_t setCameraParameter(CameraParamContainer)`
    SetParameter,
    /// `CameraParams getCameraParameter(jobject)`
    GetParameter,
    /// `int16_t setNearEndSurface(JNIEnv *, jobject)`
    SetNearEndSurface,
    /// `int16_t setPreviewDisplayOrientation(uint32_t)`
    SetDisplayOrientation,
    /// `int16_t getMaxZoom(void)`
    GetMaxZoom,
    /// `bool isZoomSupported(void)`
    IsZoomSupported,
    /// `void setZoom(uint32_t)`
    SetZoom,
}

impl EntryPoint {
    /// Every contracted entry point, in table order.
    pub const ALL: [EntryPoint; 13] = [
        EntryPoint::Open,
        EntryPoint::Release,
        EntryPoint::StartPreview,
        EntryPoint::StopPreview,
        EntryPoint::StartRecording,
        EntryPoint::StopRecording,
        EntryPoint::SetParameter,
        EntryPoint::GetParameter,
        EntryPoint::SetNearEndSurface,
        EntryPoint::SetDisplayOrientation,
        EntryPoint::GetMaxZoom,
        EntryPoint::IsZoomSupported,
        EntryPoint::SetZoom,
    ];

    /// Exported symbol name in the vendor library.
    pub fn symbol(self) -> &'static str {
        match self {
            EntryPoint::Open => "cameraOpen",
            EntryPoint::Release => "cameraRelease",
            EntryPoint::StartPreview => "startCameraPreview",
            EntryPoint::StopPreview => "stopCameraPreview",
            EntryPoint::StartRecording => "startCameraRecording",
            EntryPoint::StopRecording => "stopCameraRecording",
            EntryPoint::SetParameter => "setCameraParameter",
            EntryPoint::GetParameter => "getCameraParameter",
            EntryPoint::SetNearEndSurface => "setNearEndSurface",
            EntryPoint::SetDisplayOrientation => "setPreviewDisplayOrientation",
            EntryPoint::GetMaxZoom => "getMaxZoom",
            EntryPoint::IsZoomSupported => "isZoomSupported",
            EntryPoint::SetZoom => "setZoom",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Preview surface forwarded verbatim to `setNearEndSurface`.
///
/// Both pointers are only valid for the duration of the native call that
/// produced them.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHandle {
    /// Calling thread's JNI environment.
    pub env: *mut JNIEnv,
    /// The managed `SurfaceTexture` local reference.
    pub surface: jobject,
}

/// A camera implementation as seen by the dispatcher.
///
/// Every method returns `None` when the implementation does not provide that
/// entry point, and `Some(result)` after invoking it exactly once.
pub trait CameraImpl: Send + Sync {
    /// Whether `entry` is backed by a callable.
    fn provides(&self, entry: EntryPoint) -> bool;

    /// `cameraOpen`
    fn camera_open(&self, camera_id: u32) -> Option<i16>;
    /// `cameraRelease`
    fn camera_release(&self) -> Option<i16>;
    /// `startCameraPreview`
    fn start_preview(&self) -> Option<i16>;
    /// `stopCameraPreview`
    fn stop_preview(&self) -> Option<i16>;
    /// `startCameraRecording`
    fn start_recording(&self) -> Option<i16>;
    /// `stopCameraRecording`
    fn stop_recording(&self) -> Option<i16>;
    /// `setCameraParameter`
    fn set_parameter(&self, param: CameraParam) -> Option<i16>;
    /// `getCameraParameter`
    fn get_parameter(&self, query: jobject) -> Option<RawCameraParams>;
    /// `setNearEndSurface`
    fn set_near_end_surface(&self, surface: SurfaceHandle) -> Option<i16>;
    /// `setPreviewDisplayOrientation`
    fn set_display_orientation(&self, rotation: u32) -> Option<i16>;
    /// `getMaxZoom`
    fn get_max_zoom(&self) -> Option<i16>;
    /// `isZoomSupported`
    fn is_zoom_supported(&self) -> Option<bool>;
    /// `setZoom`
    fn set_zoom(&self, zoom: u32) -> Option<()>;
}
