use jni::sys::{JNIEnv, jobject};
use libloading::{Library, Symbol};
use std::path::Path;

use crate::contract::{CameraImpl, EntryPoint, SurfaceHandle};
use crate::error::BridgeError;
use crate::params::{CameraParam, RawCameraParams, RawParamContainer};

/// `int16_t cameraOpen(uint32_t)`
pub type CameraOpenFn = unsafe extern "C" fn(u32) -> i16;
/// `int16_t f(void)`, shared by release, preview, recording and `getMaxZoom`.
pub type Int16VoidFn = unsafe extern "C" fn() -> i16;
/// `int16_t setNearEndSurface(JNIEnv *, jobject)`
pub type SetPreviewSurfaceFn = unsafe extern "C" fn(*mut JNIEnv, jobject) -> i16;
/// `int16_t setPreviewDisplayOrientation(uint32_t)`
pub type SetDisplayOrientationFn = unsafe extern "C" fn(u32) -> i16;
/// `int16_t setCameraParameter(CameraParamContainer)`
pub type SetParameterFn = unsafe extern "C" fn(RawParamContainer) -> i16;
/// `CameraParams getCameraParameter(jobject)`
pub type GetParameterFn = unsafe extern "C" fn(jobject) -> RawCameraParams;
/// `bool isZoomSupported(void)`
pub type IsZoomSupportedFn = unsafe extern "C" fn() -> bool;
/// `void setZoom(uint32_t)`
pub type SetZoomFn = unsafe extern "C" fn(u32);

/// Entry points resolved from a vendor camera library.
///
/// Any slot may be empty. The library stays open for as long as the table
/// lives; once installed as the process dispatcher it is never dropped, so
/// the function pointers stay valid until process exit.
pub struct ImplementationTable {
    camera_open: Option<CameraOpenFn>,
    camera_release: Option<Int16VoidFn>,
    start_preview: Option<Int16VoidFn>,
    stop_preview: Option<Int16VoidFn>,
    start_recording: Option<Int16VoidFn>,
    stop_recording: Option<Int16VoidFn>,
    set_parameter: Option<SetParameterFn>,
    get_parameter: Option<GetParameterFn>,
    set_near_end_surface: Option<SetPreviewSurfaceFn>,
    set_display_orientation: Option<SetDisplayOrientationFn>,
    get_max_zoom: Option<Int16VoidFn>,
    is_zoom_supported: Option<IsZoomSupportedFn>,
    set_zoom: Option<SetZoomFn>,
    _lib: Library,
}

impl ImplementationTable {
    /// Opens the vendor library at `path` with immediate binding and resolves
    /// every contracted entry point. Missing symbols leave their slot empty.
    ///
    /// # SAFETY
    /// The caller must ensure that the library at `path`:
    /// - exports each contracted symbol it provides with the exact C signature
    ///   listed on [`EntryPoint`],
    /// - has initializers that are safe to run in this process,
    /// - remains compatible for the lifetime of the returned table.
    pub unsafe fn load(path: &Path) -> Result<Self, BridgeError> {
        // SAFETY: forwarded to the caller, see above.
        let lib = match unsafe { open_now(path) } {
            Ok(lib) => lib,
            Err(source) => {
                tracing::error!(path = %path.display(), error = %source, "Error loading library");
                return Err(BridgeError::ImplLibOpen {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        // SAFETY: every `resolve` below names the type alias matching the
        // entry point's documented signature.
        let table = unsafe {
            Self {
                camera_open: resolve(&lib, EntryPoint::Open),
                camera_release: resolve(&lib, EntryPoint::Release),
                start_preview: resolve(&lib, EntryPoint::StartPreview),
                stop_preview: resolve(&lib, EntryPoint::StopPreview),
                start_recording: resolve(&lib, EntryPoint::StartRecording),
                stop_recording: resolve(&lib, EntryPoint::StopRecording),
                set_parameter: resolve(&lib, EntryPoint::SetParameter),
                get_parameter: resolve(&lib, EntryPoint::GetParameter),
                set_near_end_surface: resolve(&lib, EntryPoint::SetNearEndSurface),
                set_display_orientation: resolve(&lib, EntryPoint::SetDisplayOrientation),
                get_max_zoom: resolve(&lib, EntryPoint::GetMaxZoom),
                is_zoom_supported: resolve(&lib, EntryPoint::IsZoomSupported),
                set_zoom: resolve(&lib, EntryPoint::SetZoom),
                _lib: lib,
            }
        };

        let resolved = EntryPoint::ALL
            .iter()
            .filter(|entry| table.provides(**entry))
            .count();
        tracing::info!(path = %path.display(), resolved, total = EntryPoint::ALL.len(), "camera implementation loaded");

        Ok(table)
    }
}

#[cfg(unix)]
unsafe fn open_now(path: &Path) -> Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as UnixLibrary, RTLD_NOW};

    // SAFETY: library initializers run here; the caller of `load` vouches for them.
    unsafe { UnixLibrary::open(Some(path), RTLD_NOW) }.map(Library::from)
}

#[cfg(not(unix))]
unsafe fn open_now(path: &Path) -> Result<Library, libloading::Error> {
    // SAFETY: library initializers run here; the caller of `load` vouches for them.
    unsafe { Library::new(path) }
}

/// Looks up one entry point, copying the function pointer out of the symbol.
///
/// # SAFETY
/// `T` must be the function pointer type matching the symbol's real signature.
unsafe fn resolve<T: Copy>(lib: &Library, entry: EntryPoint) -> Option<T> {
    // SAFETY: forwarded to the caller, see above.
    let sym: Result<Symbol<T>, _> = unsafe { lib.get(entry.symbol().as_bytes()) };
    match sym {
        Ok(sym) => Some(*sym),
        Err(err) => {
            tracing::debug!(symbol = entry.symbol(), error = %err, "entry point not exported");
            None
        }
    }
}

// SAFETY (applies to every call below):
// - The pointer was resolved by `load` under the caller's promise that it has
//   the matching C signature.
// - `_lib` keeps the code mapped for as long as `self` is alive.
// - Thread safety of the vendor functions is the vendor's contract; this
//   layer adds no shared state of its own.
impl CameraImpl for ImplementationTable {
    fn provides(&self, entry: EntryPoint) -> bool {
        match entry {
            EntryPoint::Open => self.camera_open.is_some(),
            EntryPoint::Release => self.camera_release.is_some(),
            EntryPoint::StartPreview => self.start_preview.is_some(),
            EntryPoint::StopPreview => self.stop_preview.is_some(),
            EntryPoint::StartRecording => self.start_recording.is_some(),
            EntryPoint::StopRecording => self.stop_recording.is_some(),
            EntryPoint::SetParameter => self.set_parameter.is_some(),
            EntryPoint::GetParameter => self.get_parameter.is_some(),
            EntryPoint::SetNearEndSurface => self.set_near_end_surface.is_some(),
            EntryPoint::SetDisplayOrientation => self.set_display_orientation.is_some(),
            EntryPoint::GetMaxZoom => self.get_max_zoom.is_some(),
            EntryPoint::IsZoomSupported => self.is_zoom_supported.is_some(),
            EntryPoint::SetZoom => self.set_zoom.is_some(),
        }
    }

    fn camera_open(&self, camera_id: u32) -> Option<i16> {
        self.camera_open.map(|f| unsafe { f(camera_id) })
    }

    fn camera_release(&self) -> Option<i16> {
        self.camera_release.map(|f| unsafe { f() })
    }

    fn start_preview(&self) -> Option<i16> {
        self.start_preview.map(|f| unsafe { f() })
    }

    fn stop_preview(&self) -> Option<i16> {
        self.stop_preview.map(|f| unsafe { f() })
    }

    fn start_recording(&self) -> Option<i16> {
        self.start_recording.map(|f| unsafe { f() })
    }

    fn stop_recording(&self) -> Option<i16> {
        self.stop_recording.map(|f| unsafe { f() })
    }

    fn set_parameter(&self, param: CameraParam) -> Option<i16> {
        self.set_parameter.map(|f| unsafe { f(param.into_raw()) })
    }

    fn get_parameter(&self, query: jobject) -> Option<RawCameraParams> {
        self.get_parameter.map(|f| unsafe { f(query) })
    }

    fn set_near_end_surface(&self, surface: SurfaceHandle) -> Option<i16> {
        // The env and surface pointers are only borrowed for this call.
        self.set_near_end_surface
            .map(|f| unsafe { f(surface.env, surface.surface) })
    }

    fn set_display_orientation(&self, rotation: u32) -> Option<i16> {
        self.set_display_orientation.map(|f| unsafe { f(rotation) })
    }

    fn get_max_zoom(&self) -> Option<i16> {
        self.get_max_zoom.map(|f| unsafe { f() })
    }

    fn is_zoom_supported(&self) -> Option<bool> {
        self.is_zoom_supported.map(|f| unsafe { f() })
    }

    fn set_zoom(&self, zoom: u32) -> Option<()> {
        self.set_zoom.map(|f| unsafe { f(zoom) })
    }
}
