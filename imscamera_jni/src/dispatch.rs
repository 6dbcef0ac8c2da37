use jni::sys::jobject;

use crate::config::{PropertySource, impl_library_path};
use crate::contract::{CameraImpl, EntryPoint, SurfaceHandle};
use crate::impl_loader::ImplementationTable;
use crate::params::{CameraParam, ParamKind, Resolution};

/// Status returned by every operation whose implementation is unavailable.
pub const IMS_API_ACCESS_ERROR: i16 = -10;

/// `isZoomSupported` answer when unavailable.
///
/// The sentinel is non-zero, so a boolean view of it reads as `true`. Callers
/// cannot tell "zoom supported" from "no implementation" through this entry
/// point alone; [`Dispatcher::provides`] disambiguates.
pub const IS_ZOOM_SUPPORTED_UNAVAILABLE: bool = IMS_API_ACCESS_ERROR != 0;

/// Forwards camera operations to the resolved implementation.
///
/// Holds either a loaded implementation or nothing. Every operation checks
/// for its entry point and returns [`IMS_API_ACCESS_ERROR`] (or the
/// operation's equivalent) without side effects when it is missing.
pub struct Dispatcher {
    backend: Option<Box<dyn CameraImpl>>,
}

impl Dispatcher {
    /// Dispatcher with no implementation; every operation reports unavailable.
    pub const fn unloaded() -> Self {
        Self { backend: None }
    }

    /// Dispatcher forwarding to `backend`.
    pub fn new(backend: Box<dyn CameraImpl>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Whether an implementation was loaded at all.
    pub fn is_loaded(&self) -> bool {
        self.backend.is_some()
    }

    /// Whether `entry` would be forwarded rather than reported unavailable.
    pub fn provides(&self, entry: EntryPoint) -> bool {
        self.backend.as_ref().is_some_and(|b| b.provides(entry))
    }

    fn forward<R>(&self, f: impl FnOnce(&dyn CameraImpl) -> Option<R>) -> Option<R> {
        self.backend.as_deref().and_then(f)
    }

    /// Opens camera `camera_id`.
    pub fn open(&self, camera_id: i32) -> i16 {
        tracing::debug!(camera_id, "open");
        self.forward(|b| b.camera_open(camera_id as u32))
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Releases the open camera.
    pub fn release(&self) -> i16 {
        tracing::debug!("release");
        self.forward(|b| b.camera_release())
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Starts the preview stream.
    pub fn start_preview(&self) -> i16 {
        tracing::debug!("start_preview");
        self.forward(|b| b.start_preview())
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Stops the preview stream.
    pub fn stop_preview(&self) -> i16 {
        tracing::debug!("stop_preview");
        self.forward(|b| b.stop_preview())
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Starts recording.
    pub fn start_recording(&self) -> i16 {
        tracing::debug!("start_recording");
        self.forward(|b| b.start_recording())
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Stops recording.
    pub fn stop_recording(&self) -> i16 {
        tracing::debug!("stop_recording");
        self.forward(|b| b.stop_recording())
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Binds the near-end preview surface.
    pub fn set_preview_texture(&self, surface: SurfaceHandle) -> i16 {
        tracing::debug!("set_preview_texture");
        self.forward(|b| b.set_near_end_surface(surface))
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Rotates the preview display.
    pub fn set_display_orientation(&self, rotation: i32) -> i16 {
        tracing::debug!(rotation, "set_display_orientation");
        self.forward(|b| b.set_display_orientation(rotation as u32))
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// See [`IS_ZOOM_SUPPORTED_UNAVAILABLE`] for the unavailable answer.
    pub fn is_zoom_supported(&self) -> bool {
        tracing::debug!("is_zoom_supported");
        self.forward(|b| b.is_zoom_supported())
            .unwrap_or(IS_ZOOM_SUPPORTED_UNAVAILABLE)
    }

    /// Maximum zoom step.
    pub fn get_max_zoom(&self) -> i32 {
        tracing::debug!("get_max_zoom");
        self.forward(|b| b.get_max_zoom())
            .map(i32::from)
            .unwrap_or(i32::from(IMS_API_ACCESS_ERROR))
    }

    /// Sets the zoom step. Does nothing when unavailable.
    pub fn set_zoom(&self, zoom: i32) {
        tracing::debug!(zoom, "set_zoom");
        self.forward(|b| b.set_zoom(zoom as u32));
    }

    /// Sets the preview resolution through `setCameraParameter`.
    pub fn set_preview_size(&self, width: i32, height: i32) -> i16 {
        tracing::debug!(width, height, "set_preview_size");
        self.set_parameter(CameraParam::Resolution(Resolution { width, height }))
    }

    /// Sets the preview frame rate through `setCameraParameter`.
    pub fn set_fps_range(&self, fps: i32) -> i16 {
        tracing::debug!(fps, "set_fps_range");
        self.set_parameter(CameraParam::Fps(fps))
    }

    fn set_parameter(&self, param: CameraParam) -> i16 {
        self.forward(|b| b.set_parameter(param))
            .unwrap_or(IMS_API_ACCESS_ERROR)
    }

    /// Queries a parameter, decoding the vendor's untagged answer as `kind`.
    ///
    /// Returns `None` when the implementation is unavailable.
    pub fn get_parameter(&self, query: jobject, kind: ParamKind) -> Option<CameraParam> {
        tracing::debug!(?kind, "get_parameter");
        self.forward(|b| b.get_parameter(query))
            .map(|raw| CameraParam::from_raw(kind, raw))
    }
}

/// Builds the process dispatcher from configuration.
///
/// A library that fails to open yields an unloaded dispatcher; the failure
/// has already been logged by the loader.
pub fn bring_up(props: &dyn PropertySource) -> Dispatcher {
    let path = impl_library_path(props);
    tracing::debug!(path = %path.display(), "resolving camera implementation");

    // SAFETY:
    // - The path comes from platform configuration naming the vendor camera
    //   library, which is built against the `EntryPoint` contract.
    // - If the library exports a contracted name with a different signature,
    //   calling through it would be Undefined Behavior; nothing here can
    //   detect that.
    match unsafe { ImplementationTable::load(&path) } {
        Ok(table) => Dispatcher::new(Box::new(table)),
        Err(_) => Dispatcher::unloaded(),
    }
}
