//! In-process camera implementation for unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use jni::sys::jobject;

use crate::contract::{CameraImpl, EntryPoint, SurfaceHandle};
use crate::params::{CameraParam, RawCameraParams, Resolution};

/// One forwarded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Open(u32),
    Release,
    StartPreview,
    StopPreview,
    StartRecording,
    StopRecording,
    SetParameter(CameraParam),
    GetParameter,
    SetNearEndSurface,
    SetDisplayOrientation(u32),
    GetMaxZoom,
    IsZoomSupported,
    SetZoom(u32),
}

/// Shared record of calls, readable after the fixture is boxed away.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, call: Call) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }
}

/// Canned implementation exposing a chosen subset of entry points.
pub(crate) struct FixtureCamera {
    present: HashSet<EntryPoint>,
    journal: Journal,
    status: i16,
    max_zoom: i16,
    zoom_supported: bool,
    last_param: Mutex<CameraParam>,
}

impl FixtureCamera {
    pub(crate) fn complete() -> (Self, Journal) {
        Self::with_only(&EntryPoint::ALL)
    }

    pub(crate) fn with_only(entries: &[EntryPoint]) -> (Self, Journal) {
        let journal = Journal::default();
        let fixture = Self {
            present: entries.iter().copied().collect(),
            journal: journal.clone(),
            status: 0,
            max_zoom: 10,
            zoom_supported: true,
            last_param: Mutex::new(CameraParam::Resolution(Resolution {
                width: 0,
                height: 0,
            })),
        };
        (fixture, journal)
    }

    pub(crate) fn with_status(mut self, status: i16) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn with_max_zoom(mut self, max_zoom: i16) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub(crate) fn with_zoom_supported(mut self, supported: bool) -> Self {
        self.zoom_supported = supported;
        self
    }

    fn record<R>(&self, entry: EntryPoint, call: Call, result: R) -> Option<R> {
        if !self.present.contains(&entry) {
            return None;
        }
        self.journal.push(call);
        Some(result)
    }
}

impl CameraImpl for FixtureCamera {
    fn provides(&self, entry: EntryPoint) -> bool {
        self.present.contains(&entry)
    }

    fn camera_open(&self, camera_id: u32) -> Option<i16> {
        self.record(EntryPoint::Open, Call::Open(camera_id), self.status)
    }

    fn camera_release(&self) -> Option<i16> {
        self.record(EntryPoint::Release, Call::Release, self.status)
    }

    fn start_preview(&self) -> Option<i16> {
        self.record(EntryPoint::StartPreview, Call::StartPreview, self.status)
    }

    fn stop_preview(&self) -> Option<i16> {
        self.record(EntryPoint::StopPreview, Call::StopPreview, self.status)
    }

    fn start_recording(&self) -> Option<i16> {
        self.record(EntryPoint::StartRecording, Call::StartRecording, self.status)
    }

    fn stop_recording(&self) -> Option<i16> {
        self.record(EntryPoint::StopRecording, Call::StopRecording, self.status)
    }

    fn set_parameter(&self, param: CameraParam) -> Option<i16> {
        let status = self.record(EntryPoint::SetParameter, Call::SetParameter(param), self.status)?;
        *self.last_param.lock().unwrap_or_else(PoisonError::into_inner) = param;
        Some(status)
    }

    fn get_parameter(&self, _query: jobject) -> Option<RawCameraParams> {
        let last = *self.last_param.lock().unwrap_or_else(PoisonError::into_inner);
        self.record(EntryPoint::GetParameter, Call::GetParameter, last.into_raw().params)
    }

    fn set_near_end_surface(&self, _surface: SurfaceHandle) -> Option<i16> {
        self.record(EntryPoint::SetNearEndSurface, Call::SetNearEndSurface, self.status)
    }

    fn set_display_orientation(&self, rotation: u32) -> Option<i16> {
        self.record(
            EntryPoint::SetDisplayOrientation,
            Call::SetDisplayOrientation(rotation),
            self.status,
        )
    }

    fn get_max_zoom(&self) -> Option<i16> {
        self.record(EntryPoint::GetMaxZoom, Call::GetMaxZoom, self.max_zoom)
    }

    fn is_zoom_supported(&self) -> Option<bool> {
        self.record(EntryPoint::IsZoomSupported, Call::IsZoomSupported, self.zoom_supported)
    }

    fn set_zoom(&self, zoom: u32) -> Option<()> {
        self.record(EntryPoint::SetZoom, Call::SetZoom(zoom), ())
    }
}
