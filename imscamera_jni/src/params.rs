use std::os::raw::c_int;

/// Preview resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

/// A camera setting pushed through the single `setCameraParameter` entry point.
///
/// Each variant carries its own payload, so a tag can never disagree with the
/// populated field once converted to the C container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraParam {
    /// Preview frame rate.
    Fps(i32),
    /// Preview width/height pair.
    Resolution(Resolution),
}

/// Which member of an untagged [`RawCameraParams`] the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Read the `fps` member.
    Fps,
    /// Read the `cameraResolution` member.
    Resolution,
}

impl CameraParam {
    /// Kind of this parameter.
    pub fn kind(&self) -> ParamKind {
        match self {
            CameraParam::Fps(_) => ParamKind::Fps,
            CameraParam::Resolution(_) => ParamKind::Resolution,
        }
    }

    /// Lowers the parameter into the container the vendor library expects.
    pub fn into_raw(self) -> RawParamContainer {
        match self {
            CameraParam::Fps(fps) => {
                // zero the wider member first so the whole union is initialized
                let mut params = RawCameraParams {
                    camera_resolution: RawResolution {
                        width: 0,
                        height: 0,
                    },
                };
                params.fps = fps;
                RawParamContainer {
                    kind: RawParamType::SetFps,
                    params,
                }
            }
            CameraParam::Resolution(Resolution { width, height }) => RawParamContainer {
                kind: RawParamType::SetResolution,
                params: RawCameraParams {
                    camera_resolution: RawResolution { width, height },
                },
            },
        }
    }

    /// Decodes an untagged vendor answer, trusting the caller's `kind`.
    pub fn from_raw(kind: ParamKind, raw: RawCameraParams) -> Self {
        // SAFETY:
        // - Both union members are plain `c_int` aggregates, so every bit
        //   pattern is a valid value for either of them.
        // - The union is always 8 bytes wide because of the resolution
        //   member, so reading it never goes out of bounds.
        unsafe {
            match kind {
                ParamKind::Fps => CameraParam::Fps(raw.fps),
                ParamKind::Resolution => CameraParam::Resolution(Resolution {
                    width: raw.camera_resolution.width,
                    height: raw.camera_resolution.height,
                }),
            }
        }
    }
}

/// C layout of `Resolution`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawResolution {
    /// Width in pixels.
    pub width: c_int,
    /// Height in pixels.
    pub height: c_int,
}

/// C layout of the `eParamType` tag.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawParamType {
    /// Never produced by this crate.
    Invalid = 0,
    /// `params.fps` is populated.
    SetFps = 1,
    /// `params.camera_resolution` is populated.
    SetResolution = 2,
}

/// C layout of the untagged `CameraParams` union.
#[repr(C)]
#[derive(Clone, Copy)]
pub union RawCameraParams {
    /// Frame rate member.
    pub fps: c_int,
    /// Resolution member.
    pub camera_resolution: RawResolution,
}

/// C layout of `CameraParamContainer`, passed to the vendor by value.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawParamContainer {
    /// Discriminates which union member is meaningful.
    pub kind: RawParamType,
    /// Parameter payload.
    pub params: RawCameraParams,
}
