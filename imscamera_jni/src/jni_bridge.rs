use std::ffi::c_void;
use std::sync::OnceLock;

use jni::objects::{JClass, JObject};
use jni::sys::{JNI_ERR, JNI_VERSION_1_6, jboolean, jint, jshort};
use jni::{JNIEnv, JavaVM, NativeMethod};

use crate::config::{PropertySource, SystemProperties};
use crate::contract::SurfaceHandle;
use crate::dispatch::{Dispatcher, bring_up};
use crate::error::BridgeError;

/// Managed class the natives are bound to.
pub const IMS_CAMERA_CLASS: &str = "com/android/phone/ImsCamera";

static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
static UNLOADED: Dispatcher = Dispatcher::unloaded();

/// Installs `dispatcher` as the process dispatcher.
///
/// The first installation wins for the lifetime of the process; later ones
/// are dropped with a warning and the existing dispatcher is returned.
pub fn install(dispatcher: Dispatcher) -> &'static Dispatcher {
    let mut fresh = Some(dispatcher);
    let installed = DISPATCHER.get_or_init(|| fresh.take().unwrap_or_else(Dispatcher::unloaded));
    if fresh.is_some() {
        tracing::warn!("camera implementation already resolved, keeping the first one");
    }
    installed
}

/// The process dispatcher, or an unloaded one before registration.
pub fn dispatcher() -> &'static Dispatcher {
    DISPATCHER.get().unwrap_or(&UNLOADED)
}

/// Resolves the vendor implementation and binds the natives of
/// [`IMS_CAMERA_CLASS`].
///
/// Only a missing class or a rejected method table is an error; a vendor
/// library that fails to load leaves every native reporting unavailable.
///
/// Needs a live JVM, so tests cover its steps separately: `bring_up` for the
/// load that degrades instead of failing, `install` for the first-wins
/// registry and `native_table` for the bound methods.
pub fn register(env: &mut JNIEnv, props: &dyn PropertySource) -> Result<(), BridgeError> {
    tracing::debug!("register_videophone_ims_camera");

    let class = env.find_class(IMS_CAMERA_CLASS).map_err(|source| {
        tracing::error!(class = IMS_CAMERA_CLASS, error = %source, "Unable to find java class");
        BridgeError::ClassNotFound {
            class: IMS_CAMERA_CLASS,
            source,
        }
    })?;

    if DISPATCHER.get().is_none() {
        install(bring_up(props));
    } else {
        tracing::warn!("natives registered again, reusing resolved camera implementation");
    }

    env.register_native_methods(&class, &native_methods())
        .map_err(BridgeError::RegisterNatives)
}

/// Managed method name, JNI signature and entry point of every native.
pub fn native_table() -> [(&'static str, &'static str, *mut c_void); 13] {
    [
        ("native_open", "(I)S", native_open as *mut c_void),
        ("native_release", "()S", native_release as *mut c_void),
        ("native_startPreview", "()S", native_start_preview as *mut c_void),
        ("native_stopPreview", "()S", native_stop_preview as *mut c_void),
        ("native_startRecording", "()S", native_start_recording as *mut c_void),
        ("native_stopRecording", "()S", native_stop_recording as *mut c_void),
        (
            "native_setPreviewTexture",
            "(Landroid/graphics/SurfaceTexture;)S",
            native_set_preview_texture as *mut c_void,
        ),
        (
            "native_setDisplayOrientation",
            "(I)S",
            native_set_display_orientation as *mut c_void,
        ),
        ("native_isZoomSupported", "()Z", native_is_zoom_supported as *mut c_void),
        ("native_getMaxZoom", "()I", native_get_max_zoom as *mut c_void),
        ("native_setZoom", "(I)V", native_set_zoom as *mut c_void),
        ("native_setPreviewSize", "(II)S", native_set_preview_size as *mut c_void),
        (
            "native_setPreviewFpsRange",
            "(S)S",
            native_set_preview_fps_range as *mut c_void,
        ),
    ]
}

fn native_methods() -> Vec<NativeMethod> {
    native_table()
        .into_iter()
        .map(|(name, sig, fn_ptr)| NativeMethod {
            name: name.into(),
            sig: sig.into(),
            fn_ptr,
        })
        .collect()
}

extern "system" fn native_open(_env: JNIEnv, _class: JClass, camera_id: jint) -> jshort {
    dispatcher().open(camera_id)
}

extern "system" fn native_release(_env: JNIEnv, _this: JObject) -> jshort {
    dispatcher().release()
}

extern "system" fn native_start_preview(_env: JNIEnv, _this: JObject) -> jshort {
    dispatcher().start_preview()
}

extern "system" fn native_stop_preview(_env: JNIEnv, _this: JObject) -> jshort {
    dispatcher().stop_preview()
}

extern "system" fn native_start_recording(_env: JNIEnv, _this: JObject) -> jshort {
    dispatcher().start_recording()
}

extern "system" fn native_stop_recording(_env: JNIEnv, _this: JObject) -> jshort {
    dispatcher().stop_recording()
}

extern "system" fn native_set_preview_texture(
    env: JNIEnv,
    _this: JObject,
    surface: JObject,
) -> jshort {
    dispatcher().set_preview_texture(SurfaceHandle {
        env: env.get_raw(),
        surface: surface.as_raw(),
    })
}

extern "system" fn native_set_display_orientation(
    _env: JNIEnv,
    _this: JObject,
    rotation: jint,
) -> jshort {
    dispatcher().set_display_orientation(rotation)
}

extern "system" fn native_is_zoom_supported(_env: JNIEnv, _this: JObject) -> jboolean {
    jboolean::from(dispatcher().is_zoom_supported())
}

extern "system" fn native_get_max_zoom(_env: JNIEnv, _this: JObject) -> jint {
    dispatcher().get_max_zoom()
}

extern "system" fn native_set_zoom(_env: JNIEnv, _this: JObject, zoom: jint) {
    dispatcher().set_zoom(zoom);
}

extern "system" fn native_set_preview_size(
    _env: JNIEnv,
    _this: JObject,
    width: jint,
    height: jint,
) -> jshort {
    dispatcher().set_preview_size(width, height)
}

extern "system" fn native_set_preview_fps_range(_env: JNIEnv, _this: JObject, fps: jshort) -> jshort {
    dispatcher().set_fps_range(i32::from(fps))
}

fn on_load(vm: *mut jni::sys::JavaVM) -> Result<(), BridgeError> {
    // SAFETY: the runtime hands `JNI_OnLoad` a valid, live JavaVM pointer.
    let vm = unsafe { JavaVM::from_raw(vm) }?;
    let mut env = vm.get_env()?;
    register(&mut env, &SystemProperties)
}

/// Library bring-up hook invoked by the runtime on `loadLibrary`.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    crate::logging::init();

    match on_load(vm) {
        Ok(()) => JNI_VERSION_1_6,
        Err(err) => {
            tracing::error!(error = %err, "camera natives not registered");
            JNI_ERR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::IMS_API_ACCESS_ERROR;
    use crate::fixture::FixtureCamera;

    #[test]
    fn every_managed_native_is_bound_once() {
        let table = native_table();

        assert!(table.iter().all(|(_, _, fn_ptr)| !fn_ptr.is_null()));
        for (expected, sig) in [
            ("native_open", "(I)S"),
            ("native_release", "()S"),
            ("native_startPreview", "()S"),
            ("native_stopPreview", "()S"),
            ("native_startRecording", "()S"),
            ("native_stopRecording", "()S"),
            ("native_setPreviewTexture", "(Landroid/graphics/SurfaceTexture;)S"),
            ("native_setDisplayOrientation", "(I)S"),
            ("native_isZoomSupported", "()Z"),
            ("native_getMaxZoom", "()I"),
            ("native_setZoom", "(I)V"),
            ("native_setPreviewSize", "(II)S"),
            ("native_setPreviewFpsRange", "(S)S"),
        ] {
            let matches: Vec<_> = table.iter().filter(|(name, _, _)| *name == expected).collect();
            assert_eq!(matches.len(), 1, "{expected}");
            assert_eq!(matches[0].1, sig, "{expected}");
        }
        assert_eq!(native_methods().len(), table.len());
    }

    #[test]
    fn first_installed_dispatcher_is_kept() {
        let (first, _) = FixtureCamera::complete();
        let first = install(Dispatcher::new(Box::new(first.with_status(1))));
        assert_eq!(first.open(0), 1);

        let second = install(Dispatcher::unloaded());

        assert!(std::ptr::eq(first, second));
        assert_eq!(dispatcher().open(0), 1);
        assert_ne!(dispatcher().release(), IMS_API_ACCESS_ERROR);
    }
}
