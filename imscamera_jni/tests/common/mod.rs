//! Locates the vendor stand-in libraries, building them on first use.
//!
//! Set `IMSCAMERA_TEST_IMPL_DIR` to use prebuilt stand-ins from another
//! directory instead; a missing library is then a test failure too.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use imscamera_jni::config::{IMPL_LIB_PROPERTY_NAME, StaticProperties};
use imscamera_jni::dispatch::{Dispatcher, bring_up};

const STAND_INS: [&str; 2] = ["fake_camera_impl", "zoom_only_camera_impl"];

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
}

/// Separate from the outer build's target dir so its lock is never contended.
fn target_dir() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace_root().join("target"))
        .join("camera-stand-ins")
}

/// Runs `cargo build` for every stand-in once per test binary.
fn build_stand_ins() -> &'static PathBuf {
    static BUILT: OnceLock<PathBuf> = OnceLock::new();
    BUILT.get_or_init(|| {
        if let Some(dir) = std::env::var_os("IMSCAMERA_TEST_IMPL_DIR") {
            return PathBuf::from(dir);
        }

        let cargo = std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
        let mut cmd = Command::new(cargo);
        cmd.arg("build")
            .arg("--manifest-path")
            .arg(workspace_root().join("Cargo.toml"))
            .arg("--target-dir")
            .arg(target_dir());
        for name in STAND_INS {
            cmd.args(["-p", name]);
        }

        let status = cmd.status().expect("spawn cargo to build camera stand-ins");
        assert!(status.success(), "building camera stand-ins failed: {status}");
        target_dir().join("debug")
    })
}

/// Path of the built stand-in `name`; panics when it cannot be produced.
pub fn stand_in(name: &str) -> PathBuf {
    let file = format!(
        "{}{name}{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_SUFFIX
    );
    let path = build_stand_ins().join(file);
    assert!(path.exists(), "camera stand-in missing at {}", path.display());
    path
}

/// Dispatcher brought up from a configuration naming `path`.
pub fn dispatcher_for(path: &Path) -> Dispatcher {
    bring_up(&StaticProperties::new().with(IMPL_LIB_PROPERTY_NAME, path.display().to_string()))
}

/// Reads a stand-in's zoom inspection hook, which is outside the contract.
pub fn current_zoom(path: &Path, hook: &[u8]) -> u32 {
    // SAFETY: the stand-ins export `hook` as `extern "C" fn() -> u32`; the
    // library is already loaded, so this only bumps its reference count.
    unsafe {
        let lib = libloading::Library::new(path).expect("reopen camera stand-in");
        let read: libloading::Symbol<unsafe extern "C" fn() -> u32> =
            lib.get(hook).expect("zoom hook exported");
        read()
    }
}
