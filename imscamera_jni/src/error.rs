use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while bringing up the camera bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The vendor implementation library could not be opened.
    #[error("Error loading library {}: {source}", path.display())]
    ImplLibOpen {
        /// Path handed to the dynamic linker.
        path: PathBuf,
        /// Loader diagnostic.
        #[source]
        source: libloading::Error,
    },

    /// The managed class the natives belong to could not be found.
    #[error("Unable to find java class {class}: {source}")]
    ClassNotFound {
        /// JNI class descriptor that was looked up.
        class: &'static str,
        /// JNI failure.
        #[source]
        source: jni::errors::Error,
    },

    /// The runtime rejected the native method table.
    #[error("RegisterNatives failed: {0}")]
    RegisterNatives(#[source] jni::errors::Error),

    /// Any other JNI failure.
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),
}
