#![deny(missing_docs)]

//! JNI bridge dispatching video-call camera operations to a vendor camera
//! library resolved at runtime.

/// Managed-side configuration lookup.
pub mod config;

/// Entry-point contract shared by every camera implementation.
pub mod contract;

/// Operation dispatch against the resolved implementation.
pub mod dispatch;

/// Error types used by the bridge.
pub mod error;

/// Dynamic loading of the vendor implementation library.
pub mod impl_loader;

/// Native method registration and the process-wide dispatcher.
pub mod jni_bridge;

/// Platform log routing.
pub mod logging;

/// Camera parameter values and their C layout.
pub mod params;

#[cfg(test)]
mod fixture;
