/// Log tag used on the device log.
pub const LOG_TAG: &str = "videocall_camera_jni";

/// Routes the crate's `tracing` events to the platform log.
///
/// On Android no tracing subscriber is installed; events fall through the
/// `log` facade into logcat. Elsewhere a `fmt` subscriber honoring
/// `RUST_LOG` (default `info`) is installed. Calling this more than once is
/// harmless.
pub fn init() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag(LOG_TAG),
    );

    #[cfg(not(target_os = "android"))]
    {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt().with_env_filter(filter).try_init();
    }
}
