use clap::Parser;
use std::path::PathBuf;

use imscamera_jni::config::{IMPL_LIB_PROPERTY_NAME, StaticProperties, SystemProperties};
use imscamera_jni::contract::EntryPoint;
use imscamera_jni::dispatch::{Dispatcher, bring_up};

#[derive(Parser, Debug)]
#[command(name = "imscamera_probe")]
struct Args {
    /// vendor camera library (default: the imscamera.impl.lib property)
    #[arg(long)]
    impl_lib: Option<PathBuf>,

    /// open this camera and run a preview cycle through the bridge
    #[arg(long)]
    exercise: Option<i32>,

    /// preview width used with --exercise
    #[arg(long, default_value_t = 640)]
    width: i32,

    /// preview height used with --exercise
    #[arg(long, default_value_t = 480)]
    height: i32,

    /// preview frame rate used with --exercise
    #[arg(long, default_value_t = 15)]
    fps: i32,
}

fn main() {
    imscamera_jni::logging::init();

    let args = Args::parse();

    let dispatcher = match &args.impl_lib {
        Some(path) => bring_up(
            &StaticProperties::new().with(IMPL_LIB_PROPERTY_NAME, path.display().to_string()),
        ),
        None => bring_up(&SystemProperties),
    };

    report(&dispatcher);

    if let Some(camera_id) = args.exercise {
        exercise(&dispatcher, camera_id, &args);
    }
}

fn report(dispatcher: &Dispatcher) {
    if !dispatcher.is_loaded() {
        tracing::warn!("no camera implementation loaded, every operation is unavailable");
        return;
    }
    for entry in EntryPoint::ALL {
        if dispatcher.provides(entry) {
            tracing::info!(symbol = %entry, "resolved");
        } else {
            tracing::warn!(symbol = %entry, "missing");
        }
    }
}

fn exercise(dispatcher: &Dispatcher, camera_id: i32, args: &Args) {
    let status = dispatcher.open(camera_id);
    tracing::info!(camera_id, status, "open");
    if status != 0 {
        return;
    }

    let status = dispatcher.set_preview_size(args.width, args.height);
    tracing::info!(status, width = args.width, height = args.height, "set_preview_size");
    tracing::info!(status = dispatcher.set_fps_range(args.fps), fps = args.fps, "set_fps_range");
    tracing::info!(status = dispatcher.set_display_orientation(0), "set_display_orientation");

    let zoom_supported = dispatcher.is_zoom_supported();
    let max_zoom = dispatcher.get_max_zoom();
    tracing::info!(zoom_supported, max_zoom, "zoom");
    if zoom_supported && max_zoom > 0 {
        dispatcher.set_zoom(max_zoom / 2);
    }

    tracing::info!(status = dispatcher.start_preview(), "start_preview");
    tracing::info!(status = dispatcher.stop_preview(), "stop_preview");
    tracing::info!(status = dispatcher.release(), "release");
}
