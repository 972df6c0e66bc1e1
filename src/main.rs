//! Virtual mouse application: move and click the pointer with hand gestures.

use anyhow::Result;
use clap::Parser;
use log::info;
use virtual_mouse::{
    app::{AppConfig, VideoSource, VirtualMouseApp},
    config::Config,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long)]
    cam: Option<i32>,

    /// Video file to process instead of a camera
    #[arg(short, long)]
    video: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Hand landmark ONNX model
    #[arg(short, long)]
    model: Option<String>,

    /// Pixels trimmed from each frame edge to form the active region
    #[arg(long)]
    margin: Option<i32>,

    /// Smoothing divisor (1 disables smoothing)
    #[arg(short, long)]
    smoothing: Option<f64>,

    /// Fingertip distance in pixels below which a pinch clicks
    #[arg(long)]
    click_distance: Option<f64>,

    /// Minimum milliseconds between clicks
    #[arg(long)]
    click_delay: Option<u64>,

    /// Do not open the camera window
    #[arg(long)]
    no_gui: bool,

    /// Track gestures without moving the system pointer
    #[arg(long)]
    no_cursor: bool,

    /// Reject pointer targets in screen corners
    #[arg(long)]
    fail_safe: bool,

    /// Print the example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Apply command line overrides on top of file settings
    fn apply(&self, settings: &mut Config) {
        if let Some(cam) = self.cam {
            settings.camera.index = cam;
        }
        if let Some(model) = &self.model {
            settings.model.hand_landmarks = model.into();
        }
        if let Some(margin) = self.margin {
            settings.tracking.frame_margin = margin;
        }
        if let Some(smoothing) = self.smoothing {
            settings.tracking.smoothing = smoothing;
        }
        if let Some(distance) = self.click_distance {
            settings.click.distance = distance;
        }
        if let Some(delay) = self.click_delay {
            settings.click.delay_ms = delay;
        }
        if self.no_gui {
            settings.display.show_window = false;
        }
        if self.no_cursor {
            settings.cursor.enabled = false;
        }
        if self.fail_safe {
            settings.cursor.fail_safe = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", virtual_mouse::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    info!("Virtual Mouse");

    let mut settings = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply(&mut settings);

    let config = AppConfig {
        video_source: match &args.video {
            Some(path) => VideoSource::File(path.clone()),
            None => VideoSource::Camera(settings.camera.index),
        },
        settings,
    };

    let mut app = VirtualMouseApp::new(config)?;

    // Without a window there is no key to press, so Ctrl-C ends the loop
    let stop = app.stop_flag();
    ctrlc::set_handler(move || stop.request())?;

    app.run()?;

    Ok(())
}
