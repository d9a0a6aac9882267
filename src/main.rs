//! Hand-controlled color wheel: pinch the button to spin, grab the wheel to rotate.

use anyhow::Result;
use clap::Parser;
use hand_color_wheel::{
    app::{AppConfig, ColorWheelApp},
    config::Config,
};
use log::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long)]
    cam: Option<i32>,

    /// Number of colors on the wheel (clamped to the configured bounds)
    #[arg(short = 'n', long)]
    colors: Option<usize>,

    /// Path to the hand landmark ONNX model
    #[arg(short, long)]
    model: Option<String>,

    /// Disable hand tracking (keyboard control only)
    #[arg(long)]
    no_tracking: bool,

    /// Do not mirror the camera image
    #[arg(long)]
    no_mirror: bool,

    /// Seed for reproducible spins
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand-Controlled Color Wheel");
    debug!("Built for {} on {}", env!("BUILD_TARGET"), env!("BUILD_HOST"));

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(cam) = args.cam {
        config.display.camera_index = cam;
    }
    if let Some(model) = args.model {
        config.tracking.model = model.into();
    }
    if args.no_tracking {
        config.tracking.enabled = false;
    }
    if args.no_mirror {
        config.display.mirror = false;
    }

    config.validate()?;

    let app_config = AppConfig {
        config,
        num_colors: args.colors,
        seed: args.seed,
    };

    let mut app = ColorWheelApp::new(app_config)?;
    app.run()?;

    Ok(())
}
