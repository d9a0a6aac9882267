//! Main application module: camera loop, tracking, wheel update and display.

use crate::{
    config::Config,
    controller::{InteractionController, KeyCommand},
    error::{Error, Result},
    hand_tracking::{HandLandmarkDetector, HandTracker, NullTracker},
    renderer::WheelRenderer,
};
use log::{info, warn};
use opencv::{
    core::Mat,
    highgui::{self, WINDOW_AUTOSIZE},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE},
};
use std::time::{Duration, Instant};

/// Consecutive failed reads tolerated before giving up on the camera
const MAX_FAILED_READS: u32 = 30;

/// Runtime options layered over the configuration file
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Loaded (or default) configuration
    pub config: Config,
    /// Starting color count; the configured default when `None`
    pub num_colors: Option<usize>,
    /// Seed for reproducible spins
    pub seed: Option<u64>,
}

/// Main application struct
pub struct ColorWheelApp {
    config: Config,
    controller: InteractionController,
    tracker: Box<dyn HandTracker>,
    renderer: WheelRenderer,
    video_capture: VideoCapture,
}

impl ColorWheelApp {
    /// Open the camera, load the tracker and create the window
    ///
    /// # Errors
    ///
    /// Returns an error if the camera cannot be opened, the hand model cannot
    /// be loaded, or the window cannot be created.
    pub fn new(app_config: AppConfig) -> Result<Self> {
        info!("Initializing Hand-Controlled Color Wheel");
        let AppConfig { config, num_colors, seed } = app_config;

        let index = config.display.camera_index;
        info!("Opening camera {}", index);
        let mut video_capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !video_capture.is_opened()? {
            return Err(Error::Camera(format!("Could not open camera {index}")));
        }
        // Reduce buffer size for lower latency
        video_capture.set(CAP_PROP_BUFFERSIZE, 1.0)?;

        let tracker: Box<dyn HandTracker> = if config.tracking.enabled {
            Box::new(HandLandmarkDetector::new(
                &config.tracking.model,
                config.tracking.detection_confidence,
            )?)
        } else {
            info!("Hand tracking disabled, keyboard control only");
            Box::new(NullTracker)
        };
        info!("Using {} for hand tracking", tracker.name());

        let num_colors = num_colors.unwrap_or(config.wheel.default_num_colors);
        let controller = InteractionController::from_config(&config, num_colors, seed);
        let renderer = WheelRenderer::new(config.wheel.center_radius_multiplier, config.display.show_landmarks);

        highgui::named_window(&config.display.window_title, WINDOW_AUTOSIZE)?;

        Ok(Self {
            config,
            controller,
            tracker,
            renderer,
            video_capture,
        })
    }

    /// Run the main application loop until the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if the camera stops delivering frames or a display call fails.
    pub fn run(&mut self) -> Result<()> {
        print_instructions();
        info!("Starting main application loop");

        let mut frame_count: u64 = 0;
        let mut failed_reads = 0;
        let start_time = Instant::now();
        let mut last_fps_update = Instant::now();
        let mut fps = 0.0;

        loop {
            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                failed_reads += 1;
                if failed_reads >= MAX_FAILED_READS {
                    return Err(Error::Camera("Failed to capture frame".to_string()));
                }
                warn!("Failed to read frame, retrying...");
                continue;
            }
            failed_reads = 0;

            if self.config.display.mirror {
                let temp = frame.clone();
                opencv::core::flip(&temp, &mut frame, 1)?;
            }

            let observation = match self.tracker.detect(&frame) {
                Ok(observation) => observation,
                Err(e) => {
                    warn!("Hand tracking failed: {}", e);
                    None
                }
            };

            let outcome = self.controller.process_frame(frame.cols(), frame.rows(), observation);

            frame_count += 1;
            if last_fps_update.elapsed() >= Duration::from_secs(1) {
                #[allow(clippy::cast_precision_loss)]
                {
                    fps = frame_count as f64 / start_time.elapsed().as_secs_f64();
                }
                last_fps_update = Instant::now();
            }

            self.renderer.draw(&mut frame, &outcome, fps)?;
            highgui::imshow(&self.config.display.window_title, &frame)?;

            let key = highgui::wait_key(1)?;
            if self.controller.handle_key(key) == KeyCommand::Quit {
                info!("Exit requested by user");
                break;
            }
        }

        info!("Application shutting down");
        highgui::destroy_all_windows()?;
        Ok(())
    }
}

fn print_instructions() {
    info!("Controls:");
    info!("  - PINCH (thumb + index finger) over the SPIN button to auto-spin");
    info!("  - OR press SPACEBAR to auto-spin the wheel");
    info!("  - OR move your hand near the wheel to grab and rotate manually");
    info!("  - The top indicator shows which color is selected");
    info!("  - Press '+' / '-' to change the number of colors");
    info!("  - Press 'q' to quit");
}
