//! Hand-controlled color wheel library.
//!
//! A segmented color wheel is driven by a stream of hand landmarks:
//! - pinching thumb and index finger over the spin button starts an auto-spin
//!   whose velocity decays until the wheel stops on a color
//! - moving the index fingertip around the wheel inside the grab zone rotates it
//! - the keyboard can start a spin and change the number of colors
//!
//! The pipeline is: hand tracker → gesture geometry → wheel state machine →
//! snapshot → renderer. Only the tracker and renderer touch `OpenCV` types.
//!
//! # Examples
//!
//! ## Driving the wheel without a camera
//!
//! ```
//! use hand_color_wheel::{
//!     config::Config,
//!     constants::{INDEX_TIP, NUM_HAND_LANDMARKS, THUMB_TIP},
//!     controller::InteractionController,
//!     gesture::Landmark,
//! };
//!
//! let mut controller = InteractionController::from_config(&Config::default(), 6, Some(42));
//!
//! // A 640x480 frame puts the wheel at (390, 240) with radius 160 and the
//! // spin button at x 310..470, y 430..490.
//! let mut points = vec![Landmark::default(); NUM_HAND_LANDMARKS];
//! points[INDEX_TIP] = Landmark::new(390.0 / 640.0, 460.0 / 480.0, 0.0);
//! points[THUMB_TIP] = points[INDEX_TIP];
//!
//! let outcome = controller.process_frame(640, 480, Some(points));
//! assert!(outcome.spin_triggered);
//! assert!(outcome.snapshot.button.is_spinning);
//! ```
//!
//! ## Stepping the state machine directly
//!
//! ```
//! use hand_color_wheel::{config::WheelParams, wheel::ColorWheelState};
//!
//! let mut wheel = ColorWheelState::with_seed(WheelParams::default(), 6, 1);
//! assert_eq!(wheel.selected_color_index(), 4);
//!
//! wheel.update_manual_rotation(170.0);
//! wheel.update_manual_rotation(-170.0);
//! assert!((wheel.rotation_angle() - 20.0).abs() < 1e-9);
//! ```

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

/// Palette generation and color conversion
pub mod palette;

/// Angle arithmetic and numeric conversions
pub mod utils;

/// Pure geometry on hand landmarks (pinch, fingertip position, angles)
pub mod gesture;

/// Wheel state machine: rotation, auto-spin, grab tracking, spin button
pub mod wheel;

/// Screen layout shared by hit-testing and drawing
pub mod layout;

/// Per-frame orchestration and keyboard commands
pub mod controller;

/// Hand-tracking providers
pub mod hand_tracking;

/// `OpenCV` rendering of wheel snapshots
pub mod renderer;

/// Main application module
pub mod app;

pub use error::{Error, Result};
