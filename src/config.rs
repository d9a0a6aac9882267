//! Configuration management for the hand color wheel application

use crate::constants::{
    DEFAULT_MAX_COLORS, DEFAULT_MAX_SPIN_SPEED, DEFAULT_MIN_COLORS, DEFAULT_MIN_SPIN_SPEED, DEFAULT_MIN_SPIN_VELOCITY,
    DEFAULT_NEAR_WHEEL_MULTIPLIER, DEFAULT_NUM_COLORS, DEFAULT_PINCH_THRESHOLD, DEFAULT_POINTER_ANGLE,
    DEFAULT_SPIN_DECELERATION,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wheel geometry and color count bounds
    pub wheel: WheelConfig,

    /// Auto-spin physics
    pub spin: SpinConfig,

    /// Gesture thresholds
    pub gesture: GestureConfig,

    /// Spin button layout
    pub button: ButtonConfig,

    /// Hand tracking provider
    pub tracking: TrackingConfig,

    /// Camera and window settings
    pub display: DisplayConfig,
}

/// Wheel geometry and color count bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Number of colors at startup
    pub default_num_colors: usize,

    /// Smallest allowed color count
    pub min_colors: usize,

    /// Largest allowed color count
    pub max_colors: usize,

    /// Horizontal distance from the frame's right edge to the wheel center, in pixels
    pub offset_from_right: i32,

    /// Radius cap is `offset_from_right - radius_margin`
    pub radius_margin: i32,

    /// Screen angle of the selection pointer, degrees (270 = top)
    pub pointer_angle: f64,

    /// Size of the center grab disk relative to the wheel radius
    pub center_radius_multiplier: f64,
}

/// Auto-spin physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Lower bound of the initial spin speed, degrees per frame
    pub min_speed: f64,

    /// Upper bound of the initial spin speed, degrees per frame
    pub max_speed: f64,

    /// Per-frame velocity multiplier, strictly between 0 and 1
    pub deceleration: f64,

    /// Spin stops once the absolute velocity drops below this
    pub min_velocity: f64,
}

/// Gesture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Normalized thumb-to-index distance under which the hand is pinching
    pub pinch_threshold: f64,

    /// Grab zone radius relative to the wheel radius
    pub near_wheel_multiplier: f64,
}

/// Spin button layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Button width in pixels
    pub width: i32,

    /// Button height in pixels
    pub height: i32,

    /// Gap between the bottom of the wheel and the top of the button
    pub offset_below_wheel: i32,
}

/// Hand tracking provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Run the hand landmark model; when false the wheel is keyboard-only
    pub enabled: bool,

    /// Path to the hand landmark ONNX model
    pub model: PathBuf,

    /// Minimum hand presence score to report a hand (0.0-1.0)
    pub detection_confidence: f32,
}

/// Camera and window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Camera index
    pub camera_index: i32,

    /// Mirror frames horizontally before processing
    pub mirror: bool,

    /// Window title
    pub window_title: String,

    /// Draw the tracked hand skeleton
    pub show_landmarks: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            default_num_colors: DEFAULT_NUM_COLORS,
            min_colors: DEFAULT_MIN_COLORS,
            max_colors: DEFAULT_MAX_COLORS,
            offset_from_right: 250,
            radius_margin: 50,
            pointer_angle: DEFAULT_POINTER_ANGLE,
            center_radius_multiplier: 0.3,
        }
    }
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_speed: DEFAULT_MIN_SPIN_SPEED,
            max_speed: DEFAULT_MAX_SPIN_SPEED,
            deceleration: DEFAULT_SPIN_DECELERATION,
            min_velocity: DEFAULT_MIN_SPIN_VELOCITY,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            near_wheel_multiplier: DEFAULT_NEAR_WHEEL_MULTIPLIER,
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 60,
            offset_below_wheel: 30,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: PathBuf::from("assets/hand_landmark.onnx"),
            detection_confidence: 0.7,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            mirror: true,
            window_title: "Hand-Controlled Color Wheel".to_string(),
            show_landmarks: true,
        }
    }
}

/// Immutable per-session parameters for the wheel state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelParams {
    /// Wheel geometry and color count bounds
    pub wheel: WheelConfig,
    /// Auto-spin physics
    pub spin: SpinConfig,
    /// Gesture thresholds
    pub gesture: GestureConfig,
}

impl WheelParams {
    /// Extract the state machine parameters from a full configuration
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            wheel: config.wheel,
            spin: config.spin,
            gesture: config.gesture,
        }
    }

    /// Repair values the state machine cannot run with
    ///
    /// Swapped color bounds are reordered. Spin physics and gesture values that
    /// are non-finite or out of range fall back to their defaults, so a spin
    /// always decays to rest.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let wheel = &mut self.wheel;
        if wheel.min_colors > wheel.max_colors {
            std::mem::swap(&mut wheel.min_colors, &mut wheel.max_colors);
        }
        wheel.min_colors = wheel.min_colors.max(1);
        wheel.max_colors = wheel.max_colors.max(wheel.min_colors);
        if !wheel.pointer_angle.is_finite() {
            wheel.pointer_angle = defaults.wheel.pointer_angle;
        }

        let spin = &mut self.spin;
        let speeds_usable = spin.min_speed.is_finite()
            && spin.max_speed.is_finite()
            && spin.min_speed >= 0.0
            && spin.max_speed >= 0.0;
        if !speeds_usable {
            spin.min_speed = defaults.spin.min_speed;
            spin.max_speed = defaults.spin.max_speed;
        }
        if !(spin.deceleration > 0.0 && spin.deceleration < 1.0) {
            spin.deceleration = defaults.spin.deceleration;
        }
        if !(spin.min_velocity.is_finite() && spin.min_velocity > 0.0) {
            spin.min_velocity = defaults.spin.min_velocity;
        }

        let gesture = &mut self.gesture;
        if !(gesture.pinch_threshold.is_finite() && gesture.pinch_threshold > 0.0) {
            gesture.pinch_threshold = defaults.gesture.pinch_threshold;
        }
        if !(gesture.near_wheel_multiplier.is_finite() && gesture.near_wheel_multiplier > 1.0) {
            gesture.near_wheel_multiplier = defaults.gesture.near_wheel_multiplier;
        }

        self
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Parameters for the wheel state machine
    #[must_use]
    pub const fn wheel_params(&self) -> WheelParams {
        WheelParams::from_config(self)
    }

    /// Validate configuration
    ///
    /// Model paths are not checked here; the tracker reports a missing model when it loads.
    pub fn validate(&self) -> Result<()> {
        // Color count bounds
        if self.wheel.min_colors < DEFAULT_MIN_COLORS {
            return Err(Error::ConfigError(format!(
                "Minimum color count must be at least {DEFAULT_MIN_COLORS}"
            )));
        }
        if self.wheel.max_colors < self.wheel.min_colors {
            return Err(Error::ConfigError(
                "Maximum color count must not be below the minimum".to_string(),
            ));
        }
        if !(self.wheel.min_colors..=self.wheel.max_colors).contains(&self.wheel.default_num_colors) {
            return Err(Error::ConfigError(format!(
                "Default color count {} is outside [{}, {}]",
                self.wheel.default_num_colors, self.wheel.min_colors, self.wheel.max_colors
            )));
        }
        if self.wheel.offset_from_right <= self.wheel.radius_margin {
            return Err(Error::ConfigError(
                "Wheel offset from right must exceed the radius margin".to_string(),
            ));
        }
        if !self.wheel.pointer_angle.is_finite() {
            return Err(Error::ConfigError("Pointer angle must be finite".to_string()));
        }
        if !(0.0..1.0).contains(&self.wheel.center_radius_multiplier) {
            return Err(Error::ConfigError(
                "Center radius multiplier must be between 0.0 and 1.0".to_string(),
            ));
        }

        // Spin physics
        if !(self.spin.min_speed > 0.0 && self.spin.min_speed <= self.spin.max_speed && self.spin.max_speed.is_finite()) {
            return Err(Error::ConfigError(
                "Spin speeds must satisfy 0 < min_speed <= max_speed".to_string(),
            ));
        }
        if !(self.spin.deceleration > 0.0 && self.spin.deceleration < 1.0) {
            return Err(Error::ConfigError(
                "Spin deceleration must be strictly between 0.0 and 1.0".to_string(),
            ));
        }
        if !(self.spin.min_velocity.is_finite() && self.spin.min_velocity > 0.0) {
            return Err(Error::ConfigError("Minimum spin velocity must be positive".to_string()));
        }

        // Gestures
        if !(self.gesture.pinch_threshold.is_finite() && self.gesture.pinch_threshold > 0.0) {
            return Err(Error::ConfigError("Pinch threshold must be positive".to_string()));
        }
        if !(self.gesture.near_wheel_multiplier.is_finite() && self.gesture.near_wheel_multiplier > 1.0) {
            return Err(Error::ConfigError(
                "Near-wheel multiplier must be greater than 1.0".to_string(),
            ));
        }

        // Layout
        if self.button.width <= 0 || self.button.height <= 0 {
            return Err(Error::ConfigError("Button dimensions must be positive".to_string()));
        }

        if !(0.0..=1.0).contains(&self.tracking.detection_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand-Controlled Color Wheel Configuration

# Wheel geometry and color count
wheel:
  default_num_colors: 8
  min_colors: 3
  max_colors: 20
  offset_from_right: 250
  radius_margin: 50
  pointer_angle: 270.0
  center_radius_multiplier: 0.3

# Auto-spin physics (degrees per frame)
spin:
  min_speed: 15.0
  max_speed: 30.0
  deceleration: 0.98
  min_velocity: 0.1

# Gesture thresholds
gesture:
  pinch_threshold: 0.05
  near_wheel_multiplier: 1.5

# Spin button layout
button:
  width: 160
  height: 60
  offset_below_wheel: 30

# Hand tracking
tracking:
  enabled: true
  model: "assets/hand_landmark.onnx"
  detection_confidence: 0.7

# Camera and window
display:
  camera_index: 0
  mirror: true
  window_title: "Hand-Controlled Color Wheel"
  show_landmarks: true
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.wheel, defaults.wheel);
        assert_eq!(parsed.spin, defaults.spin);
        assert_eq!(parsed.gesture, defaults.gesture);
        assert_eq!(parsed.button, defaults.button);
        assert_eq!(parsed.tracking, defaults.tracking);
        assert_eq!(parsed.display, defaults.display);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed = Config::from_yaml("spin:\n  deceleration: 0.9\n").unwrap();
        assert_eq!(parsed.spin.deceleration, 0.9);
        assert_eq!(parsed.spin.min_speed, DEFAULT_MIN_SPIN_SPEED);
        assert_eq!(parsed.wheel.max_colors, DEFAULT_MAX_COLORS);
    }

    #[test]
    fn test_sanitized_repairs_params() {
        let mut params = WheelParams::default();
        params.wheel.min_colors = 12;
        params.wheel.max_colors = 4;
        params.spin.deceleration = f64::NAN;
        params.gesture.near_wheel_multiplier = 0.5;

        let fixed = params.sanitized();
        assert_eq!((fixed.wheel.min_colors, fixed.wheel.max_colors), (4, 12));
        assert_eq!(fixed.spin.deceleration, DEFAULT_SPIN_DECELERATION);
        assert_eq!(fixed.gesture.near_wheel_multiplier, DEFAULT_NEAR_WHEEL_MULTIPLIER);
        assert_eq!(WheelParams::default().sanitized(), WheelParams::default());
    }

    #[test]
    fn test_rejects_non_decaying_spin() {
        let mut config = Config::default();
        config.spin.deceleration = 1.0;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
