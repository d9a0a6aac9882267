//! Wheel state machine.
//!
//! Owns the rotation angle, palette, auto-spin physics, manual grab-rotation
//! tracking and spin-button state. The interaction mode is an explicit enum so
//! that manual tracking and auto-spin can never be active together:
//!
//! - `Idle` → (pinch on button or keyboard) → `AutoSpinning` → (velocity decays) → `Idle`
//! - `Idle` → (hand in grab zone, not over button) → `Grabbing` → (hand leaves, lost, or over button) → `Idle`
//! - `AutoSpinning` ignores manual rotation until it ends.

use crate::config::WheelParams;
use crate::gesture::{euclidean_distance, is_pinching, HandLandmarks};
use crate::palette::{Bgr, Palette};
use crate::utils::{shortest_angle_delta, wrap_degrees};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Current interaction mode of the wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    /// Nothing drives the wheel
    Idle,
    /// A hand is in the grab zone; rotation follows its angle around the center
    Grabbing {
        /// Hand-to-center angle seen on the previous frame, degrees
        prev_hand_angle: f64,
        /// True once at least one delta has been applied
        is_rotating: bool,
    },
    /// Physics-driven spin with decaying velocity
    AutoSpinning {
        /// Signed velocity in degrees per frame
        velocity: f64,
    },
}

/// Screen rectangle of the spin button, edges inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl ButtonRect {
    /// Create a rectangle from its top-left corner and size
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// True when the point lies on or inside the rectangle
    #[must_use]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        self.x <= px && px <= self.x + self.width && self.y <= py && py <= self.y + self.height
    }
}

/// Spin button state handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Wheel is auto-spinning
    pub is_spinning: bool,
    /// Fingertip is over the button
    pub is_hovered: bool,
    /// Press latch is set
    pub is_pressed: bool,
}

#[derive(Debug, Clone, Copy)]
struct SpinButton {
    rect: Option<ButtonRect>,
    hovered: bool,
    pressed: bool,
    // Cleared by a triggering pinch; set again once the pinch is released or the hand leaves
    armed: bool,
}

impl Default for SpinButton {
    fn default() -> Self {
        Self {
            rect: None,
            hovered: false,
            pressed: false,
            armed: true,
        }
    }
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSnapshot {
    /// Wheel center in pixels
    pub center: (i32, i32),
    /// Wheel radius in pixels
    pub radius: i32,
    /// Segment colors, index-aligned to segments
    pub palette: Vec<Bgr>,
    /// Current rotation, `[0, 360)`
    pub rotation_angle: f64,
    /// Screen angle of the selection pointer
    pub pointer_angle: f64,
    /// Hand is inside the grab zone
    pub hand_near_wheel: bool,
    /// A grab gesture has moved the wheel and is still in progress
    pub is_rotating: bool,
    /// Spin button state
    pub button: ButtonState,
    /// Spin button placement, once established
    pub button_rect: Option<ButtonRect>,
    /// Index of the color under the pointer
    pub selected_index: usize,
    /// Color under the pointer
    pub selected_color: Bgr,
}

/// Index of the segment under the pointer
///
/// Segment `i` spans `[i * step + rotation, (i + 1) * step + rotation)` in screen degrees.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn selected_color_index(pointer_angle: f64, rotation_angle: f64, num_colors: usize) -> usize {
    if num_colors == 0 {
        return 0;
    }
    let angle_per_segment = 360.0 / num_colors as f64;
    let segment_angle = wrap_degrees(pointer_angle - rotation_angle);
    ((segment_angle / angle_per_segment).floor() as usize) % num_colors
}

/// Authoritative wheel state for one session
#[derive(Debug, Clone)]
pub struct ColorWheelState {
    params: WheelParams,
    palette: Palette,
    rotation_angle: f64,
    mode: InteractionMode,
    hand_near_wheel: bool,
    button: SpinButton,
    wheel_center: (i32, i32),
    wheel_radius: i32,
    rng: StdRng,
}

impl ColorWheelState {
    /// Create a wheel with `num_colors` segments (clamped to the configured bounds)
    ///
    /// Unusable parameters are repaired with [`WheelParams::sanitized`] rather than rejected.
    #[must_use]
    pub fn new(params: WheelParams, num_colors: usize) -> Self {
        Self::with_rng(params, num_colors, StdRng::from_entropy())
    }

    /// Create a wheel whose spins are reproducible from `seed`
    #[must_use]
    pub fn with_seed(params: WheelParams, num_colors: usize, seed: u64) -> Self {
        Self::with_rng(params, num_colors, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: WheelParams, num_colors: usize, rng: StdRng) -> Self {
        let sanitized = params.sanitized();
        if sanitized != params {
            warn!("Wheel parameters out of range, using {:?}", sanitized);
        }
        let params = sanitized;
        let num_colors = num_colors.clamp(params.wheel.min_colors, params.wheel.max_colors);
        Self {
            params,
            palette: Palette::generate(num_colors),
            rotation_angle: 0.0,
            mode: InteractionMode::Idle,
            hand_near_wheel: false,
            button: SpinButton::default(),
            wheel_center: (0, 0),
            wheel_radius: 0,
            rng,
        }
    }

    /// Session parameters
    #[must_use]
    pub const fn params(&self) -> &WheelParams {
        &self.params
    }

    /// Current number of segments
    #[must_use]
    pub fn num_colors(&self) -> usize {
        self.palette.len()
    }

    /// Current palette
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Angular width of one segment
    #[must_use]
    pub fn angle_per_segment(&self) -> f64 {
        self.palette.angle_per_segment()
    }

    /// Rotation angle in `[0, 360)`
    #[must_use]
    pub const fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Place the wheel at an absolute angle (wrapped)
    pub fn set_rotation_angle(&mut self, angle: f64) {
        self.rotation_angle = wrap_degrees(angle);
    }

    /// Current interaction mode
    #[must_use]
    pub const fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// True while auto-spinning
    #[must_use]
    pub const fn is_auto_spinning(&self) -> bool {
        matches!(self.mode, InteractionMode::AutoSpinning { .. })
    }

    /// Signed spin velocity; zero unless auto-spinning
    #[must_use]
    pub const fn spin_velocity(&self) -> f64 {
        match self.mode {
            InteractionMode::AutoSpinning { velocity } => velocity,
            _ => 0.0,
        }
    }

    /// Hand angle from the previous grab frame, if a grab is in progress
    #[must_use]
    pub const fn prev_hand_angle(&self) -> Option<f64> {
        match self.mode {
            InteractionMode::Grabbing { prev_hand_angle, .. } => Some(prev_hand_angle),
            _ => None,
        }
    }

    /// True once a grab gesture has moved the wheel
    #[must_use]
    pub const fn is_rotating(&self) -> bool {
        matches!(self.mode, InteractionMode::Grabbing { is_rotating: true, .. })
    }

    /// Hand was inside the grab zone on the last check
    #[must_use]
    pub const fn hand_near_wheel(&self) -> bool {
        self.hand_near_wheel
    }

    /// Wheel center in pixels
    #[must_use]
    pub const fn wheel_center(&self) -> (i32, i32) {
        self.wheel_center
    }

    /// Wheel radius in pixels
    #[must_use]
    pub const fn wheel_radius(&self) -> i32 {
        self.wheel_radius
    }

    /// Spin button state triple
    #[must_use]
    pub const fn button_state(&self) -> ButtonState {
        ButtonState {
            is_spinning: self.is_auto_spinning(),
            is_hovered: self.button.hovered,
            is_pressed: self.button.pressed,
        }
    }

    /// Spin button placement, if established
    #[must_use]
    pub const fn button_rect(&self) -> Option<ButtonRect> {
        self.button.rect
    }

    /// Establish or move the spin button
    pub fn set_button_rect(&mut self, rect: ButtonRect) {
        self.button.rect = Some(rect);
    }

    /// Recompute wheel placement from the frame size
    ///
    /// The center sits a fixed offset in from the right edge, vertically centered;
    /// the radius is capped by both the side margin and a third of the frame height.
    pub fn update_wheel_position(&mut self, frame_width: i32, frame_height: i32) {
        let wheel = &self.params.wheel;
        self.wheel_center = (frame_width - wheel.offset_from_right, frame_height / 2);
        self.wheel_radius = (wheel.offset_from_right - wheel.radius_margin).min(frame_height / 3);
    }

    /// Set the color count, clamped to the configured bounds
    pub fn set_num_colors(&mut self, num_colors: usize) {
        let clamped = num_colors.clamp(self.params.wheel.min_colors, self.params.wheel.max_colors);
        if clamped != self.palette.len() {
            self.palette = Palette::generate(clamped);
            info!("Color count set to {}", clamped);
        }
    }

    /// Add one color; no-op at the maximum
    pub fn increase_colors(&mut self) {
        if self.num_colors() < self.params.wheel.max_colors {
            self.set_num_colors(self.num_colors() + 1);
        }
    }

    /// Remove one color; no-op at the minimum
    pub fn decrease_colors(&mut self) {
        if self.num_colors() > self.params.wheel.min_colors {
            self.set_num_colors(self.num_colors() - 1);
        }
    }

    /// Start an auto-spin with a random speed and direction
    ///
    /// Returns false (and changes nothing) if a spin is already running.
    pub fn start_auto_spin(&mut self) -> bool {
        if self.is_auto_spinning() {
            return false;
        }
        let spin = &self.params.spin;
        let (low, high) = if spin.min_speed <= spin.max_speed {
            (spin.min_speed, spin.max_speed)
        } else {
            (spin.max_speed, spin.min_speed)
        };
        let speed = self.rng.gen_range(low..=high);
        let velocity = if self.rng.gen_bool(0.5) { -speed } else { speed };
        self.start_auto_spin_with_velocity(velocity)
    }

    /// Start an auto-spin with a given signed velocity in degrees per frame
    ///
    /// Returns false (and changes nothing) if a spin is already running.
    pub fn start_auto_spin_with_velocity(&mut self, velocity: f64) -> bool {
        if self.is_auto_spinning() {
            return false;
        }
        self.mode = InteractionMode::AutoSpinning { velocity };
        info!("Wheel is spinning at {:.1} deg/frame", velocity);
        true
    }

    /// Advance the auto-spin by one frame
    ///
    /// Velocity decays geometrically and snaps to zero below the configured
    /// minimum, which also releases the button latch.
    pub fn update_auto_spin(&mut self) {
        let InteractionMode::AutoSpinning { velocity } = self.mode else {
            return;
        };

        self.rotation_angle = wrap_degrees(self.rotation_angle + velocity);
        let velocity = velocity * self.params.spin.deceleration;

        if velocity.abs() < self.params.spin.min_velocity {
            self.mode = InteractionMode::Idle;
            self.button.pressed = false;
            info!(
                "Wheel stopped at {:.1}°, selected color {}",
                self.rotation_angle,
                self.selected_color_index()
            );
        } else {
            self.mode = InteractionMode::AutoSpinning { velocity };
        }
    }

    /// Update and return whether the hand is inside the grab zone
    pub fn check_hand_near_wheel(&mut self, hand_x: i32, hand_y: i32) -> bool {
        let distance = euclidean_distance(
            f64::from(hand_x),
            f64::from(hand_y),
            f64::from(self.wheel_center.0),
            f64::from(self.wheel_center.1),
        );
        self.hand_near_wheel =
            distance < f64::from(self.wheel_radius) * self.params.gesture.near_wheel_multiplier;
        self.hand_near_wheel
    }

    /// Update hover/press state; returns true only on the frame a spin should start
    ///
    /// A pinch over the button triggers once. It cannot trigger again until the
    /// pinch is released or the fingertip leaves the button, and never while spinning.
    pub fn check_button_interaction(&mut self, landmarks: &HandLandmarks, hand_x: i32, hand_y: i32) -> bool {
        let Some(rect) = self.button.rect else {
            return false;
        };
        let spinning = self.is_auto_spinning();

        if rect.contains(hand_x, hand_y) {
            self.button.hovered = true;

            if !is_pinching(landmarks, self.params.gesture.pinch_threshold) {
                self.button.armed = true;
                return false;
            }

            if !spinning && !self.button.pressed && self.button.armed {
                self.button.pressed = true;
                self.button.armed = false;
                debug!("Spin button pinched at ({}, {})", hand_x, hand_y);
                return true;
            }
        } else {
            self.button.hovered = false;
            self.button.armed = true;
            if !spinning {
                self.button.pressed = false;
            }
        }

        false
    }

    /// Follow the hand around the wheel center
    ///
    /// The first call of a grab only records the angle. Later calls rotate the
    /// wheel by the shortest angular step since the previous frame. Ignored while
    /// auto-spinning.
    pub fn update_manual_rotation(&mut self, current_hand_angle: f64) {
        match self.mode {
            InteractionMode::AutoSpinning { .. } => {}
            InteractionMode::Idle => {
                self.mode = InteractionMode::Grabbing {
                    prev_hand_angle: current_hand_angle,
                    is_rotating: false,
                };
            }
            InteractionMode::Grabbing { prev_hand_angle, .. } => {
                let delta = shortest_angle_delta(prev_hand_angle, current_hand_angle);
                self.rotation_angle = wrap_degrees(self.rotation_angle + delta);
                self.mode = InteractionMode::Grabbing {
                    prev_hand_angle: current_hand_angle,
                    is_rotating: true,
                };
            }
        }
    }

    /// End any grab in progress; auto-spin is left untouched
    pub fn reset_manual_rotation(&mut self) {
        if !self.is_auto_spinning() {
            self.mode = InteractionMode::Idle;
        }
    }

    /// Clear hand-derived state after the hand is lost
    pub fn reset_hand_state(&mut self) {
        self.hand_near_wheel = false;
        self.button.hovered = false;
        self.button.armed = true;
        if !self.is_auto_spinning() {
            self.button.pressed = false;
            self.mode = InteractionMode::Idle;
        }
    }

    /// Index of the color currently under the pointer
    #[must_use]
    pub fn selected_color_index(&self) -> usize {
        selected_color_index(self.params.wheel.pointer_angle, self.rotation_angle, self.num_colors())
    }

    /// Color currently under the pointer
    #[must_use]
    pub fn selected_color(&self) -> Bgr {
        self.palette.get(self.selected_color_index()).unwrap_or_default()
    }

    /// Capture the drawable state
    #[must_use]
    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot {
            center: self.wheel_center,
            radius: self.wheel_radius,
            palette: self.palette.colors().to_vec(),
            rotation_angle: self.rotation_angle,
            pointer_angle: self.params.wheel.pointer_angle,
            hand_near_wheel: self.hand_near_wheel,
            is_rotating: self.is_rotating(),
            button: self.button_state(),
            button_rect: self.button.rect,
            selected_index: self.selected_color_index(),
            selected_color: self.selected_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(num_colors: usize) -> ColorWheelState {
        ColorWheelState::with_seed(WheelParams::default(), num_colors, 7)
    }

    #[test]
    fn test_initial_state() {
        let state = wheel(8);
        assert_eq!(state.num_colors(), 8);
        assert_eq!(state.rotation_angle(), 0.0);
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert_eq!(state.button_state(), ButtonState::default());
        assert!(state.button_rect().is_none());
    }

    #[test]
    fn test_constructor_clamps() {
        assert_eq!(wheel(1).num_colors(), 3);
        assert_eq!(wheel(100).num_colors(), 20);
    }

    #[test]
    fn test_wheel_position() {
        let mut state = wheel(8);
        state.update_wheel_position(1280, 720);
        assert_eq!(state.wheel_center(), (1030, 360));
        assert_eq!(state.wheel_radius(), 200);

        state.update_wheel_position(640, 480);
        assert_eq!(state.wheel_center(), (390, 240));
        assert_eq!(state.wheel_radius(), 160);
    }

    #[test]
    fn test_selected_index_at_rest() {
        // floor(270 / 60) mod 6 = 4
        assert_eq!(wheel(6).selected_color_index(), 4);
        assert_eq!(selected_color_index(270.0, 0.0, 6), 4);
    }

    #[test]
    fn test_selected_index_follows_rotation() {
        assert_eq!(selected_color_index(270.0, 30.0, 6), 4);
        assert_eq!(selected_color_index(270.0, 31.0, 6), 3);
        assert_eq!(selected_color_index(270.0, 300.0, 6), 5);
        assert_eq!(selected_color_index(270.0, 359.999, 6), 4);
    }

    #[test]
    fn test_spin_start_is_idempotent() {
        let mut state = wheel(8);
        assert!(state.start_auto_spin());
        let velocity = state.spin_velocity();
        assert!((15.0..=30.0).contains(&velocity.abs()));
        assert!(!state.start_auto_spin());
        assert_eq!(state.spin_velocity(), velocity);
    }

    #[test]
    fn test_spin_advances_and_decays() {
        let mut state = wheel(8);
        state.start_auto_spin_with_velocity(20.0);
        state.update_auto_spin();
        assert!((state.rotation_angle() - 20.0).abs() < 1e-12);
        assert!((state.spin_velocity() - 19.6).abs() < 1e-12);
    }

    #[test]
    fn test_negative_spin_wraps() {
        let mut state = wheel(8);
        state.start_auto_spin_with_velocity(-20.0);
        state.update_auto_spin();
        assert!((state.rotation_angle() - 340.0).abs() < 1e-12);
    }

    #[test]
    fn test_manual_rotation_ignored_while_spinning() {
        let mut state = wheel(8);
        state.start_auto_spin_with_velocity(20.0);
        state.update_manual_rotation(10.0);
        state.update_manual_rotation(50.0);
        assert_eq!(state.rotation_angle(), 0.0);
        assert!(state.prev_hand_angle().is_none());
    }

    #[test]
    fn test_reset_manual_rotation_keeps_spin() {
        let mut state = wheel(8);
        state.start_auto_spin_with_velocity(20.0);
        state.reset_manual_rotation();
        assert!(state.is_auto_spinning());
    }
}
