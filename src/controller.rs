//! Per-frame orchestration between the hand tracker, the wheel and the renderer.

use crate::config::{ButtonConfig, Config};
use crate::gesture::{angle_from_center, is_pinching, thumb_pixel_position, HandLandmarks, Landmark};
use crate::layout::spin_button_rect;
use crate::utils::safe_cast::normalized_to_pixel;
use crate::wheel::{ColorWheelState, WheelSnapshot};
use log::debug;

/// Keyboard command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Start an auto-spin (space)
    Spin,
    /// Add a color (`+` or `=`)
    IncreaseColors,
    /// Remove a color (`-` or `_`)
    DecreaseColors,
    /// Leave the application (`q`)
    Quit,
    /// Any other key, or no key
    Ignored,
}

impl KeyCommand {
    /// Map a `highgui::wait_key` code to a command
    #[must_use]
    pub fn from_key(key: i32) -> Self {
        if key < 0 {
            return Self::Ignored;
        }
        match u8::try_from(key & 0xFF).map(char::from) {
            Ok(' ') => Self::Spin,
            Ok('+' | '=') => Self::IncreaseColors,
            Ok('-' | '_') => Self::DecreaseColors,
            Ok('q') => Self::Quit,
            _ => Self::Ignored,
        }
    }
}

/// Hand overlay data for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct HandOverlay {
    /// Index fingertip in pixels
    pub fingertip: (i32, i32),
    /// Thumb tip in pixels
    pub thumb: (i32, i32),
    /// Fingertip angle around the wheel center, degrees
    pub hand_angle: f64,
    /// Thumb and index are pinched
    pub is_pinching: bool,
    /// All landmarks in pixels, for the skeleton
    pub points: Vec<(i32, i32)>,
}

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Wheel state after this frame
    pub snapshot: WheelSnapshot,
    /// Tracked hand, if a usable one was observed
    pub hand: Option<HandOverlay>,
    /// A pinch on the spin button started a spin this frame
    pub spin_triggered: bool,
}

/// Feeds hand observations and key presses into the wheel state machine
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: ColorWheelState,
    button: ButtonConfig,
}

impl InteractionController {
    /// Wrap an existing wheel
    #[must_use]
    pub const fn new(state: ColorWheelState, button: ButtonConfig) -> Self {
        Self { state, button }
    }

    /// Build the wheel from configuration; `seed` makes spins reproducible
    #[must_use]
    pub fn from_config(config: &Config, num_colors: usize, seed: Option<u64>) -> Self {
        let params = config.wheel_params();
        let state = match seed {
            Some(seed) => ColorWheelState::with_seed(params, num_colors, seed),
            None => ColorWheelState::new(params, num_colors),
        };
        Self::new(state, config.button)
    }

    /// Wheel state
    #[must_use]
    pub const fn state(&self) -> &ColorWheelState {
        &self.state
    }

    /// Mutable wheel state
    pub fn state_mut(&mut self) -> &mut ColorWheelState {
        &mut self.state
    }

    /// Process one frame
    ///
    /// `observation` is the raw landmark set for the tracked hand, or `None`
    /// when no hand was found. A set that fails validation counts as no hand.
    pub fn process_frame(
        &mut self,
        frame_width: i32,
        frame_height: i32,
        observation: Option<Vec<Landmark>>,
    ) -> FrameOutcome {
        self.state.update_wheel_position(frame_width, frame_height);
        // Must precede gesture handling so a spin ending this frame unblocks grabbing
        self.state.update_auto_spin();
        let rect = spin_button_rect(self.state.wheel_center(), self.state.wheel_radius(), &self.button);
        self.state.set_button_rect(rect);

        let landmarks = observation.and_then(|points| match HandLandmarks::new(points) {
            Ok(landmarks) => Some(landmarks),
            Err(e) => {
                debug!("Discarding hand observation: {}", e);
                None
            }
        });

        let mut spin_triggered = false;
        let hand = match landmarks {
            Some(landmarks) => {
                let overlay = self.process_hand(&landmarks, frame_width, frame_height, &mut spin_triggered);
                Some(overlay)
            }
            None => {
                self.state.reset_hand_state();
                None
            }
        };

        FrameOutcome {
            snapshot: self.state.snapshot(),
            hand,
            spin_triggered,
        }
    }

    fn process_hand(
        &mut self,
        landmarks: &HandLandmarks,
        frame_width: i32,
        frame_height: i32,
        spin_triggered: &mut bool,
    ) -> HandOverlay {
        let (cx, cy) = self.state.wheel_center();
        let (hand_angle, hand_x, hand_y) = angle_from_center(landmarks, cx, cy, frame_width, frame_height);

        if self.state.check_button_interaction(landmarks, hand_x, hand_y) {
            *spin_triggered = self.state.start_auto_spin();
        }

        self.state.check_hand_near_wheel(hand_x, hand_y);

        let button = self.state.button_state();
        if !button.is_spinning && self.state.hand_near_wheel() && !button.is_hovered {
            self.state.update_manual_rotation(hand_angle);
        } else if !button.is_spinning {
            self.state.reset_manual_rotation();
        }

        HandOverlay {
            fingertip: (hand_x, hand_y),
            thumb: thumb_pixel_position(landmarks, frame_width, frame_height),
            hand_angle,
            is_pinching: is_pinching(landmarks, self.state.params().gesture.pinch_threshold),
            points: landmarks
                .points()
                .iter()
                .map(|p| (normalized_to_pixel(p.x, frame_width), normalized_to_pixel(p.y, frame_height)))
                .collect(),
        }
    }

    /// Apply a keyboard command to the wheel
    pub fn apply_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Spin => {
                self.state.start_auto_spin();
            }
            KeyCommand::IncreaseColors => self.state.increase_colors(),
            KeyCommand::DecreaseColors => self.state.decrease_colors(),
            KeyCommand::Quit | KeyCommand::Ignored => {}
        }
    }

    /// Decode and apply a key code, returning the command it mapped to
    pub fn handle_key(&mut self, key: i32) -> KeyCommand {
        let command = KeyCommand::from_key(key);
        self.apply_command(command);
        command
    }
}
