//! Wheel state machine properties and behavior

use hand_color_wheel::{
    config::WheelParams,
    wheel::{selected_color_index, ColorWheelState, InteractionMode},
};
use proptest::prelude::*;

fn wheel(num_colors: usize) -> ColorWheelState {
    ColorWheelState::with_seed(WheelParams::default(), num_colors, 11)
}

#[test]
fn test_initial_state() {
    let state = wheel(8);
    assert_eq!(state.num_colors(), 8);
    assert_eq!(state.rotation_angle(), 0.0);
    assert_eq!(state.mode(), InteractionMode::Idle);
    assert!(!state.is_auto_spinning());
    assert!(!state.hand_near_wheel());
    assert!(state.button_rect().is_none());
}

#[test]
fn test_initial_selection_with_six_colors() {
    // Pointer at 270°, segments of 60°: 270 / 60 = 4.5
    assert_eq!(wheel(6).selected_color_index(), 4);
}

#[test]
fn test_set_num_colors_clamps() {
    let mut state = wheel(8);
    state.set_num_colors(1);
    assert_eq!(state.num_colors(), 3);
    state.set_num_colors(100);
    assert_eq!(state.num_colors(), 20);
    state.set_num_colors(12);
    assert_eq!(state.num_colors(), 12);
    assert_eq!(state.palette().len(), 12);
}

#[test]
fn test_manual_rotation_wraps_forward() {
    let mut state = wheel(8);
    state.update_manual_rotation(170.0);
    state.update_manual_rotation(-170.0);
    assert!((state.rotation_angle() - 20.0).abs() < 1e-9);
}

#[test]
fn test_manual_rotation_wraps_backward() {
    let mut state = wheel(8);
    state.update_manual_rotation(-170.0);
    state.update_manual_rotation(170.0);
    assert!((state.rotation_angle() - 340.0).abs() < 1e-9);
}

#[test]
fn test_first_grab_frame_does_not_rotate() {
    let mut state = wheel(8);
    state.set_rotation_angle(45.0);
    state.update_manual_rotation(120.0);
    assert_eq!(state.rotation_angle(), 45.0);
    assert!(!state.is_rotating());
    assert_eq!(state.prev_hand_angle(), Some(120.0));
}

#[test]
fn test_spin_decays_and_stops() {
    let mut state = wheel(8);
    assert!(state.start_auto_spin_with_velocity(30.0));

    let mut frames = 0;
    let mut last_speed = state.spin_velocity().abs();
    while state.is_auto_spinning() {
        state.update_auto_spin();
        frames += 1;
        let speed = state.spin_velocity().abs();
        assert!(speed <= last_speed);
        last_speed = speed;
        assert!(frames < 1000, "spin did not terminate");
    }

    // 30 * 0.98^n < 0.1 first holds at n = 283
    assert_eq!(frames, 283);
    assert_eq!(state.spin_velocity(), 0.0);
    assert_eq!(state.mode(), InteractionMode::Idle);
    assert!(!state.button_state().is_pressed);
}

#[test]
fn test_random_spin_within_configured_speed() {
    for seed in 0..50 {
        let mut state = ColorWheelState::with_seed(WheelParams::default(), 8, seed);
        assert!(state.start_auto_spin());
        let speed = state.spin_velocity().abs();
        assert!((15.0..=30.0).contains(&speed), "speed {speed} out of range");
    }
}

#[test]
fn test_spin_direction_varies() {
    let directions: Vec<bool> = (0..64)
        .map(|seed| {
            let mut state = ColorWheelState::with_seed(WheelParams::default(), 8, seed);
            state.start_auto_spin();
            state.spin_velocity() > 0.0
        })
        .collect();
    assert!(directions.iter().any(|&d| d));
    assert!(directions.iter().any(|&d| !d));
}

#[test]
fn test_manual_rotation_ignored_while_spinning() {
    let mut state = wheel(8);
    state.start_auto_spin_with_velocity(20.0);
    state.update_manual_rotation(10.0);
    state.update_manual_rotation(50.0);
    assert_eq!(state.rotation_angle(), 0.0);
    assert!(state.is_auto_spinning());
    assert_eq!(state.prev_hand_angle(), None);
}

#[test]
fn test_reset_manual_rotation_keeps_spin() {
    let mut state = wheel(8);
    state.start_auto_spin_with_velocity(-20.0);
    state.reset_manual_rotation();
    assert!(state.is_auto_spinning());
    assert_eq!(state.spin_velocity(), -20.0);
}

#[test]
fn test_grab_after_spin_starts_fresh() {
    let mut state = wheel(8);
    state.update_manual_rotation(10.0);
    state.start_auto_spin_with_velocity(0.1);
    state.update_auto_spin();
    assert!(!state.is_auto_spinning());

    let rotation = state.rotation_angle();
    state.update_manual_rotation(100.0);
    assert_eq!(state.rotation_angle(), rotation);
}

#[test]
fn test_selected_color_matches_palette() {
    let mut state = wheel(6);
    state.set_rotation_angle(31.0);
    assert_eq!(state.selected_color_index(), 3);
    assert_eq!(Some(state.selected_color()), state.palette().get(3));
}

#[test]
fn test_hand_near_wheel_threshold() {
    let mut state = wheel(8);
    state.update_wheel_position(1280, 720);
    // Zone radius is 1.5 x 200 = 300
    assert!(state.check_hand_near_wheel(1030 + 299, 360));
    assert!(!state.check_hand_near_wheel(1030 + 300, 360));
    assert!(!state.check_hand_near_wheel(0, 0));
}

#[test]
fn test_inverted_color_bounds_are_reordered() {
    let mut params = WheelParams::default();
    params.wheel.min_colors = 10;
    params.wheel.max_colors = 5;

    let mut state = ColorWheelState::with_seed(params, 8, 1);
    assert_eq!(state.num_colors(), 8);
    state.set_num_colors(2);
    assert_eq!(state.num_colors(), 5);
    state.set_num_colors(40);
    assert_eq!(state.num_colors(), 10);
}

#[test]
fn test_spin_terminates_with_unusable_physics() {
    let mut params = WheelParams::default();
    params.spin.deceleration = 1.0;
    params.spin.min_velocity = f64::NAN;

    let mut state = ColorWheelState::with_seed(params, 8, 1);
    assert!(state.start_auto_spin_with_velocity(30.0));
    let mut frames = 0;
    while state.is_auto_spinning() {
        state.update_auto_spin();
        frames += 1;
        assert!(frames < 1000, "spin did not terminate");
    }
    assert_eq!(state.spin_velocity(), 0.0);
}

#[test]
fn test_random_spin_with_swapped_speeds() {
    let mut params = WheelParams::default();
    params.spin.min_speed = 30.0;
    params.spin.max_speed = 15.0;

    let mut state = ColorWheelState::with_seed(params, 8, 9);
    assert!(state.start_auto_spin());
    assert!((15.0..=30.0).contains(&state.spin_velocity().abs()));
}

proptest! {
    #[test]
    fn prop_rotation_stays_in_range(angles in prop::collection::vec(-1000.0f64..1000.0, 1..50)) {
        let mut state = wheel(8);
        for angle in angles {
            state.update_manual_rotation(angle);
            let rotation = state.rotation_angle();
            prop_assert!((0.0..360.0).contains(&rotation));
        }
    }

    #[test]
    fn prop_spin_keeps_rotation_in_range(velocity in -30.0f64..30.0, frames in 1usize..400) {
        let mut state = wheel(8);
        state.start_auto_spin_with_velocity(velocity);
        for _ in 0..frames {
            state.update_auto_spin();
            prop_assert!((0.0..360.0).contains(&state.rotation_angle()));
        }
    }

    #[test]
    fn prop_selection_in_range(rotation in -720.0f64..720.0, n in 3usize..=20) {
        let index = selected_color_index(270.0, rotation, n);
        prop_assert!(index < n);
    }

    #[test]
    fn prop_num_colors_always_clamped(requested in 0usize..100) {
        let mut state = wheel(8);
        state.set_num_colors(requested);
        prop_assert!((3..=20).contains(&state.num_colors()));
        prop_assert!(state.selected_color_index() < state.num_colors());
    }
}
