//! Angle arithmetic and numeric conversion helpers.

pub mod safe_cast;

use crate::constants::{FULL_TURN_DEGREES, HALF_TURN_DEGREES};

/// Wrap an angle into `[0, 360)`, preserving direction of travel
///
/// Non-finite input maps to `0.0` so a bad sample can never poison the wheel angle.
#[must_use]
pub fn wrap_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if wrapped >= FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed angular step from `previous` to `current`, in degrees
///
/// Both inputs are expected in the `atan2` range `(-180, 180]` or `[0, 360)`;
/// a jump across the seam is corrected by one full turn.
#[must_use]
pub fn shortest_angle_delta(previous: f64, current: f64) -> f64 {
    let delta = current - previous;
    if delta > HALF_TURN_DEGREES {
        delta - FULL_TURN_DEGREES
    } else if delta < -HALF_TURN_DEGREES {
        delta + FULL_TURN_DEGREES
    } else {
        delta
    }
}
