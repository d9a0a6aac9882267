//! Gesture geometry on a single hand's landmark set.
//!
//! All functions are pure. Landmarks are normalized to `[0, 1] x [0, 1]` with
//! y growing downward, so angles follow the screen convention: 0° points along
//! +x and angles increase clockwise.

use crate::constants::{INDEX_TIP, THUMB_TIP};
use crate::utils::safe_cast::normalized_to_pixel;
use crate::{Error, Result};

/// Number of points a landmark set must carry for the tips used here to exist
pub const MIN_LANDMARKS: usize = if INDEX_TIP > THUMB_TIP { INDEX_TIP + 1 } else { THUMB_TIP + 1 };

/// One normalized landmark
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    /// Horizontal position, 0 = left edge, 1 = right edge
    pub x: f32,
    /// Vertical position, 0 = top edge, 1 = bottom edge
    pub y: f32,
    /// Relative depth (unused by the geometry)
    pub z: f32,
}

impl Landmark {
    /// Create a landmark at a normalized position
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A validated landmark set for one hand
///
/// Construction guarantees the thumb-tip and index-fingertip points exist and are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: Vec<Landmark>,
}

impl HandLandmarks {
    /// Validate a raw landmark set
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than [`MIN_LANDMARKS`] points are supplied or
    /// the thumb-tip or index-fingertip coordinates are not finite.
    pub fn new(points: Vec<Landmark>) -> Result<Self> {
        if points.len() < MIN_LANDMARKS {
            return Err(Error::InsufficientLandmarks {
                required: MIN_LANDMARKS,
                found: points.len(),
            });
        }
        for index in [THUMB_TIP, INDEX_TIP] {
            let point = points[index];
            if !(point.x.is_finite() && point.y.is_finite()) {
                return Err(Error::InvalidInput(format!("Landmark {index} is not finite")));
            }
        }
        Ok(Self { points })
    }

    /// Thumb-tip landmark
    #[must_use]
    pub fn thumb_tip(&self) -> Landmark {
        self.points[THUMB_TIP]
    }

    /// Index-fingertip landmark
    #[must_use]
    pub fn index_tip(&self) -> Landmark {
        self.points[INDEX_TIP]
    }

    /// All points in anatomical order
    #[must_use]
    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}

/// Euclidean distance between thumb-tip and index-fingertip in normalized units
#[must_use]
pub fn pinch_distance(landmarks: &HandLandmarks) -> f64 {
    let thumb = landmarks.thumb_tip();
    let index = landmarks.index_tip();
    euclidean_distance(
        f64::from(thumb.x),
        f64::from(thumb.y),
        f64::from(index.x),
        f64::from(index.y),
    )
}

/// True when thumb and index tips are closer than `threshold`
#[must_use]
pub fn is_pinching(landmarks: &HandLandmarks, threshold: f64) -> bool {
    pinch_distance(landmarks) < threshold
}

/// Index-fingertip position in pixels (truncated)
#[must_use]
pub fn fingertip_pixel_position(landmarks: &HandLandmarks, frame_width: i32, frame_height: i32) -> (i32, i32) {
    let tip = landmarks.index_tip();
    (
        normalized_to_pixel(tip.x, frame_width),
        normalized_to_pixel(tip.y, frame_height),
    )
}

/// Thumb-tip position in pixels (truncated)
#[must_use]
pub fn thumb_pixel_position(landmarks: &HandLandmarks, frame_width: i32, frame_height: i32) -> (i32, i32) {
    let tip = landmarks.thumb_tip();
    (
        normalized_to_pixel(tip.x, frame_width),
        normalized_to_pixel(tip.y, frame_height),
    )
}

/// Angle from `(center_x, center_y)` to the index fingertip, with the fingertip pixel position
///
/// Returns `(angle_degrees, x, y)`. The angle lies in `(-180, 180]`; a fingertip
/// exactly on the center yields 0°.
#[must_use]
pub fn angle_from_center(
    landmarks: &HandLandmarks,
    center_x: i32,
    center_y: i32,
    frame_width: i32,
    frame_height: i32,
) -> (f64, i32, i32) {
    let (x, y) = fingertip_pixel_position(landmarks, frame_width, frame_height);
    let dy = f64::from(y) - f64::from(center_y);
    let dx = f64::from(x) - f64::from(center_x);
    (dy.atan2(dx).to_degrees(), x, y)
}

/// Euclidean distance between two points
#[must_use]
pub fn euclidean_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}
