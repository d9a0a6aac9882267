//! Checked and clamped conversions between floating point values and pixel coordinates

use crate::{Error, Result};

/// Safely convert usize to i32 with overflow checking
///
/// # Errors
///
/// Returns an error if the value exceeds i32::MAX
pub fn usize_to_i32(value: usize) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in i32")))
}

/// Truncate toward zero into i32, saturating at the i32 range; non-finite values map to 0
#[must_use]
#[allow(clippy::cast_possible_truncation)] // `as` saturates for floats
pub fn f64_to_i32_truncate(value: f64) -> i32 {
    if value.is_finite() {
        value.trunc() as i32
    } else {
        0
    }
}

/// Denormalize a `[0, 1]` coordinate to a pixel index along an axis of `extent` pixels
#[must_use]
pub fn normalized_to_pixel(normalized: f32, extent: i32) -> i32 {
    f64_to_i32_truncate(f64::from(normalized) * f64::from(extent))
}

/// Scale a length by a factor and truncate to whole pixels
#[must_use]
pub fn scale_pixels(length: i32, factor: f64) -> i32 {
    f64_to_i32_truncate(f64::from(length) * factor)
}
