//! Screen layout shared by the controller and the renderer.
//!
//! The controller needs the spin button rectangle for hit-testing before the
//! renderer draws it, so placement lives here rather than in drawing code.

use crate::config::ButtonConfig;
use crate::utils::safe_cast::scale_pixels;
use crate::wheel::ButtonRect;

/// Length of the pointer arrow beyond the wheel rim
pub const POINTER_LENGTH_OFFSET: i32 = 40;

/// Gap between the wheel rim and the pointer base
pub const POINTER_BASE_GAP: i32 = 5;

/// Arrow head size in pixels
pub const POINTER_ARROW_SIZE: i32 = 20;

/// Selected-color box dimensions and top margin
pub const SELECTED_BOX_WIDTH: i32 = 150;
pub const SELECTED_BOX_HEIGHT: i32 = 60;
pub const SELECTED_BOX_TOP: i32 = 10;

/// Spin button centered horizontally below the wheel
#[must_use]
pub const fn spin_button_rect(center: (i32, i32), radius: i32, button: &ButtonConfig) -> ButtonRect {
    ButtonRect::new(
        center.0 - button.width / 2,
        center.1 + radius + button.offset_below_wheel,
        button.width,
        button.height,
    )
}

/// Pointer arrow `(base, tip)` above the wheel
#[must_use]
pub const fn pointer_points(center: (i32, i32), radius: i32) -> ((i32, i32), (i32, i32)) {
    let base = (center.0, center.1 - radius - POINTER_BASE_GAP);
    let tip = (center.0, center.1 - radius - POINTER_LENGTH_OFFSET);
    (base, tip)
}

/// Radius of the center grab disk
#[must_use]
pub fn grab_disk_radius(radius: i32, multiplier: f64) -> i32 {
    scale_pixels(radius, multiplier)
}

/// Selected-color box `(top_left, bottom_right)` centered above the wheel
#[must_use]
pub const fn selected_box(center: (i32, i32)) -> ((i32, i32), (i32, i32)) {
    (
        (center.0 - SELECTED_BOX_WIDTH / 2, SELECTED_BOX_TOP),
        (center.0 + SELECTED_BOX_WIDTH / 2, SELECTED_BOX_TOP + SELECTED_BOX_HEIGHT),
    )
}
