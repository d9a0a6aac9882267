//! `OpenCV` drawing of the wheel state.
//!
//! Drawing consumes a [`FrameOutcome`] and never mutates wheel state.

use crate::{
    constants::HAND_CONNECTIONS,
    controller::{FrameOutcome, HandOverlay},
    layout::{grab_disk_radius, pointer_points, selected_box, POINTER_ARROW_SIZE},
    palette::Bgr,
    wheel::{ButtonRect, ButtonState, WheelSnapshot},
    Result,
};
use opencv::{
    core::{Mat, Point, Scalar, Size},
    imgproc::{self, FONT_HERSHEY_DUPLEX, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
};

const FILLED: i32 = -1;

const BLACK: Scalar = Scalar::new(0.0, 0.0, 0.0, 0.0);
const WHITE: Scalar = Scalar::new(255.0, 255.0, 255.0, 0.0);
const GREEN: Scalar = Scalar::new(0.0, 200.0, 0.0, 0.0);
const BRIGHT_GREEN: Scalar = Scalar::new(0.0, 255.0, 100.0, 0.0);
const DARK_GREEN: Scalar = Scalar::new(0.0, 120.0, 0.0, 0.0);
const GRAY: Scalar = Scalar::new(128.0, 128.0, 128.0, 0.0);
const LIGHT_GRAY: Scalar = Scalar::new(200.0, 200.0, 200.0, 0.0);
const RED: Scalar = Scalar::new(0.0, 0.0, 255.0, 0.0);
const YELLOW: Scalar = Scalar::new(0.0, 255.0, 255.0, 0.0);
const CYAN: Scalar = Scalar::new(255.0, 255.0, 0.0, 0.0);
const SHADOW: Scalar = Scalar::new(40.0, 40.0, 40.0, 0.0);
const GRAB_ACTIVE: Scalar = Scalar::new(100.0, 255.0, 100.0, 0.0);

/// Convert a palette color to an `OpenCV` scalar
#[must_use]
pub fn to_scalar(color: Bgr) -> Scalar {
    Scalar::new(f64::from(color.b), f64::from(color.g), f64::from(color.r), 0.0)
}

fn point((x, y): (i32, i32)) -> Point {
    Point::new(x, y)
}

/// Draws the wheel, spin button, hand indicators and status text
pub struct WheelRenderer {
    center_radius_multiplier: f64,
    show_landmarks: bool,
}

impl WheelRenderer {
    /// Create a renderer
    #[must_use]
    pub const fn new(center_radius_multiplier: f64, show_landmarks: bool) -> Self {
        Self {
            center_radius_multiplier,
            show_landmarks,
        }
    }

    /// Draw everything for one frame
    ///
    /// # Errors
    ///
    /// Returns an error if any `OpenCV` drawing call fails.
    pub fn draw(&self, frame: &mut Mat, outcome: &FrameOutcome, fps: f64) -> Result<()> {
        let snapshot = &outcome.snapshot;

        self.draw_color_wheel(frame, snapshot)?;
        if let Some(rect) = snapshot.button_rect {
            draw_spin_button(frame, rect, snapshot.button)?;
        }

        if let Some(hand) = &outcome.hand {
            if self.show_landmarks {
                draw_skeleton(frame, hand)?;
            }
            if snapshot.button.is_hovered {
                draw_pinch_indicator(frame, hand)?;
            }
            if snapshot.hand_near_wheel && !snapshot.button.is_hovered && !snapshot.button.is_spinning {
                imgproc::line(frame, point(hand.fingertip), point(snapshot.center), GREEN, 2, LINE_8, 0)?;
            }
            draw_hand_indicator(frame, hand, snapshot.hand_near_wheel, snapshot.button.is_hovered)?;
        }

        draw_instructions(frame, snapshot, fps)?;
        Ok(())
    }

    fn draw_color_wheel(&self, frame: &mut Mat, snapshot: &WheelSnapshot) -> Result<()> {
        if snapshot.palette.is_empty() || snapshot.radius <= 0 {
            return Ok(());
        }

        #[allow(clippy::cast_precision_loss)]
        let step = 360.0 / snapshot.palette.len() as f64;
        let center = point(snapshot.center);
        let axes = Size::new(snapshot.radius, snapshot.radius);

        for (i, color) in snapshot.palette.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let start = i as f64 * step + snapshot.rotation_angle;
            let end = start + step;
            imgproc::ellipse(frame, center, axes, 0.0, start, end, to_scalar(*color), FILLED, LINE_AA, 0)?;
            imgproc::ellipse(frame, center, axes, 0.0, start, end, BLACK, 2, LINE_AA, 0)?;
        }

        // Center grab area
        let disk = grab_disk_radius(snapshot.radius, self.center_radius_multiplier);
        let disk_color = if snapshot.hand_near_wheel { GRAB_ACTIVE } else { LIGHT_GRAY };
        imgproc::circle(frame, center, disk, disk_color, FILLED, LINE_AA, 0)?;
        imgproc::circle(frame, center, disk, BLACK, 2, LINE_AA, 0)?;
        imgproc::put_text(
            frame,
            "GRAB",
            Point::new(center.x - 30, center.y + 5),
            FONT_HERSHEY_SIMPLEX,
            0.5,
            BLACK,
            2,
            LINE_8,
            false,
        )?;

        draw_pointer(frame, snapshot.center, snapshot.radius)?;
        draw_selected_color_box(frame, snapshot.center, snapshot.selected_color)?;
        Ok(())
    }
}

fn draw_pointer(frame: &mut Mat, center: (i32, i32), radius: i32) -> Result<()> {
    let (base, tip) = pointer_points(center, radius);
    let (base, tip) = (point(base), point(tip));
    let left = Point::new(tip.x - POINTER_ARROW_SIZE / 2, tip.y + POINTER_ARROW_SIZE);
    let right = Point::new(tip.x + POINTER_ARROW_SIZE / 2, tip.y + POINTER_ARROW_SIZE);

    // Black outline first, white core on top
    for (color, thickness) in [(BLACK, 5), (WHITE, 3)] {
        imgproc::line(frame, base, tip, color, thickness, LINE_AA, 0)?;
        imgproc::line(frame, tip, left, color, thickness, LINE_AA, 0)?;
        imgproc::line(frame, tip, right, color, thickness, LINE_AA, 0)?;
    }
    Ok(())
}

fn draw_selected_color_box(frame: &mut Mat, center: (i32, i32), selected: Bgr) -> Result<()> {
    let (top_left, bottom_right) = selected_box(center);
    let (top_left, bottom_right) = (point(top_left), point(bottom_right));
    imgproc::rectangle_points(frame, top_left, bottom_right, WHITE, FILLED, LINE_8, 0)?;
    imgproc::rectangle_points(frame, top_left, bottom_right, BLACK, 3, LINE_8, 0)?;

    let margin = 5;
    let inner_tl = Point::new(top_left.x + margin, top_left.y + margin);
    let inner_br = Point::new(bottom_right.x - margin, bottom_right.y - margin);
    imgproc::rectangle_points(frame, inner_tl, inner_br, to_scalar(selected), FILLED, LINE_8, 0)?;
    imgproc::rectangle_points(frame, inner_tl, inner_br, BLACK, 2, LINE_8, 0)?;

    let label_origin = Point::new(center.0 - 55, bottom_right.y + 15);
    imgproc::put_text(frame, "SELECTED", label_origin, FONT_HERSHEY_SIMPLEX, 0.6, WHITE, 2, LINE_8, false)?;
    imgproc::put_text(frame, "SELECTED", label_origin, FONT_HERSHEY_SIMPLEX, 0.6, BLACK, 1, LINE_8, false)?;
    Ok(())
}

/// Button look for a state; spinning wins over pressed, pressed over hovered
fn button_style(state: ButtonState) -> (Scalar, Scalar, &'static str, f64) {
    if state.is_spinning {
        (GRAY, LIGHT_GRAY, "SPINNING...", 0.8)
    } else if state.is_pressed {
        (DARK_GREEN, WHITE, "SPIN!", 1.2)
    } else if state.is_hovered {
        (BRIGHT_GREEN, BLACK, "SPIN!", 1.1)
    } else {
        (GREEN, WHITE, "SPIN!", 1.0)
    }
}

fn draw_spin_button(frame: &mut Mat, rect: ButtonRect, state: ButtonState) -> Result<()> {
    let (fill, text_color, text, scale) = button_style(state);
    let top_left = Point::new(rect.x, rect.y);
    let bottom_right = Point::new(rect.x + rect.width, rect.y + rect.height);

    let shadow = 5;
    imgproc::rectangle_points(
        frame,
        Point::new(top_left.x + shadow, top_left.y + shadow),
        Point::new(bottom_right.x + shadow, bottom_right.y + shadow),
        SHADOW,
        FILLED,
        LINE_8,
        0,
    )?;
    imgproc::rectangle_points(frame, top_left, bottom_right, fill, FILLED, LINE_8, 0)?;
    let border = if state.is_hovered { 6 } else { 4 };
    imgproc::rectangle_points(frame, top_left, bottom_right, WHITE, border, LINE_8, 0)?;

    let mut baseline = 0;
    let size = imgproc::get_text_size(text, FONT_HERSHEY_DUPLEX, scale, 3, &mut baseline)?;
    let text_x = rect.x + (rect.width - size.width) / 2;
    let text_y = rect.y + (rect.height + size.height) / 2;
    imgproc::put_text(
        frame,
        text,
        Point::new(text_x + 2, text_y + 2),
        FONT_HERSHEY_DUPLEX,
        scale,
        BLACK,
        3,
        LINE_AA,
        false,
    )?;
    imgproc::put_text(frame, text, Point::new(text_x, text_y), FONT_HERSHEY_DUPLEX, scale, text_color, 3, LINE_AA, false)?;

    if !state.is_spinning {
        let hint = "Pinch over button to spin!";
        let hint_size = imgproc::get_text_size(hint, FONT_HERSHEY_SIMPLEX, 0.6, 2, &mut baseline)?;
        let hint_x = rect.x + (rect.width - hint_size.width) / 2;
        imgproc::put_text(
            frame,
            hint,
            Point::new(hint_x, rect.y + rect.height + 30),
            FONT_HERSHEY_SIMPLEX,
            0.6,
            WHITE,
            2,
            LINE_8,
            false,
        )?;
    }
    Ok(())
}

fn draw_skeleton(frame: &mut Mat, hand: &HandOverlay) -> Result<()> {
    for &(a, b) in &HAND_CONNECTIONS {
        if let (Some(&pa), Some(&pb)) = (hand.points.get(a), hand.points.get(b)) {
            imgproc::line(frame, point(pa), point(pb), WHITE, 2, LINE_AA, 0)?;
        }
    }
    for &p in &hand.points {
        imgproc::circle(frame, point(p), 3, RED, FILLED, LINE_AA, 0)?;
    }
    Ok(())
}

fn draw_pinch_indicator(frame: &mut Mat, hand: &HandOverlay) -> Result<()> {
    let (color, line, dot) = if hand.is_pinching { (GREEN, 3, 8) } else { (YELLOW, 2, 6) };
    imgproc::line(frame, point(hand.thumb), point(hand.fingertip), color, line, LINE_AA, 0)?;
    imgproc::circle(frame, point(hand.thumb), dot, color, FILLED, LINE_AA, 0)?;
    imgproc::circle(frame, point(hand.fingertip), dot, color, FILLED, LINE_AA, 0)?;
    Ok(())
}

fn draw_hand_indicator(frame: &mut Mat, hand: &HandOverlay, near_wheel: bool, over_button: bool) -> Result<()> {
    if over_button {
        return Ok(());
    }
    let tip = point(hand.fingertip);
    if near_wheel {
        imgproc::circle(frame, tip, 15, GREEN, FILLED, LINE_AA, 0)?;
        imgproc::circle(frame, tip, 15, WHITE, 2, LINE_AA, 0)?;
    } else {
        imgproc::circle(frame, tip, 10, RED, FILLED, LINE_AA, 0)?;
    }
    Ok(())
}

/// Status line text and color for the current state
#[must_use]
pub fn status_line(snapshot: &WheelSnapshot) -> (String, Scalar) {
    #[allow(clippy::cast_possible_truncation)]
    let mut text = format!(
        "Colors: {} | Angle: {} deg",
        snapshot.palette.len(),
        snapshot.rotation_angle.trunc() as i32
    );
    let color = if snapshot.button.is_spinning {
        text.push_str(" | AUTO-SPINNING");
        CYAN
    } else if snapshot.hand_near_wheel {
        text.push_str(" | GRABBING");
        GREEN
    } else if snapshot.button.is_hovered {
        text.push_str(" | HOVER - PINCH TO SPIN");
        YELLOW
    } else {
        WHITE
    };
    (text, color)
}

fn draw_instructions(frame: &mut Mat, snapshot: &WheelSnapshot, fps: f64) -> Result<()> {
    let h = frame.rows();
    let x = 10;

    imgproc::put_text(frame, "Hand-Controlled Color Wheel", Point::new(x, 30), FONT_HERSHEY_SIMPLEX, 0.8, WHITE, 2, LINE_8, false)?;

    let (status, status_color) = status_line(snapshot);
    imgproc::put_text(frame, &status, Point::new(x, 60), FONT_HERSHEY_SIMPLEX, 0.6, status_color, 2, LINE_8, false)?;

    let fps_text = format!("FPS: {fps:.1}");
    imgproc::put_text(frame, &fps_text, Point::new(x, 90), FONT_HERSHEY_SIMPLEX, 0.6, GREEN, 2, LINE_8, false)?;

    let lines = [
        "1. PINCH (thumb + index) over SPIN button",
        "2. OR grab wheel manually to rotate",
        "3. OR press SPACE key to spin",
        "Top indicator shows selected color",
        "Press 'q' to quit | '+'/'-' for colors",
    ];
    imgproc::put_text(frame, "Instructions:", Point::new(x, h - 150), FONT_HERSHEY_SIMPLEX, 0.6, WHITE, 2, LINE_8, false)?;
    let mut y = h - 120;
    for line in lines {
        imgproc::put_text(frame, line, Point::new(x, y), FONT_HERSHEY_SIMPLEX, 0.5, WHITE, 1, LINE_8, false)?;
        y += 25;
    }
    Ok(())
}
