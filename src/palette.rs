//! Wheel palette generation.
//!
//! Colors are evenly spaced around the HSV hue circle using the `OpenCV` 8-bit
//! convention (hue stored as degrees / 2, so the circle spans `[0, 180)`), at
//! full saturation and value. The palette is a pure function of the color count.

use crate::constants::OPENCV_HUE_RANGE;

/// Display color in `OpenCV` channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bgr {
    /// Blue channel
    pub b: u8,
    /// Green channel
    pub g: u8,
    /// Red channel
    pub r: u8,
}

impl Bgr {
    /// Create a color from blue, green and red channels
    #[must_use]
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    /// Channels as `[b, g, r]`
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

/// Convert an HSV color (hue in degrees, saturation and value in `[0, 1]`) to BGR
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Channels are clamped to [0, 255]
pub fn hsv_to_bgr(hue_degrees: f64, saturation: f64, value: f64) -> Bgr {
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let h = hue_degrees.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let to_channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Bgr::new(to_channel(b), to_channel(g), to_channel(r))
}

/// Ordered wheel colors; index `i` owns segment `[i * step, (i + 1) * step)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Bgr>,
}

impl Palette {
    /// Generate `num_colors` evenly spaced fully saturated hues
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // num_colors is bounded by configuration
    pub fn generate(num_colors: usize) -> Self {
        let n = num_colors as u32;
        let colors = (0..n)
            .map(|i| {
                // Integer hue in OpenCV units, then back to degrees
                let hue = OPENCV_HUE_RANGE * i / n;
                hsv_to_bgr(f64::from(hue * 2), 1.0, 1.0)
            })
            .collect();
        Self { colors }
    }

    /// Number of colors (and segments)
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette holds no colors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Angular width of one segment in degrees
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn angle_per_segment(&self) -> f64 {
        360.0 / self.colors.len().max(1) as f64
    }

    /// Color at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Bgr> {
        self.colors.get(index).copied()
    }

    /// All colors in segment order
    #[must_use]
    pub fn colors(&self) -> &[Bgr] {
        &self.colors
    }
}
