//! Sweep bar gradient construction.
//!
//! One pattern period is a horizontal linear gradient: a light band
//! covering `BAR_FRACTION` of the drawable width, then black for the
//! remainder, repeating along the x axis. The pattern is built pre-scaled
//! to the current pixel width, so the paint path only translates it.

use cairo::{Extend, LinearGradient};

/// Bar's width as a fraction of the screen width.
pub const BAR_FRACTION: f64 = 3.0 / 8.0;

/// Simple RGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Colour of the bar (slightly blue tint). The earlier pure-white variant
/// is `Color { r: 1.0, g: 1.0, b: 1.0 }`; change this constant to use it.
pub const BAR_COLOR: Color = Color {
    r: 0.9,
    g: 0.9,
    b: 1.0,
};

const BACKGROUND: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

/// Build the repeating sweep pattern for a drawable width in pixels.
///
/// Four stops: light at 0 and `BAR_FRACTION`, black at `BAR_FRACTION`
/// and 1. The light and dark bands meet exactly at the fraction boundary.
pub fn bar_pattern(width: i32) -> LinearGradient {
    assert!(width > 0, "gradient pattern needs a positive width");

    let pattern = LinearGradient::new(0.0, 0.0, width as f64, 0.0);
    pattern.add_color_stop_rgb(0.0, BAR_COLOR.r, BAR_COLOR.g, BAR_COLOR.b);
    pattern.add_color_stop_rgb(BAR_FRACTION, BAR_COLOR.r, BAR_COLOR.g, BAR_COLOR.b);
    pattern.add_color_stop_rgb(BAR_FRACTION, BACKGROUND.r, BACKGROUND.g, BACKGROUND.b);
    pattern.add_color_stop_rgb(1.0, BACKGROUND.r, BACKGROUND.g, BACKGROUND.b);
    pattern.set_extend(Extend::Repeat);
    pattern
}
