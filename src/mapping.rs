//! Pointer-to-sound mapping
//!
//! Pure functions from a pixel coordinate to a voice parameter.
//!
//! ## Coordinate System
//!
//! Pixels are measured from the top-left corner of the viewport:
//! - X: 0 = left edge (full left pan, quietest), width = right edge
//! - Y: 0 = top edge (highest pitch), height = bottom edge
//!
//! Nothing is clamped. A pointer outside the viewport extrapolates past
//! the configured bounds.

use crate::config::SonifierConfig;

/// Current size of the drawable area in pixels
///
/// Sampled from the host on every event, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// `position / extent`, or 0.0 for an empty extent
fn fraction(position: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        position / extent
    } else {
        0.0
    }
}

fn lerp(t: f64, min: f64, max: f64) -> f64 {
    t * (max - min) + min
}

/// Round half away from zero to 3 decimal places
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Stereo pan for a horizontal pixel
pub fn compute_pan(x: f64, viewport: Viewport, config: &SonifierConfig) -> f64 {
    round3(lerp(
        fraction(x, viewport.width),
        config.max_left_pan,
        config.max_right_pan,
    ))
}

/// Volume for a horizontal pixel
pub fn compute_volume(x: f64, viewport: Viewport, config: &SonifierConfig) -> f64 {
    round3(lerp(
        fraction(x, viewport.width),
        config.min_volume,
        config.max_volume,
    ))
}

/// Frequency in Hz for a vertical pixel, truncated toward zero
pub fn compute_frequency(y: f64, viewport: Viewport, config: &SonifierConfig) -> i32 {
    let t = fraction(viewport.height - y, viewport.height);
    // `as` saturates, so far off-screen pointers cannot wrap around
    lerp(t, config.min_frequency, config.max_frequency).trunc() as i32
}
