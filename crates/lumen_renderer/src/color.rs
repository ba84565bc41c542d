//! Color quantization for output.

use lumen_math::{Interval, Vec3};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Intensities are clamped below 1 so `256 * x` never reaches 256.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

#[inline]
fn channel_to_byte(linear: f32) -> u8 {
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Convert an averaged linear color to gamma-corrected 8-bit RGB.
pub fn color_to_bytes(color: Color) -> [u8; 3] {
    [
        channel_to_byte(color.x),
        channel_to_byte(color.y),
        channel_to_byte(color.z),
    ]
}
