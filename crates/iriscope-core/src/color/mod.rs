//! Color conversions
//!
//! Provides the RGB <-> HSL conversions used by the saturation, hue, and
//! temperature stages of the tone pipeline.

mod hsl;

#[cfg(test)]
mod tests;

pub use hsl::{hsl_from_rgb8, hsl_to_rgb, hsl_to_rgb8, rgb_to_hsl, Hsl};
