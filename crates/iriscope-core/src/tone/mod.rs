//! Tone adjustment pipeline
//!
//! Applies a full [`Adjustments`] record to a working copy of a buffer in a
//! fixed order: exposure, contrast, saturation, hue, temperature,
//! shadows/highlights, then sharpness. The first six stages are per-pixel
//! independent and run fused in one pass; sharpness is a convolution over
//! the result. Alpha bytes pass through everything except sharpening, which
//! convolves them along with the color channels.
//!
//! Per-pixel math runs in f32 on the 0-255 scale, clamps after every stage,
//! and quantizes to bytes once at the end, so output is bit-identical for
//! identical inputs.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::{hsl_to_rgb, rgb_to_hsl};
use crate::convolve::apply_sharpness;
use crate::parallel::parallel_for_each_chunk_mut;

/// Lower clamp bound shared by all adjustment fields
pub const ADJUSTMENT_MIN: f32 = -100.0;
/// Upper clamp bound shared by all adjustment fields
pub const ADJUSTMENT_MAX: f32 = 100.0;

/// Names of the eight adjustment fields, for command routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentField {
    Exposure,
    Contrast,
    Saturation,
    Hue,
    Shadows,
    Highlights,
    Temperature,
    Sharpness,
}

/// One view's tone adjustment state
///
/// Every field lives in [-100, 100]; hue is degrees but shares the uniform
/// clamp. Each independent image view owns exactly one record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    pub exposure: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub hue: f32,
    pub shadows: f32,
    pub highlights: f32,
    pub temperature: f32,
    pub sharpness: f32,
}

impl Adjustments {
    /// Zero every field (identity pipeline)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when applying these adjustments would not change any pixel
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Write one field, clamping to the shared range
    pub fn set(&mut self, field: AdjustmentField, value: f32) {
        let value = value.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        match field {
            AdjustmentField::Exposure => self.exposure = value,
            AdjustmentField::Contrast => self.contrast = value,
            AdjustmentField::Saturation => self.saturation = value,
            AdjustmentField::Hue => self.hue = value,
            AdjustmentField::Shadows => self.shadows = value,
            AdjustmentField::Highlights => self.highlights = value,
            AdjustmentField::Temperature => self.temperature = value,
            AdjustmentField::Sharpness => self.sharpness = value,
        }
    }

    pub fn get(&self, field: AdjustmentField) -> f32 {
        match field {
            AdjustmentField::Exposure => self.exposure,
            AdjustmentField::Contrast => self.contrast,
            AdjustmentField::Saturation => self.saturation,
            AdjustmentField::Hue => self.hue,
            AdjustmentField::Shadows => self.shadows,
            AdjustmentField::Highlights => self.highlights,
            AdjustmentField::Temperature => self.temperature,
            AdjustmentField::Sharpness => self.sharpness,
        }
    }

    /// Clamp every field to [-100, 100] in place
    pub fn clamp_all(&mut self) {
        self.exposure = self.exposure.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        self.contrast = self.contrast.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        self.saturation = self.saturation.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        self.hue = self.hue.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        self.shadows = self.shadows.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        self.highlights = self.highlights.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        self.temperature = self.temperature.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
        self.sharpness = self.sharpness.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
    }
}

#[inline]
fn clamp255(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

/// Stages 1-6 for a single RGBA chunk; alpha untouched
fn adjust_pixel(pixel: &mut [u8], adj: &Adjustments) {
    let mut r = pixel[0] as f32;
    let mut g = pixel[1] as f32;
    let mut b = pixel[2] as f32;

    // 1. Exposure: linear brightness multiplier
    if adj.exposure != 0.0 {
        let factor = (100.0 + adj.exposure) / 100.0;
        r = clamp255(r * factor);
        g = clamp255(g * factor);
        b = clamp255(b * factor);
    }

    // 2. Contrast: multiplier around mid-gray
    if adj.contrast != 0.0 {
        let factor = (100.0 + adj.contrast) / 100.0;
        r = clamp255((r - 128.0) * factor + 128.0);
        g = clamp255((g - 128.0) * factor + 128.0);
        b = clamp255((b - 128.0) * factor + 128.0);
    }

    // 3+4. Saturation multiplier and additive hue rotation, one HSL trip
    if adj.saturation != 0.0 || adj.hue != 0.0 {
        let mut hsl = rgb_to_hsl(r / 255.0, g / 255.0, b / 255.0);
        hsl.s = (hsl.s * (100.0 + adj.saturation) / 100.0).clamp(0.0, 1.0);
        hsl.h += adj.hue;
        let (nr, ng, nb) = hsl_to_rgb(hsl);
        r = clamp255(nr * 255.0);
        g = clamp255(ng * 255.0);
        b = clamp255(nb * 255.0);
    }

    // 5. Temperature: warm sepia blend, or cool 180-degree rotation with a
    // saturation multiplier of |t|/100. Only one branch per sign.
    if adj.temperature > 0.0 {
        let strength = adj.temperature / 100.0;
        let sr = 0.393 * r + 0.769 * g + 0.189 * b;
        let sg = 0.349 * r + 0.686 * g + 0.168 * b;
        let sb = 0.272 * r + 0.534 * g + 0.131 * b;
        r = clamp255(r + (sr - r) * strength);
        g = clamp255(g + (sg - g) * strength);
        b = clamp255(b + (sb - b) * strength);
    } else if adj.temperature < 0.0 {
        let mut hsl = rgb_to_hsl(r / 255.0, g / 255.0, b / 255.0);
        hsl.h += 180.0;
        hsl.s = (hsl.s * (-adj.temperature / 100.0)).clamp(0.0, 1.0);
        let (nr, ng, nb) = hsl_to_rgb(hsl);
        r = clamp255(nr * 255.0);
        g = clamp255(ng * 255.0);
        b = clamp255(nb * 255.0);
    }

    // 6. Shadows/highlights: luminance-conditional multiplier, computed
    // from the unrounded luminance of the current values
    if adj.shadows != 0.0 || adj.highlights != 0.0 {
        let lum = 0.299 * r + 0.587 * g + 0.114 * b;
        let factor = if lum < 128.0 {
            1.0 + adj.shadows / 100.0
        } else {
            1.0 - adj.highlights / 100.0
        };
        r = clamp255(r * factor);
        g = clamp255(g * factor);
        b = clamp255(b * factor);
    }

    pixel[0] = r.round() as u8;
    pixel[1] = g.round() as u8;
    pixel[2] = b.round() as u8;
}

/// Apply a full adjustment record to a working copy of `source`
///
/// The source is never mutated; the returned buffer is the display raster.
pub fn apply_adjustments(source: &PixelBuffer, adj: &Adjustments) -> Result<PixelBuffer, String> {
    if adj.is_identity() {
        return Ok(source.clone());
    }

    let mut working = source.clone();
    let tonal = Adjustments {
        sharpness: 0.0,
        ..*adj
    };

    if !tonal.is_identity() {
        parallel_for_each_chunk_mut(working.data_mut(), 4, |pixel| adjust_pixel(pixel, &tonal));
    }

    // 7. Sharpness runs last, as a convolution over the toned result
    if adj.sharpness != 0.0 {
        working = apply_sharpness(&working, adj.sharpness)?;
    }

    Ok(working)
}
