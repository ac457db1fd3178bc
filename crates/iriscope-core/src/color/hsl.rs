//! RGB to HSL conversion and back
//!
//! The saturation, hue, and temperature stages work on lightness-preserving
//! hue rotations, so both directions run in f32 with channels as fractions
//! of full scale. Hue is carried in degrees and may leave the 0-360 range
//! after an additive rotation; the reverse conversion normalizes it with
//! `rem_euclid` before sampling the color wheel.

/// Channel spread below which a color counts as gray
const GRAY_EPSILON: f32 = 1e-6;

/// Hue in degrees, saturation and lightness as fractions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Convert fractional RGB channels to HSL
///
/// Inputs are clamped to [0, 1]. Gray inputs report hue and saturation of
/// zero rather than an arbitrary hue.
#[inline]
pub fn rgb_to_hsl(r: f32, g: f32, b: f32) -> Hsl {
    let r = r.clamp(0.0, 1.0);
    let g = g.clamp(0.0, 1.0);
    let b = b.clamp(0.0, 1.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;
    let l = (max + min) / 2.0;

    if chroma < GRAY_EPSILON {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = chroma / (1.0 - (2.0 * l - 1.0).abs());

    // Sixth of the wheel owned by the dominant channel, 60 degrees each
    let sector = if max == r {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };

    Hsl {
        h: sector * 60.0,
        s,
        l,
    }
}

/// Convert HSL back to fractional RGB channels
#[inline]
pub fn hsl_to_rgb(hsl: Hsl) -> (f32, f32, f32) {
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);

    if s < GRAY_EPSILON {
        return (l, l, l);
    }

    let sector = hsl.h.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let ramp = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let base = l - chroma / 2.0;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, ramp, 0.0),
        1 => (ramp, chroma, 0.0),
        2 => (0.0, chroma, ramp),
        3 => (0.0, ramp, chroma),
        4 => (ramp, 0.0, chroma),
        _ => (chroma, 0.0, ramp),
    };

    (r + base, g + base, b + base)
}

/// HSL from 8-bit channel bytes
#[inline]
pub fn hsl_from_rgb8(r: u8, g: u8, b: u8) -> Hsl {
    rgb_to_hsl(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// 8-bit channel bytes from HSL, rounded to the nearest byte
#[inline]
pub fn hsl_to_rgb8(hsl: Hsl) -> (u8, u8, u8) {
    let (r, g, b) = hsl_to_rgb(hsl);
    (
        (r * 255.0).round().clamp(0.0, 255.0) as u8,
        (g * 255.0).round().clamp(0.0, 255.0) as u8,
        (b * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}
