//! Tests for the tone adjustment pipeline

use super::*;
use crate::buffer::{PixelBuffer, Rgba};

fn adj(f: impl FnOnce(&mut Adjustments)) -> Adjustments {
    let mut a = Adjustments::default();
    f(&mut a);
    a
}

#[test]
fn test_identity_adjustments_are_noop() {
    let mut buffer = PixelBuffer::solid(4, 4, Rgba::new(12, 200, 90, 128));
    buffer.set(2, 1, Rgba::new(255, 0, 7, 3)).unwrap();

    let out = apply_adjustments(&buffer, &Adjustments::default()).unwrap();
    assert_eq!(out, buffer);
}

#[test]
fn test_exposure_scales_and_clamps() {
    let buffer = PixelBuffer::solid(1, 1, Rgba::new(50, 100, 200, 255));
    let out = apply_adjustments(&buffer, &adj(|a| a.exposure = 100.0)).unwrap();

    let px = out.get(0, 0).unwrap();
    assert_eq!((px.r, px.g, px.b), (100, 200, 255));
}

#[test]
fn test_negative_exposure_darkens() {
    let buffer = PixelBuffer::solid(1, 1, Rgba::gray(100));
    let out = apply_adjustments(&buffer, &adj(|a| a.exposure = -50.0)).unwrap();
    assert_eq!(out.get(0, 0).unwrap().r, 50);
}

#[test]
fn test_contrast_pivots_on_mid_gray() {
    let buffer = PixelBuffer::solid(2, 1, Rgba::gray(100));
    let out = apply_adjustments(&buffer, &adj(|a| a.contrast = 100.0)).unwrap();
    // (100 - 128) * 2 + 128 = 72
    assert_eq!(out.get(0, 0).unwrap().r, 72);

    let buffer = PixelBuffer::solid(1, 1, Rgba::gray(128));
    let out = apply_adjustments(&buffer, &adj(|a| a.contrast = 100.0)).unwrap();
    assert_eq!(out.get(0, 0).unwrap().r, 128);
}

#[test]
fn test_full_desaturation_grays_out() {
    let buffer = PixelBuffer::solid(1, 1, Rgba::new(200, 100, 50, 255));
    let out = apply_adjustments(&buffer, &adj(|a| a.saturation = -100.0)).unwrap();

    let px = out.get(0, 0).unwrap();
    assert_eq!(px.r, px.g);
    assert_eq!(px.g, px.b);
    // Lightness of (200, 100, 50) is (200 + 50) / 2 / 255
    assert_eq!(px.r, 125);
}

#[test]
fn test_hue_rotation() {
    let buffer = PixelBuffer::solid(1, 1, Rgba::new(255, 0, 0, 255));
    let out = apply_adjustments(&buffer, &adj(|a| a.hue = 100.0)).unwrap();

    let px = out.get(0, 0).unwrap();
    // Pure red rotated 100 degrees lands at (85, 255, 0)
    assert!((px.r as i16 - 85).abs() <= 1, "r = {}", px.r);
    assert_eq!(px.g, 255);
    assert_eq!(px.b, 0);
}

#[test]
fn test_warm_temperature_full_sepia() {
    let buffer = PixelBuffer::solid(1, 1, Rgba::gray(128));
    let out = apply_adjustments(&buffer, &adj(|a| a.temperature = 100.0)).unwrap();

    let px = out.get(0, 0).unwrap();
    assert_eq!((px.r, px.g, px.b), (173, 154, 120));
}

#[test]
fn test_cool_temperature_rotates_hue() {
    // At -100 the saturation multiplier is 1.0, so pure red becomes cyan
    let buffer = PixelBuffer::solid(1, 1, Rgba::new(255, 0, 0, 255));
    let out = apply_adjustments(&buffer, &adj(|a| a.temperature = -100.0)).unwrap();

    let px = out.get(0, 0).unwrap();
    assert_eq!((px.r, px.g, px.b), (0, 255, 255));
}

#[test]
fn test_shadows_lift_dark_pixels_only() {
    let mut buffer = PixelBuffer::solid(2, 1, Rgba::gray(50));
    buffer.set(1, 0, Rgba::gray(200)).unwrap();

    let out = apply_adjustments(&buffer, &adj(|a| a.shadows = 50.0)).unwrap();
    assert_eq!(out.get(0, 0).unwrap().r, 75);
    assert_eq!(out.get(1, 0).unwrap().r, 200);
}

#[test]
fn test_highlights_dim_bright_pixels_only() {
    let mut buffer = PixelBuffer::solid(2, 1, Rgba::gray(200));
    buffer.set(1, 0, Rgba::gray(50)).unwrap();

    let out = apply_adjustments(&buffer, &adj(|a| a.highlights = 50.0)).unwrap();
    assert_eq!(out.get(0, 0).unwrap().r, 100);
    assert_eq!(out.get(1, 0).unwrap().r, 50);
}

#[test]
fn test_luminance_128_takes_highlight_branch() {
    let buffer = PixelBuffer::solid(1, 1, Rgba::gray(128));
    let out = apply_adjustments(&buffer, &adj(|a| {
        a.shadows = 100.0;
        a.highlights = 50.0;
    }))
    .unwrap();
    assert_eq!(out.get(0, 0).unwrap().r, 64);
}

#[test]
fn test_alpha_untouched_by_tone_stages() {
    let buffer = PixelBuffer::solid(2, 2, Rgba::new(90, 60, 30, 42));
    let out = apply_adjustments(&buffer, &adj(|a| {
        a.exposure = 30.0;
        a.contrast = -20.0;
        a.saturation = 40.0;
        a.temperature = 25.0;
        a.shadows = 10.0;
    }))
    .unwrap();

    for chunk in out.data().chunks_exact(4) {
        assert_eq!(chunk[3], 42);
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let mut buffer = PixelBuffer::new(16, 16);
    for y in 0..16 {
        for x in 0..16 {
            let v = (x * 16 + y) as u8;
            buffer.set(x, y, Rgba::new(v, v.wrapping_mul(3), 255 - v, 255)).unwrap();
        }
    }
    let a = adj(|a| {
        a.exposure = 17.0;
        a.contrast = -33.0;
        a.saturation = 12.0;
        a.hue = 45.0;
        a.temperature = -20.0;
        a.shadows = 5.0;
        a.highlights = 9.0;
        a.sharpness = 25.0;
    });

    let first = apply_adjustments(&buffer, &a).unwrap();
    let second = apply_adjustments(&buffer, &a).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_set_clamps_to_range() {
    let mut a = Adjustments::default();
    a.set(AdjustmentField::Exposure, 250.0);
    a.set(AdjustmentField::Hue, -400.0);
    assert_eq!(a.exposure, 100.0);
    assert_eq!(a.hue, -100.0);

    a.set(AdjustmentField::Sharpness, 35.5);
    assert_eq!(a.get(AdjustmentField::Sharpness), 35.5);
    assert!(!a.is_identity());

    a.reset();
    assert!(a.is_identity());
}
