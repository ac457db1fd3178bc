//! Automatic level correction
//!
//! Two heuristics coexist as selectable strategies and are never merged:
//! a brightness-banded rule set driven by the analysis statistics, and a
//! percentile-trim rule that discards the 1% tails of the luminance
//! distribution before computing its correction. Both write only exposure,
//! contrast, shadows, and highlights; saturation, hue, temperature, and
//! sharpness are never touched.

use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisResult, NUM_BINS};
use crate::buffer::PixelBuffer;
use crate::tone::{Adjustments, ADJUSTMENT_MAX, ADJUSTMENT_MIN};

/// Which auto-levels heuristic to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoLevelsStrategy {
    /// Band the average brightness into dark/bright/mid regimes
    #[default]
    BrightnessBanded,
    /// Trim the 1%/99% luminance tails and normalize the remaining range
    PercentileTrim,
}

/// Run the selected strategy against a buffer, rewriting `adjustments`
pub fn auto_levels(
    buffer: &PixelBuffer,
    strategy: AutoLevelsStrategy,
    adjustments: &mut Adjustments,
) -> Result<(), String> {
    match strategy {
        AutoLevelsStrategy::BrightnessBanded => {
            let analysis = analysis::analyze(buffer)?;
            brightness_banded(&analysis, adjustments);
            Ok(())
        }
        AutoLevelsStrategy::PercentileTrim => percentile_trim(buffer, adjustments),
    }
}

/// Brightness-banded correction from a finished analysis pass
///
/// Idempotent for an unchanged [`AnalysisResult`]: every write depends only
/// on the analysis, not on the previous adjustment values. Bands that do
/// not fire leave their fields alone.
pub fn brightness_banded(analysis: &AnalysisResult, adjustments: &mut Adjustments) {
    let b = analysis.avg_brightness;

    if b < 85.0 {
        adjustments.exposure = ((100.0 - b) / 100.0 * 70.0).min(70.0);
        adjustments.shadows = ((80.0 - b) / 80.0 * 60.0).min(60.0);
    } else if b > 170.0 {
        adjustments.exposure = -(((b - 155.0) / 100.0 * 50.0).min(50.0));
        adjustments.highlights = ((b - 155.0) / 100.0 * 60.0).min(60.0);
    } else {
        adjustments.exposure = (128.0 - b) / 128.0 * 50.0;
    }

    // A flat range pushes contrast up; a stretched one pulls it back down
    let current_range = analysis.contrast_range.span() as f32;
    adjustments.contrast = if current_range < 100.0 {
        ((180.0 / current_range - 1.0) * 70.0).min(70.0)
    } else if current_range > 200.0 {
        -(((current_range / 180.0 - 1.0) * 30.0).min(30.0))
    } else {
        (180.0 / current_range - 1.0) * 40.0
    };

    adjustments.clamp_all();
}

/// Percentile-trim correction from the raw buffer
///
/// Recomputes the luminance histogram and a raw-count CDF on its own; the
/// trim thresholds compare against pixel counts, not the scaled CDF the
/// analysis pass produces.
pub fn percentile_trim(
    buffer: &PixelBuffer,
    adjustments: &mut Adjustments,
) -> Result<(), String> {
    let total_pixels = buffer.pixel_count();
    if total_pixels == 0 {
        return Err("cannot auto-level an empty buffer".to_string());
    }

    let mut histogram = [0u64; NUM_BINS];
    for pixel in buffer.data().chunks_exact(4) {
        let lum = analysis::luminance(pixel[0], pixel[1], pixel[2]);
        histogram[lum as usize] += 1;
    }

    let mut cdf = [0u64; NUM_BINS];
    let mut accumulator = 0u64;
    for (i, &count) in histogram.iter().enumerate() {
        accumulator += count;
        cdf[i] = accumulator;
    }

    let lower_bound = total_pixels as f64 * 0.01;
    let upper_bound = total_pixels as f64 * 0.99;

    let mut cdf_min = 0i32;
    for (i, &value) in cdf.iter().enumerate() {
        if value as f64 > lower_bound {
            cdf_min = i as i32;
            break;
        }
    }

    let mut cdf_max = 255i32;
    for (i, &value) in cdf.iter().enumerate().rev() {
        if (value as f64) < upper_bound {
            cdf_max = i as i32;
            break;
        }
    }

    // Degenerate single-bin images make the range zero or negative; the
    // division saturates and the clamp below pins the result
    let brightness_range = (cdf_max - cdf_min) as f32;
    let desired_range = 220.0;
    let contrast = (desired_range / brightness_range - 1.0) * 100.0;
    let exposure = (128.0 - (cdf_min + cdf_max) as f32 / 2.0) / 128.0 * 100.0;

    adjustments.contrast = contrast.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);
    adjustments.exposure = exposure.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX);

    Ok(())
}
