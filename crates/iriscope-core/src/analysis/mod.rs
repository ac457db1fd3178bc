//! Image statistics extraction
//!
//! Single-pass analysis over an RGBA buffer: per-channel and luminance
//! histograms, average color cast, average brightness, observed luminance
//! range, and the cumulative distribution used for percentile lookups.
//! The auto-levels engine and display overlays both consume the result.

mod worker;


pub use worker::{compute_channel_histograms, ChannelHistograms, HistogramWorker, PendingHistograms};

use crate::buffer::PixelBuffer;
use crate::parallel::parallel_fold_reduce;

/// Number of intensity bins per channel
pub const NUM_BINS: usize = 256;

/// Per-channel and luminance intensity histograms (256 bins each)
///
/// Each histogram sums to the pixel count of the analyzed buffer.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub red: [u32; NUM_BINS],
    pub green: [u32; NUM_BINS],
    pub blue: [u32; NUM_BINS],
    pub luminance: [u32; NUM_BINS],
}

/// Average channel values across all pixels, pre-rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCast {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Observed luminance range; `min <= max`, both in 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContrastRange {
    pub min: u8,
    pub max: u8,
}

impl ContrastRange {
    /// Width of the observed range; zero when `min` exceeds `max`
    pub fn span(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }
}

/// Cumulative distribution of the luminance histogram
///
/// 256 non-decreasing values scaled to the 0-255 range, kept fractional so
/// percentile lookups can compare against `percentile * 255` exactly.
/// The last value is 255.0 for any non-empty buffer.
#[derive(Debug, Clone)]
pub struct CumulativeDistribution {
    values: [f32; NUM_BINS],
}

impl CumulativeDistribution {
    /// Running-sum over a luminance histogram, normalized to 0-255
    pub fn from_luminance_histogram(histogram: &[u32; NUM_BINS], total_pixels: usize) -> Self {
        let total = total_pixels as f64;
        let mut values = [0.0f32; NUM_BINS];
        let mut accumulator = 0u64;

        for (i, &count) in histogram.iter().enumerate() {
            accumulator += count as u64;
            values[i] = (accumulator as f64 / total * 255.0) as f32;
        }

        Self { values }
    }

    pub fn values(&self) -> &[f32; NUM_BINS] {
        &self.values
    }

    pub fn value(&self, intensity: u8) -> f32 {
        self.values[intensity as usize]
    }
}

/// Complete result of one analysis pass; immutable after construction
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub histogram: Histogram,
    pub color_cast: ColorCast,
    pub avg_brightness: f32,
    pub contrast_range: ContrastRange,
    pub cdf: CumulativeDistribution,
}

/// Luminance of an RGB byte triple, rounded to the nearest intensity
///
/// Uses the standard luma weights; the weights sum to 1.0 so the result
/// always fits in a byte.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
}

/// Running state of the single analysis pass
#[derive(Clone)]
struct Accumulator {
    red: [u32; NUM_BINS],
    green: [u32; NUM_BINS],
    blue: [u32; NUM_BINS],
    luminance: [u32; NUM_BINS],
    r_sum: u64,
    g_sum: u64,
    b_sum: u64,
    brightness_sum: u64,
    lum_min: u8,
    lum_max: u8,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            red: [0; NUM_BINS],
            green: [0; NUM_BINS],
            blue: [0; NUM_BINS],
            luminance: [0; NUM_BINS],
            r_sum: 0,
            g_sum: 0,
            b_sum: 0,
            brightness_sum: 0,
            lum_min: 255,
            lum_max: 0,
        }
    }

    fn fold(mut self, pixel: &[u8]) -> Self {
        let (r, g, b) = (pixel[0], pixel[1], pixel[2]);

        self.red[r as usize] += 1;
        self.green[g as usize] += 1;
        self.blue[b as usize] += 1;

        let lum = luminance(r, g, b);
        self.luminance[lum as usize] += 1;
        self.brightness_sum += lum as u64;
        self.lum_min = self.lum_min.min(lum);
        self.lum_max = self.lum_max.max(lum);

        self.r_sum += r as u64;
        self.g_sum += g as u64;
        self.b_sum += b as u64;

        self
    }

    fn merge(mut self, other: Self) -> Self {
        for i in 0..NUM_BINS {
            self.red[i] += other.red[i];
            self.green[i] += other.green[i];
            self.blue[i] += other.blue[i];
            self.luminance[i] += other.luminance[i];
        }
        self.r_sum += other.r_sum;
        self.g_sum += other.g_sum;
        self.b_sum += other.b_sum;
        self.brightness_sum += other.brightness_sum;
        self.lum_min = self.lum_min.min(other.lum_min);
        self.lum_max = self.lum_max.max(other.lum_max);
        self
    }
}

/// Analyze a buffer in a single pass over all pixels
///
/// Returns an error for a zero-area buffer rather than propagating NaN
/// averages downstream.
pub fn analyze(buffer: &PixelBuffer) -> Result<AnalysisResult, String> {
    let total_pixels = buffer.pixel_count();
    if total_pixels == 0 {
        return Err(format!(
            "cannot analyze an empty {}x{} buffer",
            buffer.width(),
            buffer.height()
        ));
    }

    let acc = parallel_fold_reduce(
        buffer.data(),
        4,
        Accumulator::new,
        Accumulator::fold,
        Accumulator::merge,
    );

    let total = total_pixels as f64;
    let color_cast = ColorCast {
        r: (acc.r_sum as f64 / total) as f32,
        g: (acc.g_sum as f64 / total) as f32,
        b: (acc.b_sum as f64 / total) as f32,
    };
    let avg_brightness = (acc.brightness_sum as f64 / total) as f32;
    let cdf = CumulativeDistribution::from_luminance_histogram(&acc.luminance, total_pixels);

    Ok(AnalysisResult {
        histogram: Histogram {
            red: acc.red,
            green: acc.green,
            blue: acc.blue,
            luminance: acc.luminance,
        },
        color_cast,
        avg_brightness,
        contrast_range: ContrastRange {
            min: acc.lum_min,
            max: acc.lum_max,
        },
        cdf,
    })
}

/// First intensity whose CDF value reaches `percentile * 255`
///
/// Scans intensities in increasing order; returns 255 when no bin satisfies
/// the target (degenerate all-dark or all-bright images).
pub fn find_percentile_point(cdf: &CumulativeDistribution, percentile: f32) -> u8 {
    let target = percentile * 255.0;
    for (i, &value) in cdf.values().iter().enumerate() {
        if value >= target {
            return i as u8;
        }
    }
    255
}
