//! Iriscope Core Library
//!
//! Pixel-level analysis and tone adjustment for the iriscope eye photograph
//! annotation tool: single-pass histogram statistics, CDF-based auto-levels,
//! convolution sharpening, and luminance-split shadow/highlight correction
//! over raw RGBA8 buffers. The frontends feed decoded rasters in and render
//! whatever buffer comes back; no I/O happens here.

pub mod analysis;
pub mod auto_levels;
pub mod buffer;
pub mod color;
pub mod config;
pub mod convolve;
mod parallel;
pub mod session;
pub mod tone;

// Re-export commonly used types
pub use analysis::{
    analyze, compute_channel_histograms, find_percentile_point, AnalysisResult, ChannelHistograms,
    ColorCast, ContrastRange, CumulativeDistribution, Histogram, HistogramWorker,
};
pub use auto_levels::{auto_levels, AutoLevelsStrategy};
pub use buffer::{PixelBuffer, Rgba};
pub use color::Hsl;
pub use session::{AdjustmentCommand, EyeSide, Session};
pub use tone::{apply_adjustments, AdjustmentField, Adjustments};
