//! Analysis report formatting
//!
//! Flattens an analysis result into a serializable report for `--json`
//! consumers and a human-readable summary for the terminal.

use serde::Serialize;

use iriscope_core::{find_percentile_point, AnalysisResult, ChannelHistograms, PixelBuffer};

/// Per-channel histogram counts in serializable form
#[derive(Debug, Serialize)]
pub struct HistogramReport {
    pub red: Vec<u32>,
    pub green: Vec<u32>,
    pub blue: Vec<u32>,
    pub luminance: Vec<u32>,
}

/// Mean channel intensities
#[derive(Debug, Serialize)]
pub struct CastReport {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

/// Complete statistics for one analyzed image
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub width: u32,
    pub height: u32,
    pub avg_brightness: f32,
    pub color_cast: CastReport,
    pub contrast_min: u8,
    pub contrast_max: u8,
    pub contrast_span: u8,
    /// Luminance levels at the 1st, 50th, and 99th CDF percentiles
    pub percentile_low: u8,
    pub percentile_mid: u8,
    pub percentile_high: u8,
    pub histogram: HistogramReport,
}

impl AnalysisReport {
    pub fn new(
        buffer: &PixelBuffer,
        analysis: &AnalysisResult,
        channels: &ChannelHistograms,
    ) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            avg_brightness: analysis.avg_brightness,
            color_cast: CastReport {
                red: analysis.color_cast.r,
                green: analysis.color_cast.g,
                blue: analysis.color_cast.b,
            },
            contrast_min: analysis.contrast_range.min,
            contrast_max: analysis.contrast_range.max,
            contrast_span: analysis.contrast_range.span(),
            percentile_low: find_percentile_point(&analysis.cdf, 0.01),
            percentile_mid: find_percentile_point(&analysis.cdf, 0.50),
            percentile_high: find_percentile_point(&analysis.cdf, 0.99),
            histogram: HistogramReport {
                red: channels.red.to_vec(),
                green: channels.green.to_vec(),
                blue: channels.blue.to_vec(),
                luminance: analysis.histogram.luminance.to_vec(),
            },
        }
    }

    /// Print the headline statistics (the histogram stays JSON-only)
    pub fn print_summary(&self) {
        println!("Image:          {}x{}", self.width, self.height);
        println!("Avg brightness: {:.1}", self.avg_brightness);
        println!(
            "Color cast:     R {:.1}  G {:.1}  B {:.1}",
            self.color_cast.red, self.color_cast.green, self.color_cast.blue
        );
        println!(
            "Contrast range: {}..{} (span {})",
            self.contrast_min, self.contrast_max, self.contrast_span
        );
        println!(
            "Percentiles:    1% = {}  50% = {}  99% = {}",
            self.percentile_low, self.percentile_mid, self.percentile_high
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iriscope_core::{analyze, compute_channel_histograms, Rgba};

    #[test]
    fn test_report_from_solid_gray() {
        let buffer = PixelBuffer::solid(4, 2, Rgba::gray(128));
        let analysis = analyze(&buffer).unwrap();
        let channels = compute_channel_histograms(&buffer);
        let report = AnalysisReport::new(&buffer, &analysis, &channels);

        assert_eq!(report.width, 4);
        assert_eq!(report.height, 2);
        assert_eq!(report.avg_brightness, 128.0);
        assert_eq!(report.contrast_min, 128);
        assert_eq!(report.contrast_max, 128);
        assert_eq!(report.contrast_span, 0);
        assert_eq!(report.histogram.red[128], 8);
        assert_eq!(report.histogram.luminance.iter().sum::<u32>(), 8);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let buffer = PixelBuffer::solid(2, 2, Rgba::gray(10));
        let analysis = analyze(&buffer).unwrap();
        let channels = compute_channel_histograms(&buffer);
        let report = AnalysisReport::new(&buffer, &analysis, &channels);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"avg_brightness\""));
        assert!(json.contains("\"histogram\""));
    }
}
