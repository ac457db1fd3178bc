//! Argument parsing helpers

use iriscope_core::AutoLevelsStrategy;

/// Parse an auto-levels strategy from string
///
/// Supported values:
/// - "banded" / "brightness-banded" (default): band the average brightness
/// - "percentile" / "percentile-trim": trim the 1%/99% luminance tails
pub fn parse_strategy(strategy_str: &str) -> Result<AutoLevelsStrategy, String> {
    match strategy_str.to_lowercase().as_str() {
        "banded" | "brightness" | "brightness-banded" => Ok(AutoLevelsStrategy::BrightnessBanded),
        "percentile" | "trim" | "percentile-trim" => Ok(AutoLevelsStrategy::PercentileTrim),
        _ => Err(format!(
            "Unknown auto-levels strategy: '{}'. Valid options: banded (default), percentile",
            strategy_str
        )),
    }
}
