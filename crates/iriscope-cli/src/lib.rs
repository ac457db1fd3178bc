//! Shared utilities for iriscope-cli
//!
//! PNG input/output, argument parsing helpers, and report formatting used
//! by the command line frontend.

pub mod commands;
pub mod io;
pub mod parsers;
pub mod report;

// Re-export commonly used items at the crate root for convenience
pub use io::{decode_png_rgba, export_png};
pub use parsers::parse_strategy;
pub use report::AnalysisReport;
