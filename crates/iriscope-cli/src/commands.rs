//! Subcommand implementations

use std::path::Path;
use std::time::Instant;

use iriscope_core::config::PipelineDefaults;
use iriscope_core::verbose_println;
use iriscope_core::{
    analyze, apply_adjustments, compute_channel_histograms, Adjustments, AutoLevelsStrategy,
    EyeSide, HistogramWorker, Session,
};

use crate::io;
use crate::report::AnalysisReport;

/// Analyze an image and print its statistics
pub fn analyze_image(
    input: &Path,
    json: bool,
    no_worker: bool,
    defaults: &PipelineDefaults,
) -> Result<(), String> {
    let buffer = io::decode_png_rgba(input)?;
    verbose_println!(
        "[DEBUG] Loaded {}x{} image from {}",
        buffer.width(),
        buffer.height(),
        input.display()
    );

    let analysis = analyze(&buffer)?;

    let channels = if no_worker {
        compute_channel_histograms(&buffer)
    } else {
        let worker = HistogramWorker::spawn();
        let pending = worker.submit(buffer.clone())?;
        pending.wait(defaults.worker_timeout())?
    };

    let report = AnalysisReport::new(&buffer, &analysis, &channels);
    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        println!("{}", out);
    } else {
        report.print_summary();
    }

    Ok(())
}

/// Apply a manual adjustment set and write the rendered result
pub fn adjust_image(input: &Path, output: &Path, adjustments: &Adjustments) -> Result<(), String> {
    let buffer = io::decode_png_rgba(input)?;
    if adjustments.is_identity() {
        verbose_println!("[DEBUG] All adjustments at defaults; output will match input");
    }

    let rendered = apply_adjustments(&buffer, adjustments)?;
    io::export_png(&rendered, output)?;
    println!("Wrote {}", output.display());

    Ok(())
}

/// Derive adjustments from the image statistics, apply them, and write
/// the rendered result
pub fn auto_level_image(
    input: &Path,
    output: &Path,
    strategy: AutoLevelsStrategy,
    json: bool,
    defaults: &PipelineDefaults,
) -> Result<(), String> {
    let buffer = io::decode_png_rgba(input)?;

    let mut session = Session::new(defaults.debounce());
    session.load_image(EyeSide::Left, buffer);
    session.auto_levels(strategy, Instant::now())?;
    session.render_now(EyeSide::Left)?;

    let adjustments = *session.adjustments(EyeSide::Left);
    if json {
        let out = serde_json::to_string_pretty(&adjustments)
            .map_err(|e| format!("Failed to serialize adjustments: {}", e))?;
        println!("{}", out);
    } else {
        println!("Derived adjustments ({:?}):", strategy);
        println!("  exposure:   {:.2}", adjustments.exposure);
        println!("  contrast:   {:.2}", adjustments.contrast);
        println!("  shadows:    {:.2}", adjustments.shadows);
        println!("  highlights: {:.2}", adjustments.highlights);
    }

    let display = session
        .display(EyeSide::Left)
        .ok_or_else(|| "render produced no display buffer".to_string())?;
    io::export_png(display, output)?;
    println!("Wrote {}", output.display());

    Ok(())
}
