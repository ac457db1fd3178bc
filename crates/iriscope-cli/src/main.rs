use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use iriscope_cli::{commands, parsers};
use iriscope_core::config::{load_config, set_verbose, ConfigHandle};
use iriscope_core::verbose_println;
use iriscope_core::{AdjustmentField, Adjustments};

#[derive(Parser)]
#[command(name = "iriscope")]
#[command(version, about = "Pixel-level analysis and tone adjustment for eye photographs")]
struct Cli {
    /// Config file path (defaults to searching the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a PNG image and print its statistics
    Analyze {
        /// Input PNG file
        input: PathBuf,

        /// Emit the full report as JSON, histograms included
        #[arg(long)]
        json: bool,

        /// Compute channel histograms inline instead of on the worker thread
        #[arg(long)]
        no_worker: bool,
    },
    /// Apply manual adjustments to a PNG image
    Adjust {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Exposure adjustment (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        exposure: f32,

        /// Contrast adjustment (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        contrast: f32,

        /// Saturation adjustment (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        saturation: f32,

        /// Hue rotation in degrees (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        hue: f32,

        /// Color temperature, warm positive and cool negative (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        temperature: f32,

        /// Shadow lift (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        shadows: f32,

        /// Highlight adjustment (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        highlights: f32,

        /// Sharpening amount (-100 to 100)
        #[arg(long, default_value_t = 0.0, value_name = "VALUE")]
        sharpness: f32,
    },
    /// Derive adjustments from the image statistics and apply them
    AutoLevels {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Strategy: banded (default) or percentile
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<String>,

        /// Print the derived adjustments as JSON
        #[arg(long)]
        json: bool,
    },
}

fn run(cli: Cli, handle: &ConfigHandle) -> Result<(), String> {
    let defaults = &handle.config.defaults;

    match cli.command {
        Commands::Analyze {
            input,
            json,
            no_worker,
        } => commands::analyze_image(&input, json, no_worker, defaults),
        Commands::Adjust {
            input,
            out,
            exposure,
            contrast,
            saturation,
            hue,
            temperature,
            shadows,
            highlights,
            sharpness,
        } => {
            let mut adjustments = Adjustments::default();
            for (field, value) in [
                (AdjustmentField::Exposure, exposure),
                (AdjustmentField::Contrast, contrast),
                (AdjustmentField::Saturation, saturation),
                (AdjustmentField::Hue, hue),
                (AdjustmentField::Temperature, temperature),
                (AdjustmentField::Shadows, shadows),
                (AdjustmentField::Highlights, highlights),
                (AdjustmentField::Sharpness, sharpness),
            ] {
                adjustments.set(field, value);
            }
            commands::adjust_image(&input, &out, &adjustments)
        }
        Commands::AutoLevels {
            input,
            out,
            strategy,
            json,
        } => {
            let strategy = match strategy {
                Some(name) => parsers::parse_strategy(&name)?,
                None => defaults.auto_levels_strategy,
            };
            commands::auto_level_image(&input, &out, strategy, json, defaults)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    let handle = load_config(cli.config.as_deref());
    for warning in &handle.warnings {
        eprintln!("Warning: {}", warning);
    }
    if let Some(source) = &handle.source {
        verbose_println!("[DEBUG] Loaded config from {}", source.display());
    }

    if let Err(e) = run(cli, &handle) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
