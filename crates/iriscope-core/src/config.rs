//! Pipeline configuration management
//!
//! Provides configuration loading, the global verbose flag, and the tunable
//! defaults for render scheduling and the histogram worker.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Deserialize;

use crate::auto_levels::AutoLevelsStrategy;

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Candidate config file names searched in the working directory
const CONFIG_FILENAMES: &[&str] = &["iriscope.yml", "iriscope.yaml"];

/// Handle that stores the loaded configuration, its source path, and warnings
pub struct ConfigHandle {
    pub config: PipelineConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub defaults: PipelineDefaults,
}

impl PipelineConfig {
    fn sanitize(mut self) -> Self {
        self.defaults.sanitize();
        self
    }
}

/// Tunable pipeline defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineDefaults {
    /// Quiet period between the last adjustment command and a re-render
    pub debounce_ms: u64,
    /// How long to wait for the histogram worker before erroring out
    pub worker_timeout_ms: u64,
    /// Strategy used when auto-levels is invoked without an explicit choice
    pub auto_levels_strategy: AutoLevelsStrategy,
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            worker_timeout_ms: 2000,
            auto_levels_strategy: AutoLevelsStrategy::BrightnessBanded,
        }
    }
}

impl PipelineDefaults {
    /// Clamp out-of-range values back to something workable
    fn sanitize(&mut self) {
        self.debounce_ms = self.debounce_ms.min(5_000);
        self.worker_timeout_ms = self.worker_timeout_ms.clamp(1, 60_000);
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn worker_timeout(&self) -> Duration {
        Duration::from_millis(self.worker_timeout_ms)
    }
}

/// Parse a configuration document
fn parse_config(contents: &str) -> Result<PipelineConfig, String> {
    serde_yaml::from_str::<PipelineConfig>(contents)
        .map(PipelineConfig::sanitize)
        .map_err(|e| format!("Failed to parse config: {}", e))
}

/// Load configuration from an explicit path, or search the working
/// directory for the candidate file names
///
/// Never fails: a missing or unparsable file falls back to defaults and is
/// reported through `warnings`.
pub fn load_config(explicit: Option<&Path>) -> ConfigHandle {
    let mut warnings = Vec::new();

    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => CONFIG_FILENAMES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists()),
    };

    if let Some(path) = candidate {
        match fs::read_to_string(&path) {
            Ok(contents) => match parse_config(&contents) {
                Ok(config) => {
                    return ConfigHandle {
                        config,
                        source: Some(path),
                        warnings,
                    }
                }
                Err(e) => warnings.push(format!("{}: {}", path.display(), e)),
            },
            Err(e) => warnings.push(format!("Failed to read {}: {}", path.display(), e)),
        }
    }

    ConfigHandle {
        config: PipelineConfig::default(),
        source: None,
        warnings,
    }
}
