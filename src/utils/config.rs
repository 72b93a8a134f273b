//! Application configuration module.
//!
//! This module provides configuration management for docupright.
//! Configuration is loaded from a JSON file; every field is optional and
//! falls back to its default.

use super::error::ConfigError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::orientation::anchors::DEFAULT_MIN_FRAGMENT_CHARS;
use crate::orientation::DetectionMode;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/app_config.json";

/// Global configuration instance
static CONFIG_INSTANCE: OnceCell<AppConfig> = OnceCell::new();

/// Application configuration structure.
///
/// String fields use `Box<str>` since they are set once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Heuristic selection for a run
    pub detection_mode: DetectionMode,

    /// Minimum trimmed length of a text fragment to count as an anchor
    pub min_fragment_chars: usize,

    /// Undo rotation metadata on pages without text once a reference exists
    pub metadata_fallback: bool,

    /// Clear the reference between documents of a batch
    pub reset_per_document: bool,

    /// Directory corrected documents are written to
    pub output_directory: Box<str>,

    /// Appended to the input file stem to name the output file
    pub output_suffix: Box<str>,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration JSON file
    ///
    /// # Returns
    ///
    /// Returns the parsed `AppConfig` or a `ConfigError` if loading fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize the global configuration instance.
    ///
    /// This should be called once at application startup.
    pub fn init() -> Result<&'static Self, ConfigError> {
        CONFIG_INSTANCE.get_or_try_init(Self::load_default)
    }

    /// Initialize the global configuration instance from a specific file.
    pub fn init_from<P: AsRef<Path>>(path: P) -> Result<&'static Self, ConfigError> {
        CONFIG_INSTANCE.get_or_try_init(|| Self::from_file(path))
    }

    /// Create a new configuration with default values.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            detection_mode: DetectionMode::Auto,
            min_fragment_chars: DEFAULT_MIN_FRAGMENT_CHARS,
            metadata_fallback: false,
            reset_per_document: false,
            output_directory: "corrected".into(),
            output_suffix: "_corrected".into(),
        }
    }

    /// Get the output path for an input document.
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Directory to place the file in
    /// * `input` - The input document path (e.g., "scans/invoice.pdf")
    ///
    /// # Returns
    ///
    /// `<output_dir>/<stem><output_suffix>.<ext>`, e.g.
    /// `corrected/invoice_corrected.pdf`.
    #[must_use]
    pub fn output_path(&self, output_dir: &Path, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let file_name = match input.extension() {
            Some(ext) => format!("{stem}{}.{}", self.output_suffix, ext.to_string_lossy()),
            None => format!("{stem}{}", self.output_suffix),
        };
        output_dir.join(file_name)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
