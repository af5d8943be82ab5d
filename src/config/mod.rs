//! Configuration system for jread.
//!
//! This module provides the configuration structure for the jread driver with
//! sensible defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments.
//!
//! # Example
//!
//! ```
//! use jread::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.max_depth, 512);
//! assert_eq!(config.max_file_size, 1024 * 1024);
//!
//! // Create custom configuration
//! let custom = Config {
//!     speed_runs: 10,
//!     ..Config::default()
//! };
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the jread driver.
///
/// All fields have sensible defaults via `Config::default()`.
///
/// # Fields
///
/// * `max_depth` - Deepest container nesting accepted while scanning (default: 512)
/// * `max_file_size` - Inputs of this many bytes or more are rejected (default: 1 MiB)
/// * `string_capacity` - Capacity of string buffers used by the demo (default: 128)
/// * `speed_runs` - Query repetitions in the speed test (default: 100000)
/// * `long_iterations` - Full array traversals in the long test (default: 1000)
/// * `long_elements` - Size of the generated array in the long test (default: 10000)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Deepest container nesting accepted while scanning
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Inputs of this many bytes or more are rejected
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,

    /// Capacity of string buffers used by the demo
    #[serde(default = "default_string_capacity")]
    pub string_capacity: usize,

    /// Query repetitions in the speed test
    #[serde(default = "default_speed_runs")]
    pub speed_runs: u64,

    /// Full array traversals in the long test
    #[serde(default = "default_long_iterations")]
    pub long_iterations: u64,

    /// Number of elements in the generated long test document
    #[serde(default = "default_long_elements")]
    pub long_elements: usize,
}

fn default_max_depth() -> usize {
    crate::document::DEFAULT_MAX_DEPTH
}

/// Returns the default input size limit (1 MiB).
fn default_max_file_size() -> usize {
    1024 * 1024
}

fn default_string_capacity() -> usize {
    128
}

fn default_speed_runs() -> u64 {
    100_000
}

fn default_long_iterations() -> u64 {
    1000
}

fn default_long_elements() -> usize {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_file_size: default_max_file_size(),
            string_capacity: default_string_capacity(),
            speed_runs: default_speed_runs(),
            long_iterations: default_long_iterations(),
            long_elements: default_long_elements(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jread/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jread");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }
}
