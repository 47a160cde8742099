//! Configuration file support
//!
//! TOML settings for the CLI. Command-line flags override file values.
//!
//! ```toml
//! [resolve]
//! reject_overlapping_rules = true
//! auto_join_rules = false
//!
//! [output]
//! format = "json"
//! show_statistics = true
//! show_segments = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Local config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "canonical-pages.toml";

/// Directory under the user config dir
pub const APP_CONFIG_DIR: &str = "canonical-pages";

/// Config loading error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Output format of the `resolve` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// `[resolve]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Refuse to resolve snapshots whose rules overlap
    pub reject_overlapping_rules: bool,
    /// Join contiguous continuing rules before resolving
    pub auto_join_rules: bool,
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_statistics: bool,
    pub show_segments: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_statistics: true,
            show_segments: false,
        }
    }
}

/// Complete CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolve: ResolveConfig,
    pub output: OutputConfig,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub show_statistics: Option<bool>,
    pub show_segments: Option<bool>,
    pub reject_overlapping_rules: Option<bool>,
    pub auto_join_rules: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_show_statistics(mut self, show: bool) -> Self {
        self.show_statistics = Some(show);
        self
    }

    #[must_use]
    pub fn with_show_segments(mut self, show: bool) -> Self {
        self.show_segments = Some(show);
        self
    }

    #[must_use]
    pub fn with_reject_overlapping_rules(mut self, reject: bool) -> Self {
        self.reject_overlapping_rules = Some(reject);
        self
    }

    #[must_use]
    pub fn with_auto_join_rules(mut self, join: bool) -> Self {
        self.auto_join_rules = Some(join);
        self
    }
}

impl Config {
    /// Candidate config files in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(APP_CONFIG_DIR).join("config.toml"));
        }
        paths
    }

    /// Load the first config file found, or defaults when there is none
    pub fn load() -> Result<Self> {
        match Self::search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply command-line overrides
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Config {
        Config {
            resolve: ResolveConfig {
                reject_overlapping_rules: cli
                    .reject_overlapping_rules
                    .unwrap_or(self.resolve.reject_overlapping_rules),
                auto_join_rules: cli.auto_join_rules.unwrap_or(self.resolve.auto_join_rules),
            },
            output: OutputConfig {
                format: cli.format.unwrap_or(self.output.format),
                show_statistics: cli.show_statistics.unwrap_or(self.output.show_statistics),
                show_segments: cli.show_segments.unwrap_or(self.output.show_segments),
            },
        }
    }
}
