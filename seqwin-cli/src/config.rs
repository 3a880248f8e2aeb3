//! Configuration handling for the seqwin CLI
//!
//! Supports loading configuration from seqwin.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use seqwin_core::WindowConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub windows: WindowConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Number of decoded bases printed per window
    #[serde(default = "default_preview")]
    pub preview: usize,

    /// Windows printed by cyclic `stream` runs
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_preview() -> usize { 20 }
fn default_limit() -> usize { 100 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            preview: default_preview(),
            limit: default_limit(),
        }
    }
}

/// Command line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub window: Option<usize>,
    pub samples: Option<usize>,
    pub seed: Option<u64>,
    pub cyclic: bool,
    pub circular: bool,
    pub limit: Option<usize>,
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("seqwin.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: seqwin.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Apply command line overrides; flags only ever switch modes on
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(window) = overrides.window {
            self.windows.window_length = window;
        }
        if let Some(samples) = overrides.samples {
            self.windows.samples_per_record = samples;
        }
        if overrides.seed.is_some() {
            self.windows.seed = overrides.seed;
        }
        self.windows.cyclic |= overrides.cyclic;
        self.windows.circular |= overrides.circular;
        if let Some(limit) = overrides.limit {
            self.output.limit = limit;
        }
    }
}
