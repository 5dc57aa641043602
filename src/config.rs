//! Command-line flags and the optional TOML settings file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use student_scores::ScoreRange;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "student-scores.toml";

/// Upper limits applied when loading `[charts]`.
pub const MAX_FACET_COLUMNS: usize = 12;
pub const MAX_HISTOGRAM_BINS: usize = 200;

#[derive(Parser, Debug)]
#[command(name = "student-scores")]
#[command(about = "Interactive explorer for student math scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dataset to open (.csv, .json or .parquet); overrides `data_path`
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset opened at startup
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Facets per row in the study-hours line view
    #[serde(default = "default_facet_columns")]
    pub facet_columns: usize,
    /// Bins in each marginal histogram of the scatter view
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Initial slider position on the Counts tab
    #[serde(default)]
    pub default_range: ScoreRange,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("datasets/student-scores.csv")
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    900.0
}

fn default_facet_columns() -> usize {
    3
}

fn default_histogram_bins() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            window: WindowConfig::default(),
            charts: ChartsConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            facet_columns: default_facet_columns(),
            histogram_bins: default_histogram_bins(),
            default_range: ScoreRange::FULL,
        }
    }
}

impl Config {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Config::default());
                }
                fallback
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.sanitize();

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Build the effective configuration from command-line flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(data) = &cli.data {
            config.data_path = data.clone();
        }
        Ok(config)
    }

    fn sanitize(&mut self) {
        if self.charts.facet_columns == 0 {
            log::warn!("charts.facet_columns must be at least 1, using 1");
            self.charts.facet_columns = 1;
        } else if self.charts.facet_columns > MAX_FACET_COLUMNS {
            log::warn!(
                "charts.facet_columns = {} is too large, using {MAX_FACET_COLUMNS}",
                self.charts.facet_columns
            );
            self.charts.facet_columns = MAX_FACET_COLUMNS;
        }
        if self.charts.histogram_bins == 0 {
            log::warn!("charts.histogram_bins must be at least 1, using default");
            self.charts.histogram_bins = default_histogram_bins();
        } else if self.charts.histogram_bins > MAX_HISTOGRAM_BINS {
            log::warn!(
                "charts.histogram_bins = {} is too large, using {MAX_HISTOGRAM_BINS}",
                self.charts.histogram_bins
            );
            self.charts.histogram_bins = MAX_HISTOGRAM_BINS;
        }
    }
}
