//! Configuration management for cruraster.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CruError, Result};
use crate::render::{OutputFormat, DEFAULT_BACKGROUND};

/// Command-line arguments for cruraster
#[derive(Parser, Debug)]
#[command(name = "cruraster")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the CRU ASCII grid file (omit or "-" to read stdin)
    pub input: Option<PathBuf>,

    /// Path of the image to write (omit or "-" to write stdout)
    #[arg(short, long, env = "CRURASTER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Exact number of time steps the input must contain
    #[arg(short, long, env = "CRURASTER_TIME_STEPS")]
    pub time_steps: Option<usize>,

    /// Output image format (tiff, png)
    #[arg(short, long, env = "CRURASTER_FORMAT")]
    pub format: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "CRURASTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CRURASTER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Input grid configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of time steps the input must contain (None = any whole number of grids)
    #[serde(default)]
    pub time_steps: Option<usize>,
}

/// Output image configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Image format
    #[serde(default = "default_format")]
    pub format: String,

    /// RGBA fill for cells without data
    #[serde(default = "default_background")]
    pub background: [u8; 4],
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input grid configuration
    #[serde(default)]
    pub grid: GridConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where to read the grid text and write the image. `None` means the
/// standard stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IoPaths {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, IoPaths)> {
        Self::from_args(Args::parse())
    }

    /// Layer parsed arguments over the config file and defaults
    pub fn from_args(args: Args) -> Result<(Self, IoPaths)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.time_steps.is_some() {
            config.grid.time_steps = args.time_steps;
        }
        if let Some(format) = args.format {
            config.output.format = format;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        let paths = IoPaths {
            input: args.input.filter(|p| !is_stdio(p)),
            output: args.output.filter(|p| !is_stdio(p)),
        };

        Ok((config, paths))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.grid.time_steps.is_some() {
            self.grid.time_steps = other.grid.time_steps;
        }
        self.output = other.output;
        self.log_level = other.log_level;
    }

    /// Parsed output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.output.format.parse()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.grid.time_steps == Some(0) {
            return Err(CruError::Config {
                message: "Time step count cannot be 0".to_string(),
            });
        }

        self.output_format()?;

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(CruError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            background: default_background(),
        }
    }
}

// Default value functions for serde
fn default_format() -> String {
    "tiff".to_string()
}

fn default_background() -> [u8; 4] {
    DEFAULT_BACKGROUND
}

fn default_log_level() -> String {
    "info".to_string()
}
