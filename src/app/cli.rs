//! Command-line arguments, optional TOML config file, and the merged result
//!
//! Precedence: command line / environment, then the config file, then the
//! built-in defaults. Range checks happen once, on the merged values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_FRAME_MS, DEFAULT_HISTORY_CAPACITY, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL,
    DEFAULT_SAMPLE_INTERVAL_MS, MAX_FRAME_MS, MAX_HISTORY_CAPACITY, MAX_SAMPLE_INTERVAL_MS,
    MIN_FRAME_MS, MIN_SAMPLE_INTERVAL_MS,
};

use super::overlay::OverlayConfig;

/// Parsed command-line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "sysmon-overlay")]
#[command(about = "Live CPU, memory, process, service and network overlay for the terminal")]
#[command(version)]
#[command(after_help = "CONTROLS:
    q         Quit
    Tab       Next tab (1-4 jump directly)
    /         Search by name
    Esc       Clear search
    Enter     Action menu for the selected process
    k         End the selected process (asks Y/N)
    [/]       Slow down/speed up sampling")]
pub struct Args {
    /// Sampling interval in milliseconds [default: 1000, range: 100-60000]
    #[arg(short = 'i', long, env = "SYSMON_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Number of CPU/RAM samples kept for the graphs [default: 100, range: 1-10000]
    #[arg(short = 'n', long = "history", env = "SYSMON_HISTORY")]
    pub history_capacity: Option<usize>,

    /// Initial search term for process and service names
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Render tick in milliseconds [default: 50, range: 10-1000]
    #[arg(long)]
    pub frame_ms: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log file path [default: sysmon-overlay.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset, e.g. "debug" [default: info]
    #[arg(long, env = "SYSMON_LOG")]
    pub log_level: Option<String>,
}

/// Keys accepted in the config file. All optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub interval_ms: Option<u64>,
    pub history_capacity: Option<usize>,
    pub frame_ms: Option<u64>,
    pub filter: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Startup configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{field} = {value} is out of range, must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub interval_ms: u64,
    pub history_capacity: usize,
    pub frame_ms: u64,
    pub filter: String,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            frame_ms: DEFAULT_FRAME_MS,
            filter: String::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl Config {
    /// Loads the config file named by `args`, if any, and merges.
    pub fn resolve(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    /// Command line over file over defaults, then validates.
    pub fn merge(args: Args, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = Config::default();
        let config = Config {
            interval_ms: args
                .interval_ms
                .or(file.interval_ms)
                .unwrap_or(defaults.interval_ms),
            history_capacity: args
                .history_capacity
                .or(file.history_capacity)
                .unwrap_or(defaults.history_capacity),
            frame_ms: args.frame_ms.or(file.frame_ms).unwrap_or(defaults.frame_ms),
            filter: args.filter.or(file.filter).unwrap_or(defaults.filter),
            log_level: args.log_level.or(file.log_level).unwrap_or(defaults.log_level),
            log_file: args.log_file.or(file.log_file).unwrap_or(defaults.log_file),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "interval_ms",
            self.interval_ms,
            MIN_SAMPLE_INTERVAL_MS,
            MAX_SAMPLE_INTERVAL_MS,
        )?;
        check_range(
            "history_capacity",
            self.history_capacity as u64,
            1,
            MAX_HISTORY_CAPACITY as u64,
        )?;
        check_range("frame_ms", self.frame_ms, MIN_FRAME_MS, MAX_FRAME_MS)?;
        Ok(())
    }

    pub fn overlay(&self) -> OverlayConfig {
        OverlayConfig {
            sample_interval: Duration::from_millis(self.interval_ms),
            history_capacity: self.history_capacity,
            initial_filter: self.filter.clone(),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
