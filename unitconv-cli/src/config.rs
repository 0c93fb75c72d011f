//! Shell configuration from the environment

use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const PRECISION_VAR: &str = "UNITCONV_PRECISION";
pub const OUTPUT_VAR: &str = "UNITCONV_OUTPUT";

/// Decimals shown for results unless configured otherwise
pub const DEFAULT_PRECISION: usize = 4;
const MAX_PRECISION: usize = 15;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{} must be an integer between 0 and {}, got '{}'", PRECISION_VAR, MAX_PRECISION, .0)]
    InvalidPrecision(String),
    #[error("{} must be 'text' or 'json', got '{}'", OUTPUT_VAR, .0)]
    InvalidOutput(String),
}

/// How results and errors are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutput(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    /// Decimals used when displaying a result
    pub precision: usize,
    pub output: OutputFormat,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            precision: DEFAULT_PRECISION,
            output: OutputFormat::Text,
        }
    }
}

impl ShellConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ShellConfig::default();

        if let Some(raw) = lookup(PRECISION_VAR) {
            config.precision = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|p| *p <= MAX_PRECISION)
                .ok_or(ConfigError::InvalidPrecision(raw))?;
        }

        if let Some(raw) = lookup(OUTPUT_VAR) {
            config.output = raw.parse()?;
        }

        Ok(config)
    }
}
