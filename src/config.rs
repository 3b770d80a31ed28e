//! # Configuration Management
//!
//! Centralized configuration for the codec and its logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`
//!
//! ## Security Considerations
//! - The default size limit (16 MB) bounds the work a single decode can do, and
//!   a codec built from configuration applies it to encode as well
//! - Alignment is part of the wire format; every reader and writer of the same
//!   data must use the same value

use crate::error::{constants, CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Default alignment: pointer width
pub const DEFAULT_ALIGNMENT: usize = std::mem::size_of::<usize>();

pub use crate::core::align::MAX_ALIGNMENT;

/// Default size limit for a single encoded record (16 MB)
pub const MAX_INPUT_SIZE: usize = 16 * 1024 * 1024;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Wire layout and decode limits
    #[serde(default)]
    pub codec: CodecConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| CodecError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CodecError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    ///
    /// Unparseable values are reported as errors rather than ignored, since a
    /// silently wrong alignment produces unreadable data.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("RECORD_WIRE_ALIGNMENT") {
            config.codec.alignment = value.parse::<usize>().map_err(|e| {
                CodecError::ConfigError(format!("Invalid RECORD_WIRE_ALIGNMENT '{value}': {e}"))
            })?;
        }

        if let Ok(value) = std::env::var("RECORD_WIRE_MAX_INPUT_SIZE") {
            config.codec.max_input_size = value.parse::<usize>().map_err(|e| {
                CodecError::ConfigError(format!(
                    "Invalid RECORD_WIRE_MAX_INPUT_SIZE '{value}': {e}"
                ))
            })?;
        }

        if let Ok(value) = std::env::var("RECORD_WIRE_LOG_LEVEL") {
            config.logging.log_level = value.parse::<Level>().map_err(|_| {
                CodecError::ConfigError(format!("Invalid RECORD_WIRE_LOG_LEVEL '{value}'"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CodecError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| CodecError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.codec.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        strict(self.validate())
    }
}

fn strict(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CodecError::ConfigError(format!(
            "Configuration validation failed:\n  - {}",
            errors.join("\n  - ")
        )))
    }
}

/// Wire layout and decode limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodecConfig {
    /// Field alignment in bytes; a power of two
    pub alignment: usize,

    /// Largest encoded record, in bytes. Decode rejects larger input and
    /// encode refuses to produce it.
    pub max_input_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alignment: DEFAULT_ALIGNMENT,
            max_input_size: MAX_INPUT_SIZE,
        }
    }
}

impl CodecConfig {
    /// Validate codec configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.alignment == 0 {
            errors.push(constants::ERR_ALIGNMENT_ZERO.to_string());
        } else if !self.alignment.is_power_of_two() {
            errors.push(format!(
                "{}: {}",
                constants::ERR_ALIGNMENT_NOT_POWER_OF_TWO,
                self.alignment
            ));
        } else if self.alignment > MAX_ALIGNMENT {
            errors.push(format!(
                "{}: {} (maximum: {MAX_ALIGNMENT})",
                constants::ERR_ALIGNMENT_TOO_LARGE,
                self.alignment
            ));
        }

        if self.max_input_size == 0 {
            errors.push(constants::ERR_MAX_INPUT_ZERO.to_string());
        } else if self.max_input_size < 1024 {
            errors.push("Max input size too small (minimum: 1 KB)".to_string());
        } else if self.max_input_size > 1024 * 1024 * 1024 {
            errors.push(format!(
                "Max input size too large: {} bytes (maximum: 1 GB)",
                self.max_input_size
            ));
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        strict(self.validate())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("record-wire"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push(constants::ERR_EMPTY_APP_NAME.to_string());
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push(constants::ERR_LOG_FILE_PATH_MISSING.to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors.push(constants::ERR_NO_LOG_OUTPUT.to_string());
        }

        errors
    }
}

/// Levels are written lowercase, as `RUST_LOG` spells them
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&level.as_str().to_ascii_lowercase())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
