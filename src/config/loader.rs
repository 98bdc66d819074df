use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Smallest accepted `parser.line_limit`.
pub const MIN_LINE_LIMIT: usize = 16;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/vimgdb/config.toml` on Unix, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is known.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("vimgdb").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Editor and debugger programs are set
    /// - The default server name is not blank
    /// - The parser line limit is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.program.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "editor.program must not be empty".to_string(),
            });
        }

        if self.editor.server.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "editor.server must not be empty".to_string(),
            });
        }

        if self.debugger.program.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "debugger.program must not be empty".to_string(),
            });
        }

        if self.parser.line_limit < MIN_LINE_LIMIT {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "parser.line_limit must be at least {}, got {}",
                    MIN_LINE_LIMIT, self.parser.line_limit
                ),
            });
        }

        Ok(())
    }
}
