//! Configuration module for line-uploader.
//!
//! Supports both command-line arguments and TOML configuration file.
//! CLI arguments take precedence over config file values; with no
//! arguments and no file, the historical defaults apply
//! (`127.0.0.1:9876`, `client.py`).

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Command-line arguments for the uploader
#[derive(Parser, Debug, Default)]
#[command(name = "line-uploader")]
#[command(version = "0.1.0")]
#[command(about = "Streams a file line-by-line over TCP, one ack per line", long_about = None)]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target address to connect to (e.g., 127.0.0.1:9876)
    #[arg(short = 't', long)]
    pub target: Option<String>,

    /// File to upload
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable line format
    Text,
    /// One JSON object per event
    Json,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Target endpoint configuration
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// Address to connect to
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

/// Upload source configuration
#[derive(Debug, Deserialize)]
pub struct UploadConfig {
    /// File to stream, read in binary mode
    #[serde(default = "default_file")]
    pub file: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log output format
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:9876".to_string()
}

fn default_file() -> PathBuf {
    PathBuf::from("client.py")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub target: String,
    pub file: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = CliArgs::parse();

        // Load TOML config if specified
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };

        Ok(Self::merge(cli, toml_config))
    }

    /// Merge CLI args with TOML config (CLI takes precedence)
    pub fn merge(cli: CliArgs, toml_config: TomlConfig) -> Self {
        Config {
            target: cli.target.unwrap_or(toml_config.target.addr),
            file: cli.file.unwrap_or(toml_config.upload.file),
            log_level: if cli.log_level != "info" {
                cli.log_level
            } else {
                toml_config.logging.level
            },
            log_format: cli.log_format.unwrap_or(toml_config.logging.format),
        }
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    FileRead(PathBuf, std::io::Error),
    TomlParse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::TomlParse(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.target.addr, "127.0.0.1:9876");
        assert_eq!(config.upload.file, PathBuf::from("client.py"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [target]
            addr = "10.0.0.5:9000"

            [upload]
            file = "payload.txt"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.target.addr, "10.0.0.5:9000");
        assert_eq!(config.upload.file, PathBuf::from("payload.txt"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let toml_str = r#"
            [target]
            addr = "10.0.0.5:9000"

            [upload]
            file = "payload.txt"
        "#;
        let toml_config: TomlConfig = toml::from_str(toml_str).unwrap();

        let cli = CliArgs {
            target: Some("192.168.1.1:4242".to_string()),
            log_level: "info".to_string(),
            ..Default::default()
        };

        let config = Config::merge(cli, toml_config);
        assert_eq!(config.target, "192.168.1.1:4242");
        // File not given on the CLI falls back to the TOML value
        assert_eq!(config.file, PathBuf::from("payload.txt"));
    }

    #[test]
    fn test_defaults_without_cli_or_toml() {
        let cli = CliArgs {
            log_level: "info".to_string(),
            ..Default::default()
        };
        let config = Config::merge(cli, TomlConfig::default());
        assert_eq!(config.target, "127.0.0.1:9876");
        assert_eq!(config.file, PathBuf::from("client.py"));
        assert_eq!(config.log_format, LogFormat::Text);
    }
}
