//! Recap Configuration Management
//!
//! Handles configuration from environment variables and config files
//! with sensible defaults. The pipeline itself is pure; the only
//! runtime knobs are logging and the multiple-match comment policy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Extraction pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(policy) = std::env::var("RECAP_COMMENT_POLICY") {
            config.pipeline.comment_policy = policy.parse()?;
        }

        if let Ok(level) = std::env::var("RECAP_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;

        if env_config.pipeline.comment_policy != PipelineConfig::default().comment_policy {
            self.pipeline.comment_policy = env_config.pipeline.comment_policy;
        }
        if env_config.logging.level != LoggingConfig::default().level {
            self.logging.level = env_config.logging.level;
        }

        Ok(self)
    }
}

/// Extraction pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    /// How to build the comment when several sentences match one field
    #[serde(default)]
    pub comment_policy: CommentPolicy,
}

/// Policy for the Comments column when multiple sentences match a field.
///
/// The field value always comes from the first matching sentence in
/// document order; this policy only controls the comment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentPolicy {
    /// Keep only the first matching sentence (deterministic default)
    #[default]
    FirstMatch,
    /// Join every matching sentence, in document order
    ConcatAll,
}

impl std::str::FromStr for CommentPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-match" | "first_match" | "first" => Ok(Self::FirstMatch),
            "concat-all" | "concat_all" | "concat" => Ok(Self::ConcatAll),
            _ => Err(ConfigError::InvalidValue {
                key: "RECAP_COMMENT_POLICY".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pipeline.comment_policy, CommentPolicy::FirstMatch);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_comment_policy_parse() {
        assert_eq!(
            "first-match".parse::<CommentPolicy>().unwrap(),
            CommentPolicy::FirstMatch
        );
        assert_eq!(
            "concat-all".parse::<CommentPolicy>().unwrap(),
            CommentPolicy::ConcatAll
        );
        assert!("newest".parse::<CommentPolicy>().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [pipeline]
            comment_policy = "concat-all"

            [logging]
            level = "debug"
            include_location = true
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pipeline.comment_policy, CommentPolicy::ConcatAll);
        assert_eq!(config.logging.level, "debug");
    }
}
