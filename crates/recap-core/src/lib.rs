//! Recap Core - shared types for the candidate-profile extraction system
//!
//! This crate defines the abstractions used throughout recap:
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, CommentPolicy, ConfigError, LoggingConfig, PipelineConfig};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for recap operations
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Entity tagging failed: {0}")]
    TaggerError(String),

    #[error("Invalid field schema: {0}")]
    InvalidSchema(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error reading {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for RecapError {
    fn from(e: ConfigError) -> Self {
        Self::ConfigError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecapError>;
