//! Error handling for the review tool

use std::path::PathBuf;

use review_engine::{EngineError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Tool error types
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid stored item: {0}")]
    InvalidData(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Error body written to stderr
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ToolError {
    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Io { .. } => "io_error",
            ToolError::Json { .. } => "data_error",
            ToolError::Serialize(_) => "internal_error",
            ToolError::Config(_) => "config_error",
            ToolError::InvalidData(_) => "data_error",
            ToolError::Engine(EngineError::Validation(_)) => "validation_error",
            ToolError::Engine(EngineError::NotFound { .. }) => "not_found",
            ToolError::Engine(EngineError::Repository(_)) => "repository_error",
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::Engine(EngineError::Validation(_)) => 2,
            ToolError::Engine(EngineError::NotFound { .. }) => 3,
            ToolError::Config(_) => 4,
            ToolError::Io { .. } | ToolError::Json { .. } | ToolError::InvalidData(_) => 5,
            ToolError::Serialize(_) | ToolError::Engine(EngineError::Repository(_)) => 1,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;
