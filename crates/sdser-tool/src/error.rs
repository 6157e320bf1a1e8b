//! Error type for the inspection tool.

use sdser_ble::BleError;
use sdser_codec::CodecError;
use thiserror::Error;

/// Errors that can occur while running a tool command.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Ble(#[from] BleError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
