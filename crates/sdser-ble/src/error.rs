//! Error types for the BLE command layer.

use sdser_codec::CodecError;
use thiserror::Error;

/// Errors from the data-driven call layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BleError {
    /// No call with this name is known.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// No call with this opcode is known.
    #[error("unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// Encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type alias for the BLE command layer.
pub type BleResult<T> = Result<T, BleError>;
