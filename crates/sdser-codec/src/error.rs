//! Error types for sdser-codec.

use thiserror::Error;

/// Errors raised while encoding a request or decoding a response.
///
/// A well-formed response whose result code reports a failure is *not* an
/// error at this level; see [`crate::Reply::RemoteFailure`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A mandatory argument was not supplied.
    #[error("required argument `{field}` is absent")]
    NullArgument {
        /// Name of the missing argument.
        field: &'static str,
    },

    /// An argument is internally inconsistent (e.g. a declared length that
    /// disagrees with the supplied bytes).
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The destination buffer cannot hold the next field group.
    #[error("buffer too small: need {needed} bytes at offset {offset}, capacity is {capacity}")]
    BufferTooSmall {
        /// Cursor position when the check failed.
        offset: usize,
        /// Bytes that had to fit from `offset` onwards.
        needed: usize,
        /// Total capacity of the destination buffer.
        capacity: usize,
    },

    /// The packet was shorter or longer than the decoder required.
    #[error("length mismatch: decoder expected {expected} bytes, packet has {actual}")]
    LengthMismatch {
        /// Number of bytes the decoder needed (or consumed).
        expected: usize,
        /// Declared packet length.
        actual: usize,
    },

    /// A presence marker held something other than PRESENT / NOT_PRESENT.
    #[error("unexpected presence marker 0x{value:02X} at offset {offset}")]
    UnexpectedMarker {
        /// Offset of the marker byte.
        offset: usize,
        /// The byte that was found.
        value: u8,
    },

    /// The response echoes a different opcode than the call being decoded.
    #[error("opcode mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    OpcodeMismatch {
        /// Opcode of the call this decoder was built for.
        expected: u8,
        /// Opcode found in the packet.
        actual: u8,
    },
}

/// Broad classes of [`CodecError`] that call for different reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The caller violated the API contract. Fix the call; retrying is pointless.
    Contract,
    /// Not enough room in the destination buffer. Retry with a larger one.
    Capacity,
    /// The packet is malformed or out of sync. Re-request it.
    Malformed,
}

impl CodecError {
    /// Create a null-argument error.
    pub fn null_argument(field: &'static str) -> Self {
        CodecError::NullArgument { field }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        CodecError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Which class this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            CodecError::NullArgument { .. } | CodecError::InvalidArgument { .. } => {
                ErrorClass::Contract
            }
            CodecError::BufferTooSmall { .. } => ErrorClass::Capacity,
            CodecError::LengthMismatch { .. }
            | CodecError::UnexpectedMarker { .. }
            | CodecError::OpcodeMismatch { .. } => ErrorClass::Malformed,
        }
    }

    /// Whether the caller can react to this error at runtime (as opposed to
    /// fixing the calling code).
    pub fn is_recoverable(&self) -> bool {
        self.class() != ErrorClass::Contract
    }
}

/// Result alias used throughout the codec.
pub type CodecResult<T> = Result<T, CodecError>;
