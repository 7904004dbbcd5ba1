//! Error types for OxiHuff operations.
//!
//! One error type covers the whole pipeline: I/O failures from the
//! underlying reader/writer, header validation failures, and truncated
//! payloads detected while walking the code tree.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The leading 32 bits do not identify a tree-header stream.
    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        /// Expected magic value.
        expected: u32,
        /// Actual value found at the start of the stream.
        found: u32,
    },

    /// A header mode that has no codec.
    #[error("Unsupported method: {method}")]
    UnsupportedMethod {
        /// Name of the rejected mode.
        method: String,
    },

    /// The serialized tree is structurally invalid.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// The bit source ran dry before the end-of-stream symbol was decoded.
    #[error("Truncated stream at bit position {bit_position}")]
    TruncatedStream {
        /// Bit position where the source was exhausted.
        bit_position: u64,
    },

    /// A byte turned up in the encoding pass that the counting pass never saw.
    #[error("Symbol {symbol} has no code (input changed between passes?)")]
    UnknownSymbol {
        /// The byte value without a code.
        symbol: u16,
    },

    /// A strict read asked for more bits than the source holds.
    #[error("Unexpected end of stream at bit position {bit_position}")]
    UnexpectedEof {
        /// Bit position where the read failed.
        bit_position: u64,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, HuffError>;

impl HuffError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: u32, found: u32) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create an unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64) -> Self {
        Self::TruncatedStream { bit_position }
    }

    /// Create an unknown symbol error.
    pub fn unknown_symbol(symbol: u16) -> Self {
        Self::UnknownSymbol { symbol }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Whether this error means the input ended too early.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::TruncatedStream { .. } | Self::UnexpectedEof { .. }
        )
    }
}
