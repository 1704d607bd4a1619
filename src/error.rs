//! Error types for strbuf operations.
//!
//! This module provides the error hierarchy using `thiserror` for buffer
//! mutation, tokenizing, numeric conversion, file reading, and CLI commands.
//! Every public operation returns [`Result`], so a payload can only be read
//! after the success case has been matched.

use thiserror::Error;

/// Result type alias for strbuf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer and list errors (bad indices, released storage).
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// Tokenizer errors.
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    /// Numeric conversion errors.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors raised by [`crate::ByteBuffer`] and [`crate::BufferList`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The buffer or list has been released and has no backing store.
    #[error("operation on a released buffer")]
    Released,

    /// Index outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length the index was checked against.
        len: usize,
    },

    /// Inclusive range whose start lies past its end.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange {
        /// Range start.
        start: usize,
        /// Range end.
        end: usize,
    },

    /// Count or capacity that must be positive was zero.
    #[error("invalid count: {count}")]
    InvalidCount {
        /// The rejected count.
        count: usize,
    },

    /// Search needle does not occur in the searched range.
    #[error("no match found")]
    NotFound,

    /// A null-terminated view was requested but the content holds a zero byte.
    #[error("interior nul byte at offset {offset}")]
    InteriorNul {
        /// Offset of the first zero byte.
        offset: usize,
    },

    /// Comparison involving a released buffer.
    #[error("cannot compare a released buffer")]
    Compare,
}

/// Tokenizer-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// Token grew past the configured maximum length.
    #[error("token at byte {offset} exceeds maximum length {max}")]
    TokenTooLong {
        /// Source offset where the token starts.
        offset: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Invalid tokenizer configuration.
    #[error("invalid tokenizer configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },
}

/// Numeric conversion errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Content is not a canonical signed 64-bit integer.
    #[error("cannot convert {input:?} to i64")]
    Int {
        /// Lossy rendering of the rejected input.
        input: String,
    },

    /// Content is not a plain decimal float.
    #[error("cannot convert {input:?} to f64")]
    Float {
        /// Lossy rendering of the rejected input.
        input: String,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// No more lines to read.
    #[error("end of input")]
    EndOfInput,

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        Self::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_error_display() {
        let err = BufferError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for length 3");

        let err = BufferError::InvalidRange { start: 4, end: 2 };
        assert_eq!(err.to_string(), "invalid range: start 4 is greater than end 2");

        assert_eq!(BufferError::NotFound.to_string(), "no match found");
        assert_eq!(
            BufferError::Released.to_string(),
            "operation on a released buffer"
        );
    }

    #[test]
    fn test_tokenize_error_display() {
        let err = TokenizeError::TokenTooLong { offset: 10, max: 4 };
        assert_eq!(
            err.to_string(),
            "token at byte 10 exceeds maximum length 4"
        );
    }

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError::Int {
            input: "007".to_string(),
        };
        assert_eq!(err.to_string(), "cannot convert \"007\" to i64");
    }

    #[test]
    fn test_io_error_display() {
        let err = IoError::FileNotFound {
            path: "/tmp/test.txt".to_string(),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/test.txt");
        assert_eq!(IoError::EndOfInput.to_string(), "end of input");
    }

    #[test]
    fn test_error_from_variants() {
        let err: Error = BufferError::NotFound.into();
        assert!(matches!(err, Error::Buffer(BufferError::NotFound)));

        let err: Error = IoError::EndOfInput.into();
        assert!(matches!(err, Error::Io(IoError::EndOfInput)));

        let err: Error = CommandError::InvalidArgument("--x".to_string()).into();
        assert!(err.to_string().contains("invalid argument"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(IoError::Generic(_))));
    }
}
