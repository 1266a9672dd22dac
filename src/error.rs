//! Error handling for the huffpack library
//!
//! This module provides the crate-wide error type with detailed error
//! information for table construction, encoding, and decoding.

use thiserror::Error;

/// Main error type for the huffpack library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffpackError {
    /// Invalid input data or a violated call precondition
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Invalid configuration or a structural limit exceeded
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// The decoder lost code-word alignment inside a record
    #[error("Decode desynchronized in record {record}")]
    Desynchronized {
        /// Index of the record whose reconstruction was aborted
        record: usize,
    },
}

impl HuffpackError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a desynchronization error for the given record index
    pub fn desynchronized(record: usize) -> Self {
        Self::Desynchronized { record }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidData { .. } => "data",
            Self::Configuration { .. } => "config",
            Self::Desynchronized { .. } => "desync",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HuffpackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = HuffpackError::invalid_data("test message");
        assert_eq!(err.category(), "data");

        let err = HuffpackError::configuration("window too narrow");
        assert_eq!(err.category(), "config");

        let err = HuffpackError::desynchronized(7);
        assert_eq!(err.category(), "desync");
    }

    #[test]
    fn test_error_display() {
        let err = HuffpackError::invalid_data("empty batch");
        let display = format!("{}", err);
        assert!(display.contains("Invalid data"));
        assert!(display.contains("empty batch"));

        let desync = HuffpackError::desynchronized(3);
        let display = format!("{}", desync);
        assert!(display.contains("record 3"));
    }

    #[test]
    fn test_error_debug() {
        let err = HuffpackError::configuration("debug test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Configuration"));
        assert!(debug_str.contains("debug test"));
    }
}
