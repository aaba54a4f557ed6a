//! Error handling types for katachi
//!
//! Every failure in the manipulation core is synchronous and surfaced to the
//! caller as a [`MorphError`]; nothing is retried internally.

use thiserror::Error;

/// Comprehensive error type for node queries and manipulation
#[derive(Debug, Error)]
pub enum MorphError {
    /// The requested operation is not valid for the node in its current position
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    /// An `*_or_throw` accessor did not find the expected relation
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The handle refers to a node whose text was removed by an earlier edit
    #[error("Invalid node: handle {index}@{generation} was removed or forgotten")]
    InvalidNode { index: u32, generation: u32 },

    /// The tree could not be resynchronized with the text buffer.
    ///
    /// Fatal for the owning source file: every later operation on it fails
    /// with this error.
    #[error("Re-sync failed: {message}")]
    Resync { message: String },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Structure or output JSON could not be processed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for node queries and manipulation
pub type MorphResult<T> = Result<T, MorphError>;

/// Helper functions for common error patterns
impl MorphError {
    /// Create an invalid operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        MorphError::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        MorphError::NotFound {
            message: message.into(),
        }
    }

    /// Create a re-sync error
    pub fn resync(message: impl Into<String>) -> Self {
        MorphError::Resync {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        MorphError::Config {
            message: message.into(),
        }
    }

    /// True for errors raised because a handle outlived its node
    pub fn is_invalid_node(&self) -> bool {
        matches!(self, MorphError::InvalidNode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_helpers_format_messages() {
        let err = MorphError::invalid_operation("parent must be a source file");
        assert_eq!(
            err.to_string(),
            "Invalid operation: parent must be a source file"
        );

        let err = MorphError::not_found("parent");
        assert_eq!(err.to_string(), "Not found: parent");
    }

    #[test]
    fn test_invalid_node_is_detectable() {
        let err = MorphError::InvalidNode {
            index: 3,
            generation: 1,
        };
        assert!(err.is_invalid_node());
        assert!(!MorphError::resync("parser cancelled").is_invalid_node());
    }
}
