//! Error types for recall operations.
//!
//! The taxonomy mirrors how failures are handled: only `Validation` is ever
//! surfaced to a caller; channel-class errors (embedding, keyword index,
//! vector store) are absorbed at the channel boundary and degrade the
//! response instead of failing it.

use thiserror::Error;

/// Result type alias for recall operations.
pub type RecallResult<T> = Result<T, RecallError>;

/// Main error type for all recall operations.
#[derive(Error, Debug)]
pub enum RecallError {
    /// Input validation failed. Rejected before any retrieval is attempted.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Embedding generation failed.
    #[error("Embedding error: {message}")]
    Embedding {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Keyword index operation failed.
    #[error("Keyword index error: {message}")]
    KeywordIndex {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vector store operation failed.
    #[error("Vector store error: {message}")]
    VectorStore {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Record store operation failed.
    #[error("Record store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Response cache operation failed. Recovered locally, never fatal.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error (construction time only).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecallError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error tied to a specific request field.
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
            source: None,
        }
    }

    /// Create a keyword index error.
    pub fn keyword_index(message: impl Into<String>) -> Self {
        Self::KeywordIndex {
            message: message.into(),
            source: None,
        }
    }

    /// Create a vector store error.
    pub fn vector_store(message: impl Into<String>) -> Self {
        Self::VectorStore {
            message: message.into(),
            source: None,
        }
    }

    /// Create a record store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error class is absorbed at a channel boundary
    /// rather than propagated to the caller.
    pub fn is_channel_error(&self) -> bool {
        matches!(
            self,
            Self::Embedding { .. } | Self::KeywordIndex { .. } | Self::VectorStore { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = RecallError::validation_field("q must not be empty", "q");
        assert!(err.to_string().contains("q must not be empty"));
        assert!(!err.is_channel_error());
    }

    #[test]
    fn test_channel_error_classification() {
        assert!(RecallError::embedding("down").is_channel_error());
        assert!(RecallError::keyword_index("down").is_channel_error());
        assert!(RecallError::vector_store("down").is_channel_error());
        assert!(!RecallError::Cache("full".into()).is_channel_error());
    }
}
