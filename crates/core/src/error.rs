//! Error types for search result adaptation
//!
//! Every failure condition has its own documented kind. We use `thiserror`
//! for `Display` and `Error` implementations.
//!
//! - `MalformedResponse`: the backend response lacks a structurally required field
//! - `InvalidIdentifier`: a hit id cannot be converted to the store's identifier type
//! - `RecordNotFound`: a single-record fetch resolved nothing
//! - `Store`: opaque transport failure from the persistent store
//! - `Config`: configuration could not be read or is invalid

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Result type alias for search result operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Error type for search result operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Response is missing a field that has no sensible default
    #[error("Malformed search response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response
        reason: String,
    },

    /// A hit identifier could not be converted to the store identifier type
    #[error("Invalid identifier '{id}': {reason}")]
    InvalidIdentifier {
        /// The raw identifier as returned by the search backend
        id: String,
        /// Why conversion failed
        reason: String,
    },

    /// Single-record fetch found nothing for this identifier
    #[error("Record not found: {id}")]
    RecordNotFound {
        /// The identifier that failed to resolve
        id: String,
    },

    /// Store or backend transport error, propagated unchanged
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Create a MalformedResponse error
    pub fn malformed(reason: impl Into<String>) -> Self {
        SearchError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create an InvalidIdentifier error
    pub fn invalid_identifier(id: impl Into<String>, reason: impl fmt::Display) -> Self {
        SearchError::InvalidIdentifier {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a RecordNotFound error
    pub fn not_found(id: impl Into<String>) -> Self {
        SearchError::RecordNotFound { id: id.into() }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        SearchError::Config(message.into())
    }

    /// True if this is a MalformedResponse error
    pub fn is_malformed(&self) -> bool {
        matches!(self, SearchError::MalformedResponse { .. })
    }

    /// True if this is an InvalidIdentifier error
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, SearchError::InvalidIdentifier { .. })
    }

    /// True if this is a RecordNotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchError::RecordNotFound { .. })
    }

    /// True if the error came from the store
    pub fn is_store(&self) -> bool {
        matches!(self, SearchError::Store(_))
    }
}

/// Opaque error raised by a [`Store`](crate::contract::Store) implementation
///
/// Wraps whatever the underlying driver reports. This layer never inspects
/// or retries it.
#[derive(Debug)]
pub struct StoreError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl StoreError {
    /// Create a StoreError carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a driver error
    pub fn from_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        StoreError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.message, source),
            None => write!(f, "{}", self.message),
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn StdError + 'static))
    }
}
