//! # Embed Error Types
//!
//! Typed error handling for the embedded checkout bridge.
//! All bridge operations return `Result<T, EmbedError>`.

use thiserror::Error;

/// Core error type for all embed operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// The checkout link could not be parsed as an absolute URL
    #[error("Invalid checkout URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A trigger element carried neither an href nor a marker value
    #[error("Trigger element has no checkout URL")]
    MissingCheckoutUrl,

    /// Theme value outside of `light` / `dark`
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    /// A protocol-tagged message had a payload we could not decode
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// `close()` called on a session that is already torn down
    #[error("Embedded checkout is already closed")]
    AlreadyClosed,

    /// The checkout was closed before it signalled `loaded`
    #[error("Embedded checkout was closed before it finished loading")]
    ClosedBeforeLoad,

    /// The checkout did not signal `loaded` within the configured timeout
    #[error("Embedded checkout did not load within {timeout_ms} ms")]
    TimedOut { timeout_ms: u32 },

    /// A DOM call failed (element creation, insertion, removal)
    #[error("DOM error: {0}")]
    Dom(String),

    /// No window/document/body available
    #[error("Environment error: {0}")]
    Environment(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EmbedError {
    /// Returns true if the error stems from a caller contract violation
    /// rather than a runtime fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EmbedError::InvalidUrl { .. }
                | EmbedError::MissingCheckoutUrl
                | EmbedError::InvalidTheme(_)
                | EmbedError::AlreadyClosed
        )
    }

    /// Returns true if the session ended without ever becoming ready
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            EmbedError::ClosedBeforeLoad | EmbedError::TimedOut { .. }
        )
    }

    /// Build an `InvalidUrl` error from the raw input and parse failure
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        EmbedError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for embed operations
pub type EmbedResult<T> = Result<T, EmbedError>;
