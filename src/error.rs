//! Error types for the WebSub subscriber client.
//!
//! Every protocol-level failure surfaces as
//! [`WebSubError::SubscriptionInitiationFailed`], tagged with the [`Mode`] of the
//! request and the hub that was being addressed when it failed. The concrete
//! reason is carried as an [`InitiationFailure`].
//!
//! # Examples
//!
//! ```
//! use websub_client::{InitiationFailure, Mode, WebSubError};
//!
//! let err = WebSubError::initiation_failed(
//!     Mode::Subscribe,
//!     "https://hub.example/",
//!     InitiationFailure::Unexplained { status: 500 },
//! );
//! assert_eq!(err.mode(), Some(Mode::Subscribe));
//! assert!(err.to_string().starts_with("subscription initiation failed"));
//! ```

use crate::types::Mode;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, WebSubError>;

/// Errors produced by the subscriber client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebSubError {
    /// A subscribe or unsubscribe request could not be settled.
    #[error("{} initiation failed for hub {hub}: {failure}", .mode.noun())]
    SubscriptionInitiationFailed {
        /// Mode of the failed request
        mode: Mode,
        /// Hub URL the failing exchange was addressed to
        hub: String,
        /// What went wrong
        failure: InitiationFailure,
    },

    /// The hub URL given to the client could not be parsed.
    #[error("Invalid hub URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Client configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A response header could not be parsed.
    #[error("Header parse error: {0}")]
    HeaderParse(String),

    /// Hub and topic discovery failed.
    #[error("Discovery failed: {0}")]
    Discovery(String),
}

/// Cause of a [`WebSubError::SubscriptionInitiationFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitiationFailure {
    /// The network exchange itself failed (connect, timeout, TLS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The hub redirected but the client is not configured to follow redirects.
    #[error("hub responded with redirect {status} but following redirects is disabled")]
    RedirectsDisabled {
        /// Redirect status code
        status: u16,
    },

    /// The hub redirected after the redirect budget was used up.
    #[error("hub responded with redirect {status} after the limit of {limit} redirect(s) was reached")]
    RedirectLimitExhausted {
        /// Redirect status code
        status: u16,
        /// Configured maximum number of redirects
        limit: u32,
    },

    /// A redirect arrived without a readable `Location` header.
    #[error("hub responded with redirect {status} without a readable Location header")]
    MissingLocation {
        /// Redirect status code
        status: u16,
    },

    /// The `Location` header could not be resolved to a URL.
    #[error("redirect location '{location}' is not a valid URL: {reason}")]
    InvalidLocation {
        /// Raw header value
        location: String,
        /// Parser message
        reason: String,
    },

    /// The hub rejected the request and explained why in its response body.
    #[error("hub responded with status {status}: {body}")]
    Rejected {
        /// Response status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The hub rejected the request without a readable explanation.
    #[error("hub responded with status {status}; the cause could not be determined")]
    Unexplained {
        /// Response status code
        status: u16,
    },
}

impl WebSubError {
    /// Build a [`WebSubError::SubscriptionInitiationFailed`].
    pub fn initiation_failed(mode: Mode, hub: impl Into<String>, failure: InitiationFailure) -> Self {
        WebSubError::SubscriptionInitiationFailed {
            mode,
            hub: hub.into(),
            failure,
        }
    }

    /// Mode of the failed request, if this is an initiation failure.
    pub fn mode(&self) -> Option<Mode> {
        match self {
            WebSubError::SubscriptionInitiationFailed { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    /// Hub the failing exchange was addressed to, if this is an initiation failure.
    pub fn hub(&self) -> Option<&str> {
        match self {
            WebSubError::SubscriptionInitiationFailed { hub, .. } => Some(hub),
            _ => None,
        }
    }

    /// Underlying cause, if this is an initiation failure.
    pub fn failure(&self) -> Option<&InitiationFailure> {
        match self {
            WebSubError::SubscriptionInitiationFailed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Whether the failure was caused by a redirect that could not be followed.
    pub fn is_redirect_failure(&self) -> bool {
        matches!(
            self.failure(),
            Some(
                InitiationFailure::RedirectsDisabled { .. }
                    | InitiationFailure::RedirectLimitExhausted { .. }
                    | InitiationFailure::MissingLocation { .. }
                    | InitiationFailure::InvalidLocation { .. }
            )
        )
    }

    /// Whether the failure happened at the transport layer.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self.failure(), Some(InitiationFailure::Transport(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsubscribe_phrasing() {
        let err = WebSubError::initiation_failed(
            Mode::Unsubscribe,
            "https://hub.example/",
            InitiationFailure::Rejected {
                status: 404,
                body: "unknown topic".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "unsubscription initiation failed for hub https://hub.example/: \
             hub responded with status 404: unknown topic"
        );
        assert_eq!(err.hub(), Some("https://hub.example/"));
    }

    #[test]
    fn test_redirect_failure_predicate() {
        let err = WebSubError::initiation_failed(
            Mode::Subscribe,
            "https://hub.example/",
            InitiationFailure::RedirectsDisabled { status: 307 },
        );
        assert!(err.is_redirect_failure());
        assert!(!err.is_transport_failure());

        let err = WebSubError::InvalidUrl("nope".to_string());
        assert!(!err.is_redirect_failure());
        assert_eq!(err.mode(), None);
    }
}
