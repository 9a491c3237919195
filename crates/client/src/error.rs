//! Gateway error taxonomy.
//!
//! Four families, each with its own recovery path:
//! - validation failures are raised client-side, before any network call;
//! - a 401 forces a logout (handled by the gateway) and a redirect to login;
//!   a 403 is surfaced without touching the session;
//! - business-rule failures carry the backend's message verbatim when one is
//!   present, else a per-action fallback;
//! - timeouts and transport failures prompt the user to retry by hand —
//!   nothing here is idempotent-safe to retry blindly.

use thiserror::Error;

use ampunv_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Caught client-side; the request was never sent.
    #[error("{0}")]
    Validation(String),

    /// 401: the session has been cleared; log in again.
    #[error("your session has expired, please log in again")]
    Unauthorized,

    /// 403: the action is not allowed for this account. Session kept.
    #[error("{0}")]
    Forbidden(String),

    /// Backend-reported business failure, message surfaced verbatim.
    #[error("{0}")]
    Business(String),

    #[error("not found")]
    NotFound,

    /// The fixed client-side timeout elapsed. No automatic retry.
    #[error("the request timed out, please try again")]
    Timeout,

    /// Transport-level failure. No automatic retry.
    #[error("a network error occurred, please try again")]
    Network(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Backend message when present, else the action-specific fallback.
    pub fn business(server_message: Option<String>, fallback: &str) -> Self {
        match server_message {
            Some(msg) if !msg.trim().is_empty() => Self::Business(msg),
            _ => Self::Business(fallback.to_string()),
        }
    }

    /// True when the caller should redirect to the login entry point.
    pub fn forces_logout(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
