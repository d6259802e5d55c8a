//! # Common Error Types
//!
//! Consolidated error handling for the API client.
//!
//! Every public operation returns [`Result<T>`]. The client is error-transparent:
//! services never swallow an [`ApiError`] except the two best-effort reads
//! (`BookmarkService::is_bookmarked`, `NotificationService::get_unread_count`).
//!
//! ## Error Categories
//!
//! - **Transport**: [`Network`](ApiError::Network), [`Http`](ApiError::Http)
//! - **Session**: [`Unauthorized`](ApiError::Unauthorized), [`SessionExpired`](ApiError::SessionExpired)
//! - **Envelope**: [`Api`](ApiError::Api), [`Decode`](ApiError::Decode), [`Encode`](ApiError::Encode)
//! - **Local**: [`Storage`](ApiError::Storage), [`Validation`](ApiError::Validation), [`Config`](ApiError::Config)
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use client::core::error::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     if err.is_session_ended() {
//!         "please log in again"
//!     } else {
//!         "something went wrong"
//!     }
//! }
//! ```

use thiserror::Error;

/// Client-wide error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure, timeout or unreadable response body.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response that the auth interceptor did not recover.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 401 that could not be recovered: no refresh token was available, or the
    /// request was rejected again after a successful refresh.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The refresh call itself failed. Local auth state has been cleared.
    #[error("Session expired: {0}")]
    SessionExpired(Box<ApiError>),

    /// Envelope reported `success: false`, or succeeded without `data`.
    #[error("{0}")]
    Api(String),

    /// Response body is not a valid envelope or payload.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body could not be serialized.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Persistent key-value storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid client configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the caller should treat the session as ended and send the user
    /// back to a login surface.
    pub fn is_session_ended(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::SessionExpired(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::SessionExpired(inner) => inner.status(),
            _ => None,
        }
    }
}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<lib_utils::validation::Error> for ApiError {
    fn from(err: lib_utils::validation::Error) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<lib_utils::envs::Error> for ApiError {
    fn from(err: lib_utils::envs::Error) -> Self {
        ApiError::Config(err.to_string())
    }
}
