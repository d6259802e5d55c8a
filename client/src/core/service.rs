//! # Service Traits
//!
//! Seams for dependency injection. Production code wires the reqwest transport,
//! the file-backed store and the real auth service; tests swap in fakes.

use async_trait::async_trait;
use shared::{AuthResponse, RegisterRequest, User};

use super::error::Result;
use crate::services::api::transport::{HttpRequest, HttpResponse};

/// Sends one HTTP request and returns the raw response.
///
/// Implementations resolve `request.path` against their base URL, enforce the
/// request timeout and report connection failures as `ApiError::Network`.
/// Any received status, including non-2xx, is returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Platform key-value storage used to persist the session.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// Authentication operations.
///
/// Implemented by [`AuthService`](crate::services::api::auth::AuthService) and by
/// the development-only [`MockAuthService`](crate::services::mock_auth::MockAuthService)
/// decorator.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Log in and persist the returned session.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;

    /// Create an account and persist the returned session.
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse>;

    /// End the session. Local auth state is cleared even if the server call fails.
    async fn logout(&self) -> Result<()>;

    /// Profile of the logged-in user.
    async fn current_user(&self) -> Result<User>;
}
