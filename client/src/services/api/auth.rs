//! # Authentication Endpoints
//!
//! Login, registration, logout, session refresh and the current profile.
//!
//! Auth state machine:
//!
//! ```text
//! Unauthenticated ──login/register──► Authenticated
//!        ▲                                  │
//!        └── logout | refresh failure | 401 without refresh token
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use lib_utils::{validate_email, validate_min_length, validate_not_empty};
use shared::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, User};

use super::client::ApiClient;
use super::transport::HttpRequest;
use crate::core::{AuthApi, Result};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Real authentication against the API.
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Load a persisted session. Returns the cached user when one was restored.
    pub async fn restore_session(&self) -> Result<Option<User>> {
        if !self.client.tokens().restore().await? {
            return Ok(None);
        }
        self.client.tokens().get_user().await
    }

    /// Force a token refresh with the stored refresh token.
    pub async fn refresh(&self) -> Result<String> {
        self.client.refresh_session().await
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        validate_not_empty(current_password, "Current password")?;
        validate_min_length(new_password, MIN_PASSWORD_LENGTH, "New password")?;
        let body = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.client
            .request_unit(HttpRequest::put("/auth/password").json(&body)?)
            .await
    }

    /// Profile cached at login, without a network call.
    pub async fn cached_user(&self) -> Result<Option<User>> {
        self.client.tokens().get_user().await
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.tokens().is_authenticated()
    }
}

#[async_trait]
impl AuthApi for AuthService {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        validate_not_empty(email, "Email")?;
        validate_email(email)?;
        validate_not_empty(password, "Password")?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let session: AuthResponse = self.client.post_public("/auth/login", &request).await?;
        self.client.tokens().store_session(&session).await?;
        tracing::info!(user_id = %session.user.id, "Login successful");
        Ok(session)
    }

    #[tracing::instrument(skip(self, request), fields(username = %request.username))]
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        validate_min_length(request.username.trim(), MIN_USERNAME_LENGTH, "Username")?;
        validate_email(&request.email)?;
        validate_min_length(&request.password, MIN_PASSWORD_LENGTH, "Password")?;

        let session: AuthResponse = self.client.post_public("/auth/register", &request).await?;
        self.client.tokens().store_session(&session).await?;
        tracing::info!(user_id = %session.user.id, "Registration successful");
        Ok(session)
    }

    async fn logout(&self) -> Result<()> {
        if self.client.tokens().get_auth_token().await?.is_some() {
            if let Err(e) = self.client.post_unit("/auth/logout").await {
                tracing::warn!(error = %e, "Server logout failed, clearing local session anyway");
            }
        }
        self.client.tokens().clear_auth().await
    }

    async fn current_user(&self) -> Result<User> {
        let user: User = self.client.get("/auth/me").await?;
        self.client.tokens().set_user(&user).await?;
        Ok(user)
    }
}
