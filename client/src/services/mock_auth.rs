//! # Mock Authentication
//!
//! Development-only decorator over a real [`AuthApi`]. Credentials matching a
//! fixture account are answered locally after a simulated delay with a
//! synthetic token of the form:
//!
//! ```text
//! mock-jwt-token-<userId>-<unix millis>
//! ```
//!
//! Everything else is forwarded to the wrapped service. While a mock token is
//! active, `current_user` and `logout` never touch the network.
//!
//! Enabled with `MOCK_AUTH=1`; see [`build_auth`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared::{AuthResponse, RegisterRequest, User};

use super::api::{ApiClient, AuthService};
use crate::config::ClientConfig;
use crate::core::{ApiError, AuthApi, Result};
use crate::storage::TokenStore;

pub const MOCK_TOKEN_PREFIX: &str = "mock-jwt-token-";
/// Lifetime reported for synthetic tokens.
pub const MOCK_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// A fixture login.
#[derive(Debug, Clone)]
pub struct MockAccount {
    pub email: String,
    pub password: String,
    pub user: User,
}

impl MockAccount {
    fn new(email: &str, password: &str, id: &str, username: &str, full_name: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user: User {
                id: id.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                full_name: Some(full_name.to_string()),
                avatar: None,
                bio: None,
                website: None,
                is_verified: false,
                is_private: false,
                followers_count: 0,
                following_count: 0,
                posts_count: 0,
                is_following: None,
                created_at: None,
            },
        }
    }

    fn matches(&self, email: &str, password: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim()) && self.password == password
    }
}

/// Built-in fixture accounts.
pub fn default_accounts() -> Vec<MockAccount> {
    vec![
        MockAccount::new("test@example.com", "Test123!@#", "mock-user-1", "testuser", "Test User"),
        MockAccount::new("demo@example.com", "Demo123!@#", "mock-user-2", "demouser", "Demo User"),
    ]
}

/// Whether `token` was issued by [`MockAuthService`].
pub fn is_mock_token(token: &str) -> bool {
    token.starts_with(MOCK_TOKEN_PREFIX)
}

/// User id embedded in a mock token.
pub fn mock_token_user_id(token: &str) -> Option<&str> {
    let rest = token.strip_prefix(MOCK_TOKEN_PREFIX)?;
    let (user_id, millis) = rest.rsplit_once('-')?;
    if user_id.is_empty() || millis.parse::<i64>().is_err() {
        return None;
    }
    Some(user_id)
}

pub struct MockAuthService {
    inner: Arc<dyn AuthApi>,
    tokens: Arc<TokenStore>,
    latency: Duration,
    accounts: Vec<MockAccount>,
}

impl MockAuthService {
    pub fn new(inner: Arc<dyn AuthApi>, tokens: Arc<TokenStore>, latency: Duration) -> Self {
        Self::with_accounts(inner, tokens, latency, default_accounts())
    }

    pub fn with_accounts(
        inner: Arc<dyn AuthApi>,
        tokens: Arc<TokenStore>,
        latency: Duration,
        accounts: Vec<MockAccount>,
    ) -> Self {
        Self {
            inner,
            tokens,
            latency,
            accounts,
        }
    }

    async fn active_mock_token(&self) -> Result<Option<String>> {
        Ok(self.tokens.get_auth_token().await?.filter(|t| is_mock_token(t)))
    }
}

#[async_trait]
impl AuthApi for MockAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let Some(account) = self.accounts.iter().find(|a| a.matches(email, password)) else {
            return self.inner.login(email, password).await;
        };

        tokio::time::sleep(self.latency).await;
        let session = AuthResponse {
            user: account.user.clone(),
            token: format!("{}{}-{}", MOCK_TOKEN_PREFIX, account.user.id, lib_utils::now_millis()),
            refresh_token: None,
            expires_in: Some(MOCK_TOKEN_TTL_SECS),
        };
        self.tokens.store_session(&session).await?;
        tracing::warn!(user_id = %account.user.id, "Mock login: session issued without contacting the API");
        Ok(session)
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        self.inner.register(request).await
    }

    async fn logout(&self) -> Result<()> {
        if self.active_mock_token().await?.is_some() {
            tracing::debug!("Mock logout");
            return self.tokens.clear_auth().await;
        }
        self.inner.logout().await
    }

    async fn current_user(&self) -> Result<User> {
        let Some(token) = self.active_mock_token().await? else {
            return self.inner.current_user().await;
        };
        if let Some(user) = self.tokens.get_user().await? {
            return Ok(user);
        }
        mock_token_user_id(&token)
            .and_then(|id| self.accounts.iter().find(|a| a.user.id == id))
            .map(|account| account.user.clone())
            .ok_or_else(|| ApiError::Unauthorized("Unknown mock session".to_string()))
    }
}

/// Auth service for `config`: the real one, wrapped in [`MockAuthService`]
/// when mock auth is enabled.
pub fn build_auth(config: &ClientConfig, client: Arc<ApiClient>) -> Arc<dyn AuthApi> {
    let tokens = client.tokens().clone();
    let real: Arc<dyn AuthApi> = Arc::new(AuthService::new(client));
    if !config.mock_auth {
        return real;
    }
    tracing::warn!("MOCK_AUTH is enabled: fixture accounts log in without the API. Do not use in production");
    Arc::new(MockAuthService::new(real, tokens, config.mock_latency))
}
