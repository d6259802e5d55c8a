//! # Token Store
//!
//! Holds the bearer token, the refresh token and the last-known user profile.
//! Values are cached in memory and mirrored to a [`KeyValueStore`] under fixed
//! keys so a restarted process can restore the session without a network call.
//!
//! Reads prefer the in-memory value and fall back to storage. Writes are
//! last-write-wins; a single logical session per client is assumed.
//!
//! Every `clear_auth` starts a new session generation. A lazy load from storage
//! never overlaps a clear, and a refresh sent under an older generation is
//! discarded instead of reviving the session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared::{AuthResponse, RefreshResponse, User};

use crate::core::{ApiError, KeyValueStore, Result};

pub const AUTH_TOKEN_KEY: &str = "@auth_token";
pub const REFRESH_TOKEN_KEY: &str = "@refresh_token";
pub const USER_DATA_KEY: &str = "@user_data";

/// Session credentials shared by every request issued through one client.
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
    access: RwLock<Option<String>>,
    refresh: RwLock<Option<String>>,
    user: RwLock<Option<User>>,
    expires_at: RwLock<Option<DateTime<Utc>>>,
    generation: AtomicU64,
    /// Held shared by lazy loads and refresh writes, exclusively by `clear_auth`.
    clear_gate: tokio::sync::RwLock<()>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            access: RwLock::new(None),
            refresh: RwLock::new(None),
            user: RwLock::new(None),
            expires_at: RwLock::new(None),
            generation: AtomicU64::new(0),
            clear_gate: tokio::sync::RwLock::new(()),
        }
    }

    /// Session generation; bumped by every `clear_auth`.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Load every persisted key into memory. Returns whether an access token was found.
    ///
    /// Call once at start-up so the first request already carries the token.
    pub async fn restore(&self) -> Result<bool> {
        let access = self.storage.get(AUTH_TOKEN_KEY).await?;
        let refresh = self.storage.get(REFRESH_TOKEN_KEY).await?;
        let user = match self.storage.get(USER_DATA_KEY).await? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable cached user profile");
                    None
                }
            },
            None => None,
        };

        let restored = access.is_some();
        *self.access.write() = access;
        *self.refresh.write() = refresh;
        *self.user.write() = user;
        tracing::debug!(restored, "Session restored from storage");
        Ok(restored)
    }

    pub async fn set_auth_token(&self, token: &str) -> Result<()> {
        *self.access.write() = Some(token.to_string());
        self.storage.set(AUTH_TOKEN_KEY, token).await
    }

    /// Current access token: memory first, then storage.
    pub async fn get_auth_token(&self) -> Result<Option<String>> {
        let cached = self.access.read().clone();
        if cached.is_some() {
            return Ok(cached);
        }
        let _gate = self.clear_gate.read().await;
        let stored = self.storage.get(AUTH_TOKEN_KEY).await?;
        if let Some(token) = &stored {
            self.access.write().get_or_insert_with(|| token.clone());
        }
        Ok(stored)
    }

    pub async fn set_refresh_token(&self, token: &str) -> Result<()> {
        *self.refresh.write() = Some(token.to_string());
        self.storage.set(REFRESH_TOKEN_KEY, token).await
    }

    pub async fn get_refresh_token(&self) -> Result<Option<String>> {
        let cached = self.refresh.read().clone();
        if cached.is_some() {
            return Ok(cached);
        }
        let _gate = self.clear_gate.read().await;
        let stored = self.storage.get(REFRESH_TOKEN_KEY).await?;
        if let Some(token) = &stored {
            self.refresh.write().get_or_insert_with(|| token.clone());
        }
        Ok(stored)
    }

    pub async fn set_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| ApiError::Storage(format!("Failed to encode user profile: {}", e)))?;
        *self.user.write() = Some(user.clone());
        self.storage.set(USER_DATA_KEY, &raw).await
    }

    /// Last-known profile of the logged-in user.
    pub async fn get_user(&self) -> Result<Option<User>> {
        let cached = self.user.read().clone();
        if cached.is_some() {
            return Ok(cached);
        }
        let _gate = self.clear_gate.read().await;
        let Some(raw) = self.storage.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };
        let user: User = serde_json::from_str(&raw)
            .map_err(|e| ApiError::Storage(format!("Corrupt cached user profile: {}", e)))?;
        *self.user.write() = Some(user.clone());
        Ok(Some(user))
    }

    /// Persist everything a login or registration returned.
    pub async fn store_session(&self, session: &AuthResponse) -> Result<()> {
        self.set_auth_token(&session.token).await?;
        if let Some(refresh) = &session.refresh_token {
            self.set_refresh_token(refresh).await?;
        }
        self.set_user(&session.user).await?;
        self.note_expiry(session.expires_in);
        Ok(())
    }

    /// Persist a refreshed token pair. A missing refresh token keeps the current one.
    ///
    /// `generation` is the value read before the refresh was sent. Returns
    /// `false` without writing anything if the session was cleared since.
    pub async fn apply_refresh(&self, refreshed: &RefreshResponse, generation: u64) -> Result<bool> {
        let _gate = self.clear_gate.read().await;
        if self.generation() != generation {
            return Ok(false);
        }
        self.set_auth_token(&refreshed.token).await?;
        if let Some(refresh) = &refreshed.refresh_token {
            self.set_refresh_token(refresh).await?;
        }
        self.note_expiry(refreshed.expires_in);
        Ok(true)
    }

    /// Drop both tokens and the cached user from memory and storage.
    ///
    /// Memory is cleared first, so requests issued afterwards are unauthenticated
    /// even if a storage removal fails.
    pub async fn clear_auth(&self) -> Result<()> {
        let _gate = self.clear_gate.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.access.write() = None;
        *self.refresh.write() = None;
        *self.user.write() = None;
        *self.expires_at.write() = None;

        self.storage.remove(AUTH_TOKEN_KEY).await?;
        self.storage.remove(REFRESH_TOKEN_KEY).await?;
        self.storage.remove(USER_DATA_KEY).await?;
        tracing::debug!("Auth state cleared");
        Ok(())
    }

    /// Whether an access token is held in memory.
    pub fn is_authenticated(&self) -> bool {
        self.access.read().is_some()
    }

    /// Expiry reported with the current access token, if the server sent one.
    pub fn access_token_expires_at(&self) -> Option<DateTime<Utc>> {
        *self.expires_at.read()
    }

    fn note_expiry(&self, expires_in: Option<u64>) {
        *self.expires_at.write() = expires_in.map(|secs| lib_utils::expires_at(lib_utils::now_utc(), secs));
    }
}
