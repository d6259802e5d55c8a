//! # Pixel API Client - Library Root
//!
//! Typed async client for the Pixel social API: feeds, posts, stories, reels,
//! comments, follows, direct messages, notifications, bookmarks and the
//! investment portfolio module.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              client (this crate)                       │
//! ├────────────────────────────────────────────────────────┤
//! │  services   - ApiClient + one service per resource     │
//! │  storage    - TokenStore over a pluggable KV store     │
//! │  core       - ApiError, Transport/KeyValueStore/AuthApi│
//! │  config     - Environment configuration                │
//! │  logger     - tracing subscriber setup                 │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP/JSON (reqwest)          │ JSON file
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  REST API       │          │  auth-storage.json      │
//! │  /api/v1/*      │          │  (@auth_token, ...)     │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! Every response body is an envelope `{success, data, error, message}`;
//! services return the unwrapped `data` or an [`ApiError`]. An expired access
//! token is refreshed once per failing request and the request re-sent.
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::{ApiClient, ApiServices, ClientConfig, FileStore, TokenStore};
//!
//! # async fn run() -> client::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let tokens = Arc::new(TokenStore::new(Arc::new(FileStore::new(&config.storage_path))));
//! tokens.restore().await?;
//! let api = ApiServices::new(Arc::new(ApiClient::from_config(&config, tokens)?));
//! let unread = api.notifications.get_unread_count().await;
//! # let _ = unread;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod logger;
pub mod services;
pub mod storage;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use crate::config::ClientConfig;
pub use crate::core::{ApiError, AuthApi, KeyValueStore, Result, Transport};
pub use crate::services::api::{ApiClient, ApiServices};
pub use crate::services::mock_auth::{build_auth, MockAuthService};
pub use crate::services::pager::Pager;
pub use crate::storage::{FileStore, MemoryStore, TokenStore};
