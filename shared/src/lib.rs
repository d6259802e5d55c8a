//! # Shared Data Transfer Objects Library
//!
//! This library defines the wire contract between the client and the Pixel REST API.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: The `{success, data, error, message}` response wrapper
//!   - **[`dto::pagination`]**: Paginated collections and page/cursor parameters
//!   - **[`dto::auth`]**: Login, registration and token refresh
//!   - **[`dto::user`]**: Profiles and profile updates
//!   - **[`dto::content`]**: Posts, comments, stories and reels
//!   - **[`dto::messaging`]**: Conversations and direct messages
//!   - **[`dto::notification`]**: Activity notifications
//!   - **[`dto::bookmark`]**: Saved posts
//!   - **[`dto::investment`]**: Portfolios, holdings, trades, watchlist and investment posts
//!   - **[`dto::upload`]**: Upload results
//!
//! ## Wire Format
//!
//! The API speaks camelCase JSON:
//! - Structs use `#[serde(rename_all = "camelCase")]`
//! - Optional fields are omitted from JSON when `None`
//! - Server counters default to zero when absent
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::envelope::ApiEnvelope;
//! use shared::dto::user::User;
//!
//! let body = br#"{"success":true,"data":{"id":"u1","username":"alice","email":"a@x.io"}}"#;
//! let envelope: ApiEnvelope<User> = serde_json::from_slice(body).unwrap();
//! let user = envelope.into_data().unwrap();
//! assert_eq!(user.username, "alice");
//! ```

pub mod dto;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
