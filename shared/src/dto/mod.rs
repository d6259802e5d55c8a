//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with the REST API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - Response wrapper shared by every endpoint
//! - [`pagination`] - `PaginatedResponse<T>` and `PaginationParams`
//! - [`auth`] - Login, registration and refresh DTOs
//! - [`user`] - User profiles
//! - [`content`] - Posts, comments, stories, reels
//! - [`messaging`] - Conversations and messages
//! - [`notification`] - Notifications
//! - [`bookmark`] - Bookmarks
//! - [`investment`] - Portfolio module
//! - [`upload`] - Upload responses
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/v1/auth/login
//! Content-Type: application/json
//!
//! { "email": "alice@example.com", "password": "MyPassword123!" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "success": true,
//!   "data": {
//!     "user": { "id": "1", "username": "alice", "email": "alice@example.com" },
//!     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!     "refreshToken": "c2VjcmV0...",
//!     "expiresIn": 3600
//!   }
//! }
//! ```

pub mod auth;
pub mod bookmark;
pub mod content;
pub mod envelope;
pub mod investment;
pub mod messaging;
pub mod notification;
pub mod pagination;
pub mod upload;
pub mod user;

pub use auth::*;
pub use bookmark::*;
pub use content::*;
pub use envelope::*;
pub use investment::*;
pub use messaging::*;
pub use notification::*;
pub use pagination::*;
pub use upload::*;
pub use user::*;
