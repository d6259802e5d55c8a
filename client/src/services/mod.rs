//! # Services Module
//!
//! ```text
//! services/
//! ├── api/          - ApiClient and one service per resource
//! ├── mock_auth.rs  - Fixture-account login decorator (development only)
//! └── pager.rs      - Page-by-page driver for list endpoints
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  caller (CLI, UI)                                        │
//! │     │                                                    │
//! │     ▼                                                    │
//! │  PostService, UserService, ...   MockAuthService ─┐      │
//! │     │                                 │           ▼      │
//! │     └──────────────► ApiClient ◄──── AuthService         │
//! │                        │    │                            │
//! │              TokenStore    Transport (reqwest)           │
//! └────────────────────────┼────────┼────────────────────────┘
//!                          ▼        ▼ HTTP/JSON
//!                 KeyValueStore   REST API  /api/v1/*
//! ```

pub mod api;
pub mod mock_auth;
pub mod pager;

pub use api::{ApiClient, ApiServices};
pub use mock_auth::{build_auth, MockAuthService};
pub use pager::Pager;
