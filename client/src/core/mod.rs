//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and testability.
//!
//! - **[`error`]**: Client error type (`ApiError`, `Result<T>`)
//! - **[`service`]**: Injection seams (`Transport`, `KeyValueStore`, `AuthApi`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::core::service::{KeyValueStore, Transport};
//! use client::storage::MemoryStore;
//!
//! // In production: file-backed storage and the reqwest transport
//! // In tests: in-memory storage and a scripted fake transport
//! let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, Result};
pub use service::{AuthApi, KeyValueStore, Transport};
