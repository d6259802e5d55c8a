//! # Session Storage
//!
//! Pluggable persistence for the auth session.
//!
//! ```text
//! storage/
//! ├── memory.rs       - MemoryStore (tests, ephemeral sessions)
//! ├── file.rs         - FileStore (single JSON object on disk)
//! └── token_store.rs  - TokenStore (in-memory cache over a KeyValueStore)
//! ```
//!
//! The store implementation is chosen at construction; nothing in the client
//! inspects the platform at runtime.

pub mod file;
pub mod memory;
pub mod token_store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use token_store::{TokenStore, AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY};
