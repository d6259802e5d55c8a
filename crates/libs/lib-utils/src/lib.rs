//! # Utilities Library
//!
//! Small helpers shared by the client crates: environment variables, time and
//! credential validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{expires_at, now_utc, now_millis, parse_utc};
pub use validation::{validate_email, validate_min_length, validate_not_empty};
