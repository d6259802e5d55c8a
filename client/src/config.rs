//! # Client Configuration
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file by the binary) and validated before the client is built.
//!
//! | Variable | Default |
//! |---|---|
//! | `API_BASE_URL` | `http://localhost:3000/api/v1` |
//! | `API_TIMEOUT_SECS` | `30` |
//! | `MOCK_AUTH` | off |
//! | `MOCK_AUTH_LATENCY_MS` | `300` |
//! | `AUTH_STORAGE_PATH` | `data/auth-storage.json` |
//! | `CLIENT_LOG_DIR` | unset (stderr only) |
//! | `RUST_LOG` | `client=info,warn` |

use std::path::PathBuf;
use std::time::Duration;

use lib_utils::{get_env, get_env_bool, get_env_or, get_env_parse_or};

use crate::core::{ApiError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MOCK_LATENCY_MS: u64 = 300;
pub const DEFAULT_STORAGE_PATH: &str = "data/auth-storage.json";
pub const DEFAULT_LOG_LEVEL: &str = "client=info,warn";

/// Runtime configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is appended to (no trailing slash).
    pub api_base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Serve fixture accounts locally instead of calling `/auth/login`.
    /// Development only.
    pub mock_auth: bool,
    /// Simulated latency of a mock login.
    pub mock_latency: Duration,
    /// Session file used by the file-backed token storage.
    pub storage_path: PathBuf,
    /// Directory for rotated log files; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            mock_auth: false,
            mock_latency: Duration::from_millis(DEFAULT_MOCK_LATENCY_MS),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            log_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_base_url = get_env_or("API_BASE_URL", DEFAULT_API_BASE_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();
        let timeout = Duration::from_secs(get_env_parse_or("API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        let mock_auth = get_env_bool("MOCK_AUTH", false)?;
        let mock_latency =
            Duration::from_millis(get_env_parse_or("MOCK_AUTH_LATENCY_MS", DEFAULT_MOCK_LATENCY_MS)?);
        let storage_path = PathBuf::from(get_env_or("AUTH_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let log_dir = get_env("CLIENT_LOG_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let log_level = get_env_or("RUST_LOG", DEFAULT_LOG_LEVEL);

        let config = Self {
            api_base_url,
            timeout,
            mock_auth,
            mock_latency,
            storage_path,
            log_dir,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a working client.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(ApiError::Config("API_BASE_URL must not be empty".to_string()));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "API_BASE_URL must start with http:// or https://, got {}",
                self.api_base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::Config("API_TIMEOUT_SECS must be greater than 0".to_string()));
        }
        Ok(())
    }
}
