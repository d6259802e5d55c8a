//! # Response Envelope
//!
//! Every API response body is wrapped in the same envelope:
//!
//! ```text
//! { "success": true,  "data": { ... } }
//! { "success": false, "error": "Post not found" }
//! { "success": false, "message": "Validation failed" }
//! ```
//!
//! Exactly one of (data, error) is meaningful. A `success: false` body, or a
//! `success: true` body without `data`, is a failure whose message is taken from
//! `error`, then `message`, then [`UNKNOWN_ERROR`].

use serde::{Deserialize, Deserializer, Serialize};

/// Message used when a failed envelope carries neither `error` nor `message`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Uniform `{success, data, error, message}` wire wrapper.
///
/// `data` distinguishes "absent" from "null": an explicit `"data": null` is
/// handed to `T`'s deserializer, an absent key leaves `data` as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Failed envelope carrying an `error` message.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Message describing why this envelope is a failure.
    ///
    /// Empty strings are skipped, so `{"error": "", "message": "x"}` yields `"x"`.
    pub fn failure_message(&self) -> String {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|m| !m.is_empty())
            .unwrap_or(UNKNOWN_ERROR)
            .to_string()
    }

    /// Unwrap the payload, or return the failure message.
    pub fn into_data(self) -> Result<T, String> {
        if self.success {
            if let Some(data) = self.data {
                return Ok(data);
            }
        }
        Err(self.failure_message())
    }
}
