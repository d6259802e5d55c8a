//! # Upload Data Transfer Objects
//!
//! Multipart uploads answer with the server-hosted URL(s) of the stored files.

use serde::{Deserialize, Serialize};

/// Payload of `POST /upload/image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

/// Payload of `POST /upload/images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFiles {
    pub urls: Vec<String>,
}
