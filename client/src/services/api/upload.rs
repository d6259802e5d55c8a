//! # Upload Endpoints
//!
//! Media is uploaded first; the returned URLs go into post, story, reel or
//! profile requests.

use std::path::Path;
use std::sync::Arc;

use super::client::ApiClient;
use super::transport::FileUpload;
use crate::core::{ApiError, Result};

pub const IMAGE_FIELD: &str = "image";
pub const IMAGES_FIELD: &str = "images";
/// Field name used by the mobile camera flow.
pub const PHOTO_FIELD: &str = "photo";
/// Field name used for generic attachments.
pub const FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct UploadService {
    client: Arc<ApiClient>,
}

impl UploadService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn upload_image(&self, file: FileUpload) -> Result<String> {
        self.upload_image_as(IMAGE_FIELD, file).await
    }

    /// Single-image upload under a caller-chosen multipart field.
    pub async fn upload_image_as(&self, field: &str, file: FileUpload) -> Result<String> {
        self.client.upload_file("/upload/image", field, file).await
    }

    /// Upload several images; URLs come back in submission order.
    pub async fn upload_images(&self, files: Vec<FileUpload>) -> Result<Vec<String>> {
        self.client.upload_files("/upload/images", IMAGES_FIELD, files).await
    }

    /// Read an image from disk and upload it.
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Validation(format!("Cannot read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let file = FileUpload::new(file_name, content_type_for(path), bytes);
        self.upload_image(file).await
    }
}

/// Image MIME type from the file extension, `application/octet-stream` otherwise.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        _ => "application/octet-stream",
    }
}
