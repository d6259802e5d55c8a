//! # Bookmark Endpoints

use std::sync::Arc;

use shared::{Bookmark, BookmarkStatus, CreateBookmarkRequest, PaginatedResponse, PaginationParams};

use super::client::ApiClient;
use super::segment;
use crate::core::Result;

#[derive(Clone)]
pub struct BookmarkService {
    client: Arc<ApiClient>,
}

impl BookmarkService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_bookmarks(&self, params: Option<&PaginationParams>) -> Result<PaginatedResponse<Bookmark>> {
        self.client.get_page("/bookmarks", params).await
    }

    /// Save a post, optionally into a named collection.
    pub async fn add_bookmark(&self, post_id: &str, collection: Option<&str>) -> Result<Bookmark> {
        let body = CreateBookmarkRequest {
            post_id: post_id.to_string(),
            collection: collection.map(str::to_string),
        };
        self.client.post("/bookmarks", &body).await
    }

    pub async fn remove_bookmark(&self, post_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/bookmarks/{}", segment(post_id)))
            .await
    }

    /// Whether a post is saved. Any failure reads as not bookmarked.
    pub async fn is_bookmarked(&self, post_id: &str) -> bool {
        let path = format!("/bookmarks/check/{}", segment(post_id));
        match self.client.get::<BookmarkStatus>(&path).await {
            Ok(status) => status.is_bookmarked,
            Err(e) => {
                tracing::debug!(error = %e, post_id, "Bookmark check failed, assuming not bookmarked");
                false
            }
        }
    }
}
