//! # Comment Endpoints

use std::sync::Arc;

use shared::{
    Comment, CreateCommentRequest, PaginatedResponse, PaginationParams, UpdateCommentRequest,
};

use super::client::ApiClient;
use super::segment;
use crate::core::{ApiError, Result};

#[derive(Clone)]
pub struct CommentService {
    client: Arc<ApiClient>,
}

impl CommentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_comments(
        &self,
        post_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Comment>> {
        self.client
            .get_page(&format!("/posts/{}/comments", segment(post_id)), params)
            .await
    }

    /// Comment on a post, or reply when `parent_id` is set.
    pub async fn create_comment(
        &self,
        post_id: &str,
        text: &str,
        parent_id: Option<&str>,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::Validation("Comment cannot be empty".to_string()));
        }
        let body = CreateCommentRequest {
            text: text.to_string(),
            parent_id: parent_id.map(str::to_string),
        };
        self.client
            .post(&format!("/posts/{}/comments", segment(post_id)), &body)
            .await
    }

    pub async fn update_comment(&self, comment_id: &str, text: &str) -> Result<Comment> {
        let body = UpdateCommentRequest {
            text: text.trim().to_string(),
        };
        self.client
            .put(&format!("/comments/{}", segment(comment_id)), &body)
            .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/comments/{}", segment(comment_id)))
            .await
    }

    pub async fn like_comment(&self, comment_id: &str) -> Result<()> {
        self.client
            .post_unit(&format!("/comments/{}/like", segment(comment_id)))
            .await
    }

    pub async fn unlike_comment(&self, comment_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/comments/{}/like", segment(comment_id)))
            .await
    }

    pub async fn get_replies(
        &self,
        comment_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Comment>> {
        self.client
            .get_page(&format!("/comments/{}/replies", segment(comment_id)), params)
            .await
    }
}
