//! # Post Endpoints
//!
//! Home feed, explore grid, post CRUD and likes.
//!
//! Like/unlike only report success; callers adjust their optimistic
//! counters and reconcile on the next fetch.

use std::sync::Arc;

use shared::{CreatePostRequest, PaginatedResponse, PaginationParams, Post, UpdatePostRequest, User};

use super::client::ApiClient;
use super::segment;
use crate::core::Result;

#[derive(Clone)]
pub struct PostService {
    client: Arc<ApiClient>,
}

impl PostService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Posts from followed accounts, newest first.
    pub async fn get_feed(&self, params: Option<&PaginationParams>) -> Result<PaginatedResponse<Post>> {
        self.client.get_page("/posts/feed", params).await
    }

    pub async fn get_explore(&self, params: Option<&PaginationParams>) -> Result<PaginatedResponse<Post>> {
        self.client.get_page("/posts/explore", params).await
    }

    pub async fn get_post(&self, post_id: &str) -> Result<Post> {
        self.client.get(&format!("/posts/{}", segment(post_id))).await
    }

    pub async fn get_user_posts(
        &self,
        user_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Post>> {
        self.client
            .get_page(&format!("/users/{}/posts", segment(user_id)), params)
            .await
    }

    pub async fn create_post(&self, post: &CreatePostRequest) -> Result<Post> {
        self.client.post("/posts", post).await
    }

    pub async fn update_post(&self, post_id: &str, update: &UpdatePostRequest) -> Result<Post> {
        self.client
            .put(&format!("/posts/{}", segment(post_id)), update)
            .await
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/posts/{}", segment(post_id)))
            .await
    }

    pub async fn like_post(&self, post_id: &str) -> Result<()> {
        self.client
            .post_unit(&format!("/posts/{}/like", segment(post_id)))
            .await
    }

    pub async fn unlike_post(&self, post_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/posts/{}/like", segment(post_id)))
            .await
    }

    /// Users who liked a post.
    pub async fn get_likes(
        &self,
        post_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<User>> {
        self.client
            .get_page(&format!("/posts/{}/likes", segment(post_id)), params)
            .await
    }
}
