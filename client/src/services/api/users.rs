//! # User Endpoints
//!
//! Profiles, search and the follow graph.

use std::sync::Arc;

use shared::{FollowStatus, PaginatedResponse, PaginationParams, UpdateProfileRequest, User};

use super::client::ApiClient;
use super::segment;
use crate::core::Result;

#[derive(Clone)]
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.client.get(&format!("/users/{}", segment(user_id))).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.client
            .get(&format!("/users/username/{}", segment(username)))
            .await
    }

    /// Edit the logged-in user's profile. The cached user is not touched;
    /// refresh it with `AuthApi::current_user`.
    pub async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<User> {
        self.client.put("/users/profile", update).await
    }

    pub async fn search_users(
        &self,
        query: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<User>> {
        self.client
            .get_page_with_query("/users/search", params, vec![("q".to_string(), query.to_string())])
            .await
    }

    pub async fn get_suggestions(&self, params: Option<&PaginationParams>) -> Result<PaginatedResponse<User>> {
        self.client.get_page("/users/suggestions", params).await
    }

    pub async fn follow_user(&self, user_id: &str) -> Result<FollowStatus> {
        self.client
            .post(&format!("/users/{}/follow", segment(user_id)), &serde_json::json!({}))
            .await
    }

    pub async fn unfollow_user(&self, user_id: &str) -> Result<FollowStatus> {
        self.client
            .delete(&format!("/users/{}/follow", segment(user_id)))
            .await
    }

    pub async fn get_followers(
        &self,
        user_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<User>> {
        self.client
            .get_page(&format!("/users/{}/followers", segment(user_id)), params)
            .await
    }

    pub async fn get_following(
        &self,
        user_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<User>> {
        self.client
            .get_page(&format!("/users/{}/following", segment(user_id)), params)
            .await
    }
}
