//! # Story Endpoints

use std::sync::Arc;

use shared::{CreateStoryRequest, PaginatedResponse, PaginationParams, Story, StoryGroup, User};

use super::client::ApiClient;
use super::segment;
use crate::core::Result;

#[derive(Clone)]
pub struct StoryService {
    client: Arc<ApiClient>,
}

impl StoryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Story tray: active stories grouped by author.
    pub async fn get_feed(&self, params: Option<&PaginationParams>) -> Result<PaginatedResponse<StoryGroup>> {
        self.client.get_page("/stories/feed", params).await
    }

    pub async fn get_user_stories(
        &self,
        user_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Story>> {
        self.client
            .get_page(&format!("/stories/user/{}", segment(user_id)), params)
            .await
    }

    pub async fn create_story(&self, story: &CreateStoryRequest) -> Result<Story> {
        self.client.post("/stories", story).await
    }

    pub async fn delete_story(&self, story_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/stories/{}", segment(story_id)))
            .await
    }

    pub async fn mark_viewed(&self, story_id: &str) -> Result<()> {
        self.client
            .post_unit(&format!("/stories/{}/view", segment(story_id)))
            .await
    }

    pub async fn get_viewers(
        &self,
        story_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<User>> {
        self.client
            .get_page(&format!("/stories/{}/viewers", segment(story_id)), params)
            .await
    }
}
