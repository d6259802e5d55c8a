//! # Reel Endpoints

use std::sync::Arc;

use shared::{CreateReelRequest, PaginatedResponse, PaginationParams, Reel};

use super::client::ApiClient;
use super::segment;
use crate::core::Result;

#[derive(Clone)]
pub struct ReelService {
    client: Arc<ApiClient>,
}

impl ReelService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_feed(&self, params: Option<&PaginationParams>) -> Result<PaginatedResponse<Reel>> {
        self.client.get_page("/reels/feed", params).await
    }

    pub async fn get_reel(&self, reel_id: &str) -> Result<Reel> {
        self.client.get(&format!("/reels/{}", segment(reel_id))).await
    }

    pub async fn get_user_reels(
        &self,
        user_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Reel>> {
        self.client
            .get_page(&format!("/users/{}/reels", segment(user_id)), params)
            .await
    }

    pub async fn create_reel(&self, reel: &CreateReelRequest) -> Result<Reel> {
        self.client.post("/reels", reel).await
    }

    pub async fn delete_reel(&self, reel_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/reels/{}", segment(reel_id)))
            .await
    }

    pub async fn like_reel(&self, reel_id: &str) -> Result<()> {
        self.client
            .post_unit(&format!("/reels/{}/like", segment(reel_id)))
            .await
    }

    pub async fn unlike_reel(&self, reel_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/reels/{}/like", segment(reel_id)))
            .await
    }

    /// Count one play.
    pub async fn record_view(&self, reel_id: &str) -> Result<()> {
        self.client
            .post_unit(&format!("/reels/{}/view", segment(reel_id)))
            .await
    }
}
