use std::sync::Arc;

use shared::{CreateInvestmentPostRequest, InvestmentPost, PaginatedResponse, PaginationParams};

use crate::core::Result;
use crate::services::api::client::ApiClient;
use crate::services::api::segment;

#[derive(Clone)]
pub struct InvestmentPostService {
    client: Arc<ApiClient>,
}

impl InvestmentPostService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Investment feed, optionally filtered to one ticker.
    pub async fn get_posts(
        &self,
        symbol: Option<&str>,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<InvestmentPost>> {
        let filter = symbol
            .map(|s| vec![("symbol".to_string(), s.trim().to_ascii_uppercase())])
            .unwrap_or_default();
        self.client
            .get_page_with_query("/investment/posts", params, filter)
            .await
    }

    pub async fn get_post(&self, post_id: &str) -> Result<InvestmentPost> {
        self.client
            .get(&format!("/investment/posts/{}", segment(post_id)))
            .await
    }

    pub async fn create_post(&self, post: &CreateInvestmentPostRequest) -> Result<InvestmentPost> {
        self.client.post("/investment/posts", post).await
    }

    pub async fn like_post(&self, post_id: &str) -> Result<()> {
        self.client
            .post_unit(&format!("/investment/posts/{}/like", segment(post_id)))
            .await
    }

    pub async fn unlike_post(&self, post_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/investment/posts/{}/like", segment(post_id)))
            .await
    }
}
