use std::sync::Arc;

use shared::{
    CreatePortfolioRequest, Holding, PaginatedResponse, PaginationParams, Portfolio, UpdatePortfolioRequest,
};

use crate::core::{ApiError, Result};
use crate::services::api::client::ApiClient;
use crate::services::api::segment;

#[derive(Clone)]
pub struct PortfolioService {
    client: Arc<ApiClient>,
}

impl PortfolioService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_portfolios(&self, params: Option<&PaginationParams>) -> Result<PaginatedResponse<Portfolio>> {
        self.client.get_page("/investment/portfolios", params).await
    }

    pub async fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.client
            .get(&format!("/investment/portfolios/{}", segment(portfolio_id)))
            .await
    }

    pub async fn create_portfolio(&self, portfolio: &CreatePortfolioRequest) -> Result<Portfolio> {
        if portfolio.name.trim().is_empty() {
            return Err(ApiError::Validation("Portfolio name is required".to_string()));
        }
        self.client.post("/investment/portfolios", portfolio).await
    }

    pub async fn update_portfolio(
        &self,
        portfolio_id: &str,
        update: &UpdatePortfolioRequest,
    ) -> Result<Portfolio> {
        self.client
            .put(&format!("/investment/portfolios/{}", segment(portfolio_id)), update)
            .await
    }

    pub async fn delete_portfolio(&self, portfolio_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/investment/portfolios/{}", segment(portfolio_id)))
            .await
    }

    pub async fn get_holdings(
        &self,
        portfolio_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Holding>> {
        self.client
            .get_page(&format!("/investment/portfolios/{}/holdings", segment(portfolio_id)), params)
            .await
    }
}
