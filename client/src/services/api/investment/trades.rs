//! Trades recorded against a portfolio. The API derives holdings from them.

use std::sync::Arc;

use shared::{CreateTradeRequest, PaginatedResponse, PaginationParams, Trade};

use crate::core::{ApiError, Result};
use crate::services::api::client::ApiClient;
use crate::services::api::segment;

#[derive(Clone)]
pub struct TradeService {
    client: Arc<ApiClient>,
}

impl TradeService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Trade history, optionally limited to one portfolio.
    pub async fn get_trades(
        &self,
        portfolio_id: Option<&str>,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Trade>> {
        let filter = portfolio_id
            .map(|id| vec![("portfolioId".to_string(), id.to_string())])
            .unwrap_or_default();
        self.client
            .get_page_with_query("/investment/trades", params, filter)
            .await
    }

    pub async fn get_trade(&self, trade_id: &str) -> Result<Trade> {
        self.client
            .get(&format!("/investment/trades/{}", segment(trade_id)))
            .await
    }

    pub async fn create_trade(&self, trade: &CreateTradeRequest) -> Result<Trade> {
        if !trade.quantity.is_finite() || trade.quantity <= 0.0 {
            return Err(ApiError::Validation("Quantity must be greater than 0".to_string()));
        }
        if trade.price < 0.0 || !trade.price.is_finite() {
            return Err(ApiError::Validation("Price must be a non-negative number".to_string()));
        }
        self.client.post("/investment/trades", trade).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_with, FakeTransport};
    use shared::TradeSide;

    fn trade(quantity: f64, price: f64) -> CreateTradeRequest {
        CreateTradeRequest {
            portfolio_id: "pf1".to_string(),
            symbol: "AAPL".to_string(),
            side: TradeSide::Buy,
            quantity,
            price,
            fees: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_trade_rejects_bad_numbers_locally() {
        let fake = FakeTransport::new();
        let (client, _storage) = client_with(fake.clone());
        let trades = TradeService::new(client);

        for (quantity, price) in [
            (0.0, 10.0),
            (-1.0, 10.0),
            (f64::NAN, 10.0),
            (f64::INFINITY, 10.0),
            (1.0, -0.5),
            (1.0, f64::INFINITY),
        ] {
            let result = trades.create_trade(&trade(quantity, price)).await;
            assert!(
                matches!(result, Err(ApiError::Validation(_))),
                "quantity={quantity} price={price}"
            );
        }
        assert!(fake.requests().is_empty());
    }
}
