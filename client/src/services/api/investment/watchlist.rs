use std::sync::Arc;

use shared::{AddWatchlistRequest, PaginatedResponse, PaginationParams, WatchlistItem};

use crate::core::{ApiError, Result};
use crate::services::api::client::ApiClient;
use crate::services::api::segment;

#[derive(Clone)]
pub struct WatchlistService {
    client: Arc<ApiClient>,
}

impl WatchlistService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_watchlist(
        &self,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<WatchlistItem>> {
        self.client.get_page("/investment/watchlist", params).await
    }

    /// Watch a ticker. Symbols are sent upper-cased.
    pub async fn add_symbol(&self, symbol: &str) -> Result<WatchlistItem> {
        let symbol = normalize_symbol(symbol)?;
        self.client
            .post("/investment/watchlist", &AddWatchlistRequest { symbol })
            .await
    }

    pub async fn remove_symbol(&self, symbol: &str) -> Result<()> {
        let symbol = normalize_symbol(symbol)?;
        self.client
            .delete_unit(&format!("/investment/watchlist/{}", segment(&symbol)))
            .await
    }
}

fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(ApiError::Validation("Symbol is required".to_string()));
    }
    Ok(symbol)
}
