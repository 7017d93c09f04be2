use std::time::Duration;

use super::client::MarketDataClient;
use super::dto::{TrendingCoin, TrendingResponse};

const TRENDING_FRESHNESS: Duration = Duration::from_secs(300);

impl MarketDataClient {
    /// Never fails.
    pub async fn get_trending_coins(&self) -> Vec<TrendingCoin> {
        match self
            .fetch_resource::<TrendingResponse>("/search/trending", None, TRENDING_FRESHNESS)
            .await
        {
            Ok(response) => response.coins.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to fetch trending coins: {}", e);
                Vec::new()
            }
        }
    }
}
