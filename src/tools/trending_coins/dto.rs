use serde::{Deserialize, Serialize};

use crate::coingecko::TrendingCoin;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GetTrendingCoinsInput {}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTrendingCoinsOutput {
    pub coins: Vec<TrendingCoin>,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}
