use serde::{Deserialize, Serialize};

use crate::coingecko::SearchCoin;

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchCoinsInput {
    pub query: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchCoinsOutput {
    pub coins: Vec<SearchCoin>,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}
