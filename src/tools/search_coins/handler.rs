use super::dto::{SearchCoinsInput, SearchCoinsOutput};
use crate::coingecko::{MarketDataClient, DEFAULT_SEARCH_LIMIT};
use crate::error::{CoinPulseError, Result};

// Markets endpoint page cap
pub const MAX_SEARCH_LIMIT: u32 = 250;

pub async fn search_coins(
    client: &MarketDataClient,
    input: SearchCoinsInput,
) -> Result<SearchCoinsOutput> {
    let limit = match input.limit {
        None => DEFAULT_SEARCH_LIMIT,
        Some(limit) if (1..=MAX_SEARCH_LIMIT).contains(&limit) => limit as usize,
        Some(_) => {
            return Err(CoinPulseError::api_error(format!(
                "limit must be 1..={}",
                MAX_SEARCH_LIMIT
            )))
        }
    };

    let coins = client.search_coins(&input.query, limit).await;
    Ok(SearchCoinsOutput {
        coins,
        fetched_at: chrono::Utc::now(),
    })
}
