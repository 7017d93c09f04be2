use super::dto::{GetTrendingCoinsInput, GetTrendingCoinsOutput};
use crate::coingecko::MarketDataClient;
use crate::error::Result;

pub async fn get_trending_coins(
    client: &MarketDataClient,
    _input: GetTrendingCoinsInput,
) -> Result<GetTrendingCoinsOutput> {
    let coins = client.get_trending_coins().await;
    Ok(GetTrendingCoinsOutput {
        coins,
        fetched_at: chrono::Utc::now(),
    })
}
