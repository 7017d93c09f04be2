use std::collections::HashMap;
use std::time::Duration;

use super::client::{MarketDataClient, DEFAULT_FRESHNESS};
use super::dto::{CoinMarket, SearchCoin, SearchCoinData, SearchHit, SearchResponse};
use super::query::QueryParams;
use crate::error::Result;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

const SEARCH_FRESHNESS: Duration = Duration::from_secs(30);

impl MarketDataClient {
    /// Never fails: a blank query or any provider error gives an empty list.
    pub async fn search_coins(&self, query: &str, limit: usize) -> Vec<SearchCoin> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.try_search_coins(query, limit).await {
            Ok(coins) => coins,
            Err(e) => {
                tracing::warn!(query, limit, "Coin search failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_search_coins(&self, query: &str, limit: usize) -> Result<Vec<SearchCoin>> {
        let params = QueryParams::new().with("query", query);
        let search: SearchResponse = self
            .fetch_resource("/search", Some(&params), SEARCH_FRESHNESS)
            .await?;
        if search.coins.is_empty() {
            return Ok(Vec::new());
        }

        let hits: Vec<SearchHit> = search.coins.into_iter().take(limit).collect();
        let ids: Vec<&str> = hits.iter().map(|hit| hit.id.as_str()).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = QueryParams::new()
            .with("vs_currency", "usd")
            .with("ids", ids.join(","))
            .with("order", "market_cap_desc")
            .with("per_page", limit)
            .with("page", 1i64)
            .with("sparkline", false)
            .with("price_change_percentage", "24h");
        let markets: Vec<CoinMarket> = self
            .fetch_resource("/coins/markets", Some(&params), DEFAULT_FRESHNESS)
            .await?;

        Ok(merge_market_data(hits, markets))
    }
}

// One coin per hit, in hit order.
pub(crate) fn merge_market_data(hits: Vec<SearchHit>, markets: Vec<CoinMarket>) -> Vec<SearchCoin> {
    let by_id: HashMap<String, CoinMarket> = markets
        .into_iter()
        .map(|market| (market.id.clone(), market))
        .collect();

    hits.into_iter()
        .map(|hit| {
            let market = by_id.get(&hit.id);
            SearchCoin {
                data: SearchCoinData {
                    price: market.and_then(|m| m.current_price),
                    price_change_percentage_24h: market
                        .and_then(|m| m.price_change_percentage_24h)
                        .unwrap_or(0.0),
                },
                id: hit.id,
                name: hit.name.unwrap_or_default(),
                symbol: hit.symbol.unwrap_or_default(),
                market_cap_rank: hit.market_cap_rank,
                thumb: hit.thumb.unwrap_or_default(),
                large: hit.large.unwrap_or_default(),
            }
        })
        .collect()
}
