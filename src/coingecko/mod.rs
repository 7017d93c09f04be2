pub mod cache;
pub mod client;
pub mod dto;
mod pools;
pub mod query;
mod search;
mod trending;

pub use cache::ResponseCache;
pub use client::{MarketDataClient, API_KEY_HEADER, DEFAULT_FRESHNESS};
pub use dto::{PoolData, SearchCoin, SearchCoinData, TrendingCoin};
pub use query::{QueryParams, QueryValue};
pub use search::DEFAULT_SEARCH_LIMIT;
