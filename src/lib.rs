pub mod coingecko;
pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod server;
pub mod tools;

pub use coingecko::{MarketDataClient, PoolData, SearchCoin, TrendingCoin};
pub use config::CoinPulseConfig;
pub use error::{CoinPulseError, Result};
pub use server::CoinPulseServer;
