pub mod lookup_pool;
pub mod search_coins;
pub mod trending_coins;

pub use lookup_pool::{lookup_pool, LookupPoolInput, LookupPoolOutput};
pub use search_coins::{search_coins, SearchCoinsInput, SearchCoinsOutput, MAX_SEARCH_LIMIT};
pub use trending_coins::{get_trending_coins, GetTrendingCoinsInput, GetTrendingCoinsOutput};
