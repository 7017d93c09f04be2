pub mod dto;
pub mod handler;

pub use dto::{GetTrendingCoinsInput, GetTrendingCoinsOutput};
pub use handler::get_trending_coins;
