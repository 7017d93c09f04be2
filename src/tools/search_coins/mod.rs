pub mod dto;
pub mod handler;

pub use dto::{SearchCoinsInput, SearchCoinsOutput};
pub use handler::{search_coins, MAX_SEARCH_LIMIT};
