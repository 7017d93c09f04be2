pub mod dto;
pub mod handler;

pub use dto::{LookupPoolInput, LookupPoolOutput};
pub use handler::lookup_pool;
