pub mod date_links;
pub mod trending;

pub use date_links::{MAX_LINKS, date_links, today_token};
pub use trending::{TrendingItem, first_heading, static_item};
