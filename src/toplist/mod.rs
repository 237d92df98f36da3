mod fetch;
mod filter;
mod loader;
mod parse;

pub use fetch::{NUM_LOADED, TOPLIST_MAX_STALE, fetch_toplist_body, fetch_toplist_from, toplist_url};
pub use filter::{remove_subscribed, subscription_key};
pub use loader::{ToplistOptions, load_toplist};
pub use parse::{SearchResult, parse_toplist};
