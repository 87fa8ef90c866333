//! News feed loading.
//!
//! - **Types**: the JSON document and its `daily_news` entries
//! - **Fetching**: one cache-busted GET per load, decoded with `serde_json`
//! - **Dedup**: first occurrence wins, original order kept
//!
//! # Example
//!
//! ```ignore
//! use isonews::feed::load_articles;
//!
//! let articles = load_articles(&client, "https://example.com/news.json", None).await?;
//! ```

mod dedup;
mod fetcher;
mod types;

pub use dedup::dedup_by_id;
pub use fetcher::{
    cache_busting_url, fetch_document, load_articles, FetchError, CACHE_BUST_PARAM,
    LOAD_FAILED_MESSAGE,
};
pub use types::{FeedDocument, NewsArticle};
