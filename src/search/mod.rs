//! Web search: provider abstraction and the DuckDuckGo implementation.

mod duckduckgo;

pub use duckduckgo::DuckDuckGo;

use async_trait::async_trait;

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Web-search provider abstraction.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return at most `max_results` hits.
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<SearchResult>>;
}
