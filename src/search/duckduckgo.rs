//! DuckDuckGo HTML search (no API key needed).

use async_trait::async_trait;

use super::{SearchProvider, SearchResult};

const DDG_BASE_URL: &str = "https://html.duckduckgo.com";

/// Search provider backed by DuckDuckGo's HTML endpoint.
pub struct DuckDuckGo {
    base_url: String,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        Self {
            base_url: DDG_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a custom host (used by tests).
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<SearchResult>> {
        let encoded_query = urlencoding::encode(query);
        let url = format!("{}/html/?q={}", self.base_url, encoded_query);

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; SafeSpace/1.0)")
            .build()?;

        let response = client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("search HTTP error: {}", status));
        }

        let html = response.text().await?;
        Ok(extract_ddg_results(&html, max_results))
    }
}

/// Extract search results from DuckDuckGo HTML.
fn extract_ddg_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    for chunk in html.split("class=\"result__body\"").skip(1) {
        if results.len() >= max_results {
            break;
        }

        // Extract title
        let title = chunk
            .split("class=\"result__a\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("");

        // Extract snippet
        let snippet = chunk
            .split("class=\"result__snippet\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("");

        // Extract URL
        let link = chunk
            .split("class=\"result__url\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .map(|s| s.trim())
            .unwrap_or("");

        if !title.is_empty() {
            results.push(SearchResult {
                title: html_decode(title),
                snippet: html_decode(snippet),
                link: link.to_string(),
            });
        }
    }

    results
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
