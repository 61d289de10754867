//! Tavily search API client.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::agent::ProductResolver;
use crate::config::TavilyConfig;

/// How many search results to request per lookup.
const MAX_RESULTS: u8 = 5;

/// Errors that can occur when resolving product URLs.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or body.
        message: String,
    },
}

/// One web search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
    /// Content snippet.
    pub content: String,
    /// Relevance score.
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: String,
    max_results: u8,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Tavily search client.
#[derive(Clone)]
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl TavilyClient {
    /// Create a new Tavily client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(config: &TavilyConfig) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn search(&self, query: String) -> Result<SearchResponse, ResolveError> {
        let request = SearchRequest {
            api_key: self.api_key.expose_secret(),
            query,
            max_results: MAX_RESULTS,
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResolveError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ProductResolver for TavilyClient {
    /// Find the best-guess purchase page for a product name.
    ///
    /// Prefers the first result that is an actual product page; falls back
    /// to the first result of any kind; `None` when the search is empty.
    #[instrument(skip(self), fields(product = %product_name))]
    async fn lookup(&self, product_name: &str) -> Result<Option<SearchHit>, ResolveError> {
        let data = self.search(format!("buy {product_name}")).await?;

        let best = data
            .results
            .iter()
            .find(|hit| is_product_page(&hit.url))
            .or_else(|| data.results.first())
            .cloned();

        Ok(best)
    }
}

static AMAZON_DP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"amazon\.com.*/dp/").expect("pattern must compile"));
static AMAZON_GP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"amazon\.com.*/gp/product/").expect("pattern must compile"));
static WALMART_IP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"walmart\.com/ip/").expect("pattern must compile"));
static BESTBUY_PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bestbuy\.com/(site/|product/).*\d").expect("pattern must compile")
});
static TARGET_P: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"target\.com/p/").expect("pattern must compile"));
static EBAY_ITM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ebay\.com/itm/").expect("pattern must compile"));
static BIG_RETAILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"amazon|walmart|bestbuy|target|ebay").expect("pattern must compile"));

/// Whether a URL points at an actual product page rather than a category,
/// search, or listing page. Non-big-retailer URLs (direct brand stores)
/// are accepted as-is.
fn is_product_page(url: &str) -> bool {
    if AMAZON_DP.is_match(url) || AMAZON_GP.is_match(url) {
        return true;
    }
    if WALMART_IP.is_match(url) || BESTBUY_PRODUCT.is_match(url) {
        return true;
    }
    if TARGET_P.is_match(url) || EBAY_ITM.is_match(url) {
        return true;
    }
    !BIG_RETAILER.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_pages_are_accepted() {
        assert!(is_product_page("https://www.amazon.com/JBL-Vibe/dp/B09V4Q/"));
        assert!(is_product_page("https://www.amazon.com/x/gp/product/B0001/"));
        assert!(is_product_page("https://www.walmart.com/ip/12345"));
        assert!(is_product_page("https://www.bestbuy.com/site/headphones/6505727.p"));
        assert!(is_product_page("https://www.target.com/p/throw-blanket/-/A-123"));
        assert!(is_product_page("https://www.ebay.com/itm/1234567890"));
    }

    #[test]
    fn test_listing_pages_are_rejected() {
        assert!(!is_product_page("https://www.amazon.com/s?k=earbuds"));
        assert!(!is_product_page("https://www.walmart.com/browse/electronics"));
        assert!(!is_product_page("https://www.target.com/c/headphones"));
    }

    #[test]
    fn test_brand_store_urls_are_accepted() {
        assert!(is_product_page("https://www.jbl.com/true-wireless/VIBEBUDS.html"));
    }

    #[test]
    fn test_tavily_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TavilyClient>();
    }
}
