//! Tavily search client for product URL resolution.
//!
//! Maps a product name to its best-guess real purchase page: a web search
//! for "buy {name}" filtered to actual product pages (not category or
//! listing pages), plus helpers that clean retailer-suffixed titles and
//! pull a price and category out of result snippets.

mod client;
mod extract;

pub use client::{ResolveError, SearchHit, TavilyClient};
pub(crate) use extract::{clean_title, extract_category, extract_price};
