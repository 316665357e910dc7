// src/fetch/mod.rs
// =============================================================================
// This module fetches directory-listing pages.
//
// Submodules:
// - http: the real fetcher, built on reqwest
//
// The scheduler only ever talks to the PageFetcher trait, so tests can swap
// in an in-memory tree (with artificial delays and failures) without a
// network.
// =============================================================================

mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Fetches the raw body of one directory page
///
/// Implementations must be stateless with respect to the crawl: one call,
/// one GET, no retries. Failures are returned, never panicked.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}
