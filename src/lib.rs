// src/lib.rs
// =============================================================================
// dir-crawler: a concurrent, depth-bounded crawler for HTTP directory
// listings (the "Index of /" pages Apache and nginx generate).
//
// Pieces:
// - fetch:   gets one listing page (PageFetcher, HttpFetcher)
// - extract: turns a page into child links (LinkExtractor, AnchorScanner, DomExtractor)
// - crawl:   breadth-first scheduler tying the two together (Crawler)
// - config / error: parameters and the two error kinds
//
// Quick start:
//   let result = dir_crawler::crawl_directory("https://mirror.local/logs/", 5, 20).await?;
//   for entry in &result {
//       println!("{}", entry);   // "d cluster/", "f cluster/events.json", ...
//   }
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logging;

pub use config::CrawlConfig;
pub use crawl::{crawl_directory, CrawlEntry, CrawlResult, CrawlStats, Crawler, EntryKind};
pub use error::{ConfigError, FetchError};
pub use extract::{AnchorScanner, DirLink, DomExtractor, LinkExtractor, ParserKind};
pub use fetch::{HttpFetcher, PageFetcher};
