// src/crawl/mod.rs
// =============================================================================
// This module handles crawling directory listings.
//
// Features:
// - Level-by-level breadth-first crawling from a root listing
// - Bounded concurrency (a fixed number of fetches in flight)
// - Configurable depth limit
// - Failed subdirectories are skipped, never fatal
// - Deterministic output: entries sorted by path
//
// Submodules:
// - entry: CrawlEntry, FrontierItem, CrawlResult
// - queue: the Crawler itself
// =============================================================================

mod entry;
mod queue;

pub use entry::{CrawlEntry, CrawlResult, CrawlStats, EntryKind, FrontierItem};
pub use queue::{crawl_directory, Crawler};
