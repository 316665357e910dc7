// src/crawl/queue.rs
// =============================================================================
// The crawl scheduler: a level-synchronous breadth-first walk over
// directory listings.
//
// How it works:
// 1. The frontier starts as just the root listing (depth 0)
// 2. Drop frontier items at or past max_depth (they were already recorded as
//    entries when their parent page was read; they are just not expanded)
// 3. Fetch + extract every remaining item, at most `workers` at a time
// 4. Wait for the whole level to finish (the barrier)
// 5. Record every link as an entry; subdirectories form the next frontier
// 6. Repeat until the frontier is empty, then sort entries by path
//
// Failure containment:
// - A fetch failure is logged and that branch simply contributes nothing
// - Only a bad configuration fails the crawl, and that's caught up front
//
// Concurrency:
// - `buffer_unordered(workers)` keeps at most `workers` fetches in flight.
//   Levels never overlap, so that bound holds for the whole crawl.
// - Workers only produce values; the entry list and the next frontier are
//   owned by this loop and merged after the barrier. No locks, nothing
//   shared across an await.
//
// Known limitation: without CrawlConfig::fetch_timeout a server that never
// answers stalls its level forever.
// =============================================================================

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::entry::{CrawlEntry, CrawlResult, CrawlStats, FrontierItem};
use crate::config::CrawlConfig;
use crate::error::ConfigError;
use crate::extract::{AnchorScanner, DirLink, LinkExtractor};
use crate::fetch::{HttpFetcher, PageFetcher};

/// Breadth-first crawler over directory listings
pub struct Crawler<F, E> {
    config: CrawlConfig,
    fetcher: F,
    extractor: E,
}

impl Crawler<HttpFetcher, AnchorScanner> {
    /// Builds a crawler that fetches over HTTP and uses the anchor scanner
    ///
    /// Fails with a ConfigError if the configuration is invalid.
    pub fn from_config(config: CrawlConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(config, fetcher, AnchorScanner::new()))
    }
}

impl<F, E> Crawler<F, E>
where
    F: PageFetcher,
    E: LinkExtractor,
{
    pub fn new(config: CrawlConfig, fetcher: F, extractor: E) -> Self {
        Self {
            config,
            fetcher,
            extractor,
        }
    }

    /// Swaps in a different link extractor
    pub fn with_extractor<E2: LinkExtractor>(self, extractor: E2) -> Crawler<F, E2> {
        Crawler {
            config: self.config,
            fetcher: self.fetcher,
            extractor,
        }
    }

    /// Runs the crawl and returns every entry sorted by path
    pub async fn crawl(&self) -> Result<CrawlResult, ConfigError> {
        let root = self.config.validate()?;
        let max_depth = self.config.max_depth;
        let workers = self.config.workers;

        info!(root = %root, max_depth, workers, "starting crawl");

        // Only consulted when skip_revisits is on
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(root.to_string());

        let mut frontier = vec![FrontierItem::root(root)];
        let mut entries: Vec<CrawlEntry> = Vec::new();
        let mut stats = CrawlStats::default();

        while !frontier.is_empty() {
            let eligible: Vec<FrontierItem> = frontier
                .drain(..)
                .filter(|item| item.depth < max_depth)
                .collect();

            if eligible.is_empty() {
                break;
            }

            stats.levels += 1;
            let depth = eligible[0].depth;
            info!(depth, directories = eligible.len(), "crawling level");

            // Barrier: collect() resolves only once every fetch in the level is done
            let outcomes: Vec<(FrontierItem, Option<Vec<DirLink>>)> = stream::iter(eligible)
                .map(|item| self.visit(item))
                .buffer_unordered(workers)
                .collect()
                .await;

            let mut next_frontier = Vec::new();
            for (item, links) in outcomes {
                let Some(links) = links else {
                    stats.pages_failed += 1;
                    continue;
                };
                stats.pages_fetched += 1;

                for link in &links {
                    entries.push(item.entry_for(link));

                    if !link.is_dir {
                        continue;
                    }
                    if self.config.skip_revisits && !visited.insert(link.url.to_string()) {
                        debug!(url = %link.url, "already visited, not expanding again");
                        continue;
                    }
                    next_frontier.push(item.child(link));
                }
            }

            frontier = next_frontier;
        }

        info!(
            entries = entries.len(),
            pages_fetched = stats.pages_fetched,
            pages_failed = stats.pages_failed,
            "crawl finished"
        );

        Ok(CrawlResult::new(entries, stats))
    }

    // Fetches one listing and extracts its links
    //
    // Returns None when the fetch failed; the branch then yields nothing.
    async fn visit(&self, item: FrontierItem) -> (FrontierItem, Option<Vec<DirLink>>) {
        match self.fetcher.fetch(&item.url).await {
            Ok(page) => {
                let links = self.extractor.extract(&page, &item.url);
                debug!(url = %item.url, depth = item.depth, links = links.len(), "listing parsed");
                (item, Some(links))
            }
            Err(e) => {
                warn!(url = %item.url, depth = item.depth, error = %e, "fetch failed, skipping branch");
                (item, None)
            }
        }
    }
}

/// Crawls `root_url` over HTTP with default settings apart from depth and workers
///
/// ```text
/// crawl_directory("https://mirror.local/logs/run-1/", 5, 20)
///   -> [d cluster/, f cluster/events.json, f junit.xml, ...]
/// ```
pub async fn crawl_directory(
    root_url: &str,
    max_depth: usize,
    workers: usize,
) -> Result<CrawlResult, ConfigError> {
    let config = CrawlConfig::new(root_url)
        .with_max_depth(max_depth)
        .with_workers(workers);
    Crawler::from_config(config)?.crawl().await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why buffer_unordered instead of tokio::spawn per directory?
//    - buffer_unordered(n) polls at most n futures at once from the stream
//    - The futures borrow `self`, so nothing has to be 'static or Arc'd
//    - collect() only finishes when the last fetch of the level is done,
//      which is exactly the barrier between BFS levels
//
// 2. What is `let Some(links) = links else { ... };`?
//    - "let-else": bind the pattern or run the else block, which must leave
//      the scope (here with `continue`)
//
// 3. Why is the output sorted at the end instead of kept sorted?
//    - Fetches finish in whatever order the network decides
//    - Sorting once after the crawl is cheaper and makes the order a
//      property of the paths alone
// -----------------------------------------------------------------------------
