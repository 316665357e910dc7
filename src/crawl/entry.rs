// src/crawl/entry.rs
// =============================================================================
// The crawler's data model.
//
// - CrawlEntry: one discovered file or directory, named by its path from the
//   crawl root ("a/", "a/c.txt", ...)
// - FrontierItem: a directory waiting to be fetched
// - CrawlResult: the final, sorted list of entries plus a few counters
//
// Paths are built purely from the chain of link names leading to an entry,
// never from the order pages happened to arrive in.
// =============================================================================

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use url::Url;

use crate::extract::DirLink;

/// Whether an entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    /// The one-letter code used in listing output
    pub fn code(self) -> char {
        match self {
            EntryKind::Directory => 'd',
            EntryKind::File => 'f',
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A file or directory discovered during the crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlEntry {
    pub kind: EntryKind,
    /// Relative path from the root; directories end in '/'
    pub path: String,
    /// Absolute URL of the entry
    pub url: String,
}

impl CrawlEntry {
    // Path first; url and kind only break ties between entries whose link
    // text happened to collide, so the order never depends on timing
    pub(crate) fn listing_order(&self, other: &Self) -> Ordering {
        self.path
            .cmp(&other.path)
            .then_with(|| self.url.cmp(&other.url))
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl fmt::Display for CrawlEntry {
    /// Formats as "d some/dir/" or "f some/file.txt"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

/// A directory waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    pub url: Url,
    /// 0 for the root listing
    pub depth: usize,
    /// Path of this directory relative to the root ("" for the root)
    pub path_prefix: String,
}

impl FrontierItem {
    pub fn root(url: Url) -> Self {
        Self {
            url,
            depth: 0,
            path_prefix: String::new(),
        }
    }

    /// The entry a link on this directory's page stands for
    pub fn entry_for(&self, link: &DirLink) -> CrawlEntry {
        let (kind, suffix) = if link.is_dir {
            (EntryKind::Directory, "/")
        } else {
            (EntryKind::File, "")
        };

        CrawlEntry {
            kind,
            path: format!("{}{}{}", self.path_prefix, link.name, suffix),
            url: link.url.to_string(),
        }
    }

    /// The frontier item for a subdirectory link, one level deeper
    pub fn child(&self, link: &DirLink) -> FrontierItem {
        FrontierItem {
            url: link.url.clone(),
            depth: self.depth + 1,
            path_prefix: format!("{}{}/", self.path_prefix, link.name),
        }
    }
}

/// Counters collected while crawling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Listings fetched successfully
    pub pages_fetched: usize,
    /// Listings whose fetch failed (each one a branch with no entries)
    pub pages_failed: usize,
    /// BFS levels that dispatched at least one fetch
    pub levels: usize,
}

/// Every entry found by a crawl, sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    entries: Vec<CrawlEntry>,
    stats: CrawlStats,
}

impl CrawlResult {
    /// Sorts `entries` into listing order
    pub fn new(mut entries: Vec<CrawlEntry>, stats: CrawlStats) -> Self {
        entries.sort_by(CrawlEntry::listing_order);
        Self { entries, stats }
    }

    pub fn entries(&self) -> &[CrawlEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CrawlEntry> {
        self.entries
    }

    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CrawlEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a CrawlResult {
    type Item = &'a CrawlEntry;
    type IntoIter = std::slice::Iter<'a, CrawlEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
