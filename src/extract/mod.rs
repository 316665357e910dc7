// src/extract/mod.rs
// =============================================================================
// This module turns a directory-listing page into a list of child links.
//
// Submodules:
// - anchor: the default extractor, a tagged scan over <a> elements that
//   matches what Apache/nginx autoindex pages actually emit
// - dom: a stricter extractor that parses the page with scraper (html5ever)
//
// Both apply the same filtering rules (see `LinkFilter`), in this order:
//   1. empty href or the parent link "../"
//   2. hrefs starting with '?', '#' or '/' (sort links, fragments, absolute paths)
//   3. hrefs with a scheme separator "://" (links off the listing)
//   4. hrefs already seen on this page (first one wins, case-sensitive)
//
// Extraction is pure: no I/O, no shared state, same input -> same output.
// =============================================================================

mod anchor;
mod dom;

use std::collections::HashSet;

use clap::ValueEnum;
use url::Url;

pub use anchor::{AnchorScanner, AnchorTag};
pub use dom::DomExtractor;

/// One child link found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirLink {
    /// Display name taken from the link text, without a trailing '/'
    pub name: String,
    /// The href resolved against the page URL
    pub url: Url,
    /// True when the href ends in '/'
    pub is_dir: bool,
}

/// Parses a listing page into child links
///
/// The scheduler depends only on this trait, so a different parser can be
/// plugged in without touching the crawl loop.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, page: &str, page_url: &Url) -> Vec<DirLink>;
}

/// Which extractor the CLI should build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ParserKind {
    /// Tagged scan over <a> elements (fast, tolerant of autoindex quirks)
    #[default]
    Anchor,
    /// Full HTML parse with scraper
    Dom,
}

impl ParserKind {
    pub fn build(self) -> Box<dyn LinkExtractor> {
        match self {
            ParserKind::Anchor => Box::new(AnchorScanner::new()),
            ParserKind::Dom => Box::new(DomExtractor::new()),
        }
    }
}

impl<T: LinkExtractor + ?Sized> LinkExtractor for Box<T> {
    fn extract(&self, page: &str, page_url: &Url) -> Vec<DirLink> {
        (**self).extract(page, page_url)
    }
}

// Applies the filtering rules to (href, text) pairs in page order
//
// Shared by both extractors so they can't drift apart.
pub(crate) struct LinkFilter<'a> {
    page_url: &'a Url,
    seen: HashSet<String>,
    links: Vec<DirLink>,
}

impl<'a> LinkFilter<'a> {
    pub(crate) fn new(page_url: &'a Url) -> Self {
        Self {
            page_url,
            seen: HashSet::new(),
            links: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, href: &str, text: &str) {
        if href.is_empty() || href == "../" {
            return;
        }
        if href.starts_with(['?', '#', '/']) {
            return;
        }
        if href.contains("://") {
            return;
        }
        if !self.seen.insert(href.to_string()) {
            return;
        }

        // Url::join only fails on hrefs that aren't URLs at all
        let url = match self.page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(href, error = %e, "skipping unresolvable href");
                return;
            }
        };

        self.links.push(DirLink {
            name: text.trim().trim_end_matches('/').to_string(),
            url,
            is_dir: href.ends_with('/'),
        });
    }

    pub(crate) fn finish(self) -> Vec<DirLink> {
        self.links
    }
}
