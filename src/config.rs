// src/config.rs
// =============================================================================
// Crawl parameters.
//
// CrawlConfig is built once (usually from CLI flags), validated, and then
// shared read-only by the fetcher and the scheduler. Nothing in here is read
// from the environment or from disk.
//
// About accept_invalid_certs:
//   The listings this tool was built for are internal log-archive mirrors
//   with self-signed or mismatched certificates, so certificate AND hostname
//   verification are skipped by default. That makes every fetch open to a
//   man-in-the-middle. Deployments that crawl anything else should turn
//   verification back on (`--verify-tls` on the command line).
// =============================================================================

use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Default number of directory levels to expand
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default number of simultaneous fetches
pub const DEFAULT_WORKERS: usize = 20;

/// Configuration for one crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Listing to start from, always ending in '/'
    pub root_url: String,
    /// How many directory expansions to perform (0 = fetch nothing)
    pub max_depth: usize,
    /// Upper bound on in-flight fetches across the whole crawl
    pub workers: usize,
    /// Skip TLS certificate and hostname verification
    pub accept_invalid_certs: bool,
    /// Per-fetch timeout; None keeps the transport default (no timeout)
    pub fetch_timeout: Option<Duration>,
    /// Never expand the same directory URL twice (guards against cyclic listings)
    pub skip_revisits: bool,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            root_url: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            workers: DEFAULT_WORKERS,
            accept_invalid_certs: true,
            fetch_timeout: None,
            skip_revisits: false,
            user_agent: concat!("dir-crawler/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CrawlConfig {
    /// Creates a configuration for `root_url` with default settings
    ///
    /// The root is normalized to end with '/' so relative hrefs on the root
    /// page resolve underneath it.
    pub fn new(root_url: &str) -> Self {
        Self {
            root_url: normalize_root(root_url),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets whether invalid TLS certificates and hostnames are accepted
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_skip_revisits(mut self, skip: bool) -> Self {
        self.skip_revisits = skip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks the parameters and returns the parsed root URL
    ///
    /// Called by the scheduler before the first fetch, so a bad
    /// configuration never produces partial network traffic.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        if self.root_url.trim().is_empty() {
            return Err(ConfigError::EmptyRootUrl);
        }

        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.workers));
        }

        // A zero timeout would fail every fetch and yield an empty listing
        if self.fetch_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }

        let root = Url::parse(&self.root_url).map_err(|e| ConfigError::InvalidRootUrl {
            url: self.root_url.clone(),
            reason: e.to_string(),
        })?;

        match root.scheme() {
            "http" | "https" => Ok(root),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

// Appends the trailing slash a directory URL needs
//
// Examples:
//   "http://host/logs"  -> "http://host/logs/"
//   "http://host/logs/" -> "http://host/logs/"
//   ""                  -> "" (left for validate() to reject)
fn normalize_root(root_url: &str) -> String {
    let trimmed = root_url.trim();
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
