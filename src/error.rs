// src/error.rs
// =============================================================================
// Error types for the crawler core.
//
// There are only two kinds of failure:
// - ConfigError: the caller handed us bad parameters. Fatal, and always
//   reported before the first request goes out.
// - FetchError: one directory page could not be fetched. Never fatal; the
//   scheduler logs it and treats that branch as empty.
//
// Malformed HTML is deliberately NOT an error. A page we can't make sense of
// simply yields fewer links.
// =============================================================================

use thiserror::Error;

/// Invalid crawl parameters, surfaced before any fetch begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("root URL is empty")]
    EmptyRootUrl,

    #[error("invalid root URL '{url}': {reason}")]
    InvalidRootUrl { url: String, reason: String },

    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    #[error("fetch timeout must be longer than zero")]
    ZeroTimeout,

    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}

/// A single directory page could not be fetched.
///
/// The variants mirror the ways a request can go wrong on the wire so the
/// log line tells an operator where to look.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not resolve host for {url}")]
    Dns { url: String },

    #[error("connection to {url} failed: {reason}")]
    Connect { url: String, reason: String },

    #[error("TLS error talking to {url}: {reason}")]
    Tls { url: String, reason: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not read body of {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Dns { url }
            | FetchError::Connect { url, .. }
            | FetchError::Tls { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. }
            | FetchError::Request { url, .. } => url,
        }
    }
}
