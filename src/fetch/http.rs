// src/fetch/http.rs
// =============================================================================
// The reqwest-backed page fetcher.
//
// Key functionality:
// - One unauthenticated GET per directory URL
// - Any non-2xx status is a failure (we never try to parse error pages)
// - Transport errors are sorted into FetchError variants (timeout, DNS,
//   TLS, ...) so a failed branch logs something an operator can act on
//
// TLS verification is controlled by CrawlConfig::accept_invalid_certs. With
// the rustls backend, accepting invalid certificates also disables hostname
// checks, which matches the legacy "trust the mirror" behavior.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::PageFetcher;
use crate::config::CrawlConfig;
use crate::error::{ConfigError, FetchError};

/// Fetches listing pages over HTTP(S)
///
/// Cloning is cheap: reqwest's Client is reference counted internally, so
/// every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawl configuration
    pub fn new(config: &CrawlConfig) -> Result<Self, ConfigError> {
        if config.accept_invalid_certs {
            warn!("TLS certificate and hostname verification is disabled for this crawl");
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        // No timeout unless asked for: a stalled server stalls its branch
        if let Some(timeout) = config.fetch_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        debug!(url = %url, "fetching listing");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

// Sorts a reqwest error into a FetchError variant
//
// reqwest doesn't expose DNS or TLS failures as distinct kinds, so those
// are recognized from the error chain's text.
fn categorize_error(url: &Url, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    // Keep the URL out of the text we match on; a host named "tls-mirror"
    // must not read as a TLS failure
    let error = error.without_url();
    let reason = error_chain(&error);
    let lowered = reason.to_lowercase();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        FetchError::Tls { url, reason }
    } else if error.is_connect() {
        if lowered.contains("dns") || lowered.contains("resolve") {
            FetchError::Dns { url }
        } else {
            FetchError::Connect { url, reason }
        }
    } else {
        FetchError::Request { url, reason }
    }
}

// Flattens an error and its sources into one line
//
// reqwest's top-level message is often just "error sending request"; the
// useful part (e.g. "dns error: failed to lookup address") sits further
// down the source chain.
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&CrawlConfig::new("http://unused.local/")).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>Index of /logs</html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/logs/", server.uri())).unwrap();
        let body = fetcher().fetch(&url).await.unwrap();
        assert_eq!(body, "<html>Index of /logs</html>");
    }

    #[tokio::test]
    async fn test_configured_user_agent_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs/"))
            .and(header("user-agent", "archive-walker/2.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let config = CrawlConfig::new(&server.uri()).with_user_agent("archive-walker/2.0");
        let fetcher = HttpFetcher::new(&config).unwrap();
        let url = Url::parse(&format!("{}/logs/", server.uri())).unwrap();
        assert_eq!(fetcher.fetch(&url).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forbidden/"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/forbidden/", server.uri())).unwrap();
        match fetcher().fetch(&url).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 403),
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        // Bind and drop a listener to get a port nothing is listening on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(err.url(), url.as_str());
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = CrawlConfig::new("http://unused.local/")
            .with_fetch_timeout(Some(std::time::Duration::from_millis(50)));
        let fetcher = HttpFetcher::new(&config).unwrap();

        let url = Url::parse(&format!("{}/slow/", server.uri())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }), "got {:?}", err);
    }
}
