//! HTTP page source
//!
//! This module renders pages by fetching them with reqwest. Waiting for a
//! marker is done by polling: the snapshot is checked, and while the marker is
//! missing the page is fetched again every poll interval until the timeout.
//! This matches server-rendered and pre-rendered deployments of the reference.
//!
//! Snapshots are cached per URL without its fragment, so every item addressed
//! by fragment reuses the index page fetched during discovery. A re-fetch
//! that returns unchanged markup ends the wait early: a static page will not
//! grow the missing element.

use crate::config::{Config, UserAgentConfig};
use crate::markup::matches_selector;
use crate::source::robots::ParsedRobots;
use crate::source::{Page, PageSource, WaitOutcome};
use crate::ScrapeError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use pine_ref_harvest::config::UserAgentConfig;
/// use pine_ref_harvest::source::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page source backed by plain HTTP requests
pub struct HttpPageSource {
    client: Client,
    poll_interval: Duration,

    /// Product token checked against robots.txt; `None` disables the check
    robots_agent: Option<String>,

    /// Robots rules per origin, fetched on first use
    robots: Mutex<HashMap<String, Arc<ParsedRobots>>>,

    /// Latest markup per URL (fragment stripped)
    snapshots: Mutex<HashMap<String, String>>,
}

/// Cache key of a URL: the URL without its fragment
fn snapshot_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.to_string()
}

impl HttpPageSource {
    /// Creates a source that ignores robots.txt
    pub fn new(client: Client, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
            robots_agent: None,
            robots: Mutex::new(HashMap::new()),
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    /// Enables robots.txt checks for the given product token
    pub fn with_robots(mut self, agent: impl Into<String>) -> Self {
        self.robots_agent = Some(agent.into());
        self
    }

    /// Builds a source from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent).map_err(|source| ScrapeError::Http {
            url: config.scraper.base_url.clone(),
            source,
        })?;

        let source = Self::new(client, config.scraper.poll_interval());
        if config.scraper.respect_robots {
            Ok(source.with_robots(config.user_agent.crawler_name.clone()))
        } else {
            Ok(source)
        }
    }

    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        tracing::trace!("GET {}", url);

        // Fragments address elements inside the document, not resources
        let mut target = url.clone();
        target.set_fragment(None);

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })
    }

    async fn check_robots(&self, url: &Url) -> Result<(), ScrapeError> {
        let Some(agent) = &self.robots_agent else {
            return Ok(());
        };

        let robots = self.robots_for(url).await;
        if robots.is_allowed(url.as_str(), agent) {
            Ok(())
        } else {
            tracing::info!("URL {} disallowed by robots.txt", url);
            Err(ScrapeError::RobotsDenied {
                url: url.to_string(),
            })
        }
    }

    /// Returns the cached robots rules for the URL's origin, fetching on first use
    async fn robots_for(&self, url: &Url) -> Arc<ParsedRobots> {
        let origin = url.origin().ascii_serialization();

        let mut cache = self.robots.lock().await;
        if let Some(robots) = cache.get(&origin) {
            return Arc::clone(robots);
        }

        let robots = Arc::new(self.fetch_robots(url).await);
        cache.insert(origin, Arc::clone(&robots));
        robots
    }

    async fn fetch_robots(&self, url: &Url) -> ParsedRobots {
        let robots_url = match url.join("/robots.txt") {
            Ok(u) => u,
            Err(_) => return ParsedRobots::allow_all(),
        };

        tracing::debug!("Fetching robots.txt from {}", robots_url);
        match self.fetch(&robots_url).await {
            Ok(content) => ParsedRobots::from_content(&content),
            Err(e) => {
                tracing::debug!("No usable robots.txt at {}: {}", robots_url, e);
                ParsedRobots::allow_all()
            }
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn open(&self, url: &Url) -> Result<Page, ScrapeError> {
        self.check_robots(url).await?;

        let key = snapshot_key(url);
        if let Some(markup) = self.snapshots.lock().await.get(&key) {
            tracing::trace!("Reusing snapshot of {}", key);
            return Ok(Page::new(url.clone(), markup.clone()));
        }

        let markup = self.fetch(url).await?;
        self.snapshots.lock().await.insert(key, markup.clone());
        Ok(Page::new(url.clone(), markup))
    }

    async fn wait_for(
        &self,
        page: &mut Page,
        marker: &str,
        timeout: Duration,
    ) -> Result<WaitOutcome, ScrapeError> {
        let deadline = Instant::now() + timeout;

        loop {
            if matches_selector(page.snapshot(), marker)? {
                return Ok(WaitOutcome::Ready);
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::debug!("Marker {} never appeared at {}", marker, page.url());
                return Ok(WaitOutcome::TimedOut);
            }

            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
            let markup = self.fetch(page.url()).await?;
            if markup == page.snapshot() {
                tracing::debug!(
                    "Marker {} absent and {} unchanged after re-fetch",
                    marker,
                    page.url()
                );
                return Ok(WaitOutcome::TimedOut);
            }

            self.snapshots
                .lock()
                .await
                .insert(snapshot_key(page.url()), markup.clone());
            page.refresh(markup);
        }
    }

    async fn forget(&self, url: &Url) {
        let prefix = snapshot_key(url);
        self.snapshots
            .lock()
            .await
            .retain(|key, _| !key.starts_with(&prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_from_config_respects_robots_flag() {
        let mut config = Config::default();
        let source = HttpPageSource::from_config(&config).unwrap();
        assert_eq!(source.robots_agent.as_deref(), Some("pine-ref-harvest"));

        config.scraper.respect_robots = false;
        let source = HttpPageSource::from_config(&config).unwrap();
        assert!(source.robots_agent.is_none());
    }

    #[test]
    fn test_snapshot_key_drops_fragment() {
        let url = Url::parse("https://example.com/ref/v6/#fun_ta.sma").unwrap();
        assert_eq!(snapshot_key(&url), "https://example.com/ref/v6/");
    }

    #[tokio::test]
    async fn test_forget_clears_pages_beneath_url() {
        let source = HttpPageSource::new(Client::new(), Duration::from_millis(50));
        {
            let mut snapshots = source.snapshots.lock().await;
            snapshots.insert("https://example.com/ref/v6/".to_string(), String::new());
            snapshots.insert("https://example.com/ref/v6/sma".to_string(), String::new());
            snapshots.insert("https://example.com/ref/v5/".to_string(), String::new());
        }

        source
            .forget(&Url::parse("https://example.com/ref/v6/").unwrap())
            .await;

        let snapshots = source.snapshots.lock().await;
        assert_eq!(snapshots.len(), 1);
        assert!(snapshots.contains_key("https://example.com/ref/v5/"));
    }

    // Request/response behavior is covered with wiremock in tests/http_source_tests.rs
}
