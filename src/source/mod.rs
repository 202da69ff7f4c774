//! Page source providers
//!
//! A page source renders a URL into document markup. The extractors only ever
//! see the [`PageSource`] trait: open a page, wait for a CSS marker to appear,
//! take a snapshot, close. [`HttpPageSource`] is the bundled implementation;
//! tests substitute in-memory sources.

mod http;
mod robots;

pub use http::{build_http_client, HttpPageSource};
pub use robots::ParsedRobots;

use crate::ScrapeError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// An open page and its latest markup snapshot
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    markup: String,
}

impl Page {
    pub fn new(url: Url, markup: String) -> Self {
        Self { url, markup }
    }

    /// The URL the page was opened with
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The current markup of the page
    pub fn snapshot(&self) -> &str {
        &self.markup
    }

    /// Replaces the markup after a re-render
    pub fn refresh(&mut self, markup: String) {
        self.markup = markup;
    }
}

/// Outcome of waiting for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready,
    TimedOut,
}

/// Renders pages and waits for them to reach an expected structure
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Opens `url` and returns its initial snapshot
    async fn open(&self, url: &Url) -> Result<Page, ScrapeError>;

    /// Waits until `marker` (a CSS selector) matches the page, or `timeout` elapses
    async fn wait_for(
        &self,
        page: &mut Page,
        marker: &str,
        timeout: Duration,
    ) -> Result<WaitOutcome, ScrapeError>;

    /// Releases any resources held for the page
    async fn close(&self, page: Page) {
        drop(page);
    }

    /// Drops any cached snapshot of `url` and of pages beneath it, so the next
    /// `open` fetches fresh markup
    async fn forget(&self, _url: &Url) {}

    /// Opens `url`, waits for `marker` and returns the snapshot
    ///
    /// Returns `Ok(None)` when the marker never appeared within `timeout`.
    async fn render(
        &self,
        url: &Url,
        marker: &str,
        timeout: Duration,
    ) -> Result<Option<String>, ScrapeError> {
        let mut page = self.open(url).await?;
        let outcome = self.wait_for(&mut page, marker, timeout).await;

        let result = match outcome {
            Ok(WaitOutcome::Ready) => Ok(Some(page.snapshot().to_string())),
            Ok(WaitOutcome::TimedOut) => Ok(None),
            Err(e) => Err(e),
        };

        self.close(page).await;
        result
    }
}
