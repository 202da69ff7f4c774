//! Shared fixtures for the integration tests
//!
//! `FakeSource` serves canned markup keyed by URL (fragment ignored) and
//! records how many detail waits are in flight at once.

#![allow(dead_code)]

use async_trait::async_trait;
use pine_ref_harvest::config::ScraperConfig;
use pine_ref_harvest::markup::matches_selector;
use pine_ref_harvest::markup::selectors::index_marker;
use pine_ref_harvest::source::{Page, PageSource, WaitOutcome};
use pine_ref_harvest::{ScrapeError, Version};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub const BASE_URL: &str = "https://reference.test/pine-script-reference/";

/// In-memory page source
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, String>,
    stalled_markers: HashSet<String>,
    detail_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    detail_waits: AtomicUsize,
    opened: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `markup` for `url` (any fragment on lookups is ignored)
    pub fn with_page(mut self, url: &str, markup: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), markup.into());
        self
    }

    /// Makes every wait for `marker` time out
    pub fn with_stalled_marker(mut self, marker: impl Into<String>) -> Self {
        self.stalled_markers.insert(marker.into());
        self
    }

    /// Holds every detail wait for `delay` so extractions overlap
    pub fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = delay;
        self
    }

    /// Highest number of detail waits observed in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Total number of detail waits performed
    pub fn detail_waits(&self) -> usize {
        self.detail_waits.load(Ordering::SeqCst)
    }

    /// URLs opened so far, in order, fragments included
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

fn page_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.to_string()
}

#[async_trait]
impl PageSource for FakeSource {
    async fn open(&self, url: &Url) -> Result<Page, ScrapeError> {
        self.opened.lock().unwrap().push(url.to_string());

        match self.pages.get(&page_key(url)) {
            Some(markup) => Ok(Page::new(url.clone(), markup.clone())),
            None => Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    async fn wait_for(
        &self,
        page: &mut Page,
        marker: &str,
        _timeout: Duration,
    ) -> Result<WaitOutcome, ScrapeError> {
        let is_detail = marker != index_marker();

        if is_detail {
            self.detail_waits.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.detail_delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        if self.stalled_markers.contains(marker) {
            return Ok(WaitOutcome::TimedOut);
        }

        if matches_selector(page.snapshot(), marker)? {
            Ok(WaitOutcome::Ready)
        } else {
            Ok(WaitOutcome::TimedOut)
        }
    }
}

pub fn v6() -> Version {
    Version::try_from(6).unwrap()
}

/// Index URL of a version under [`BASE_URL`]
pub fn index_url(version: Version) -> String {
    format!("{}v{}/", BASE_URL, version.number())
}

/// Scraper configuration pointed at [`BASE_URL`] for the given versions
pub fn scraper_config(versions: Vec<Version>) -> ScraperConfig {
    ScraperConfig {
        base_url: BASE_URL.to_string(),
        versions,
        concurrency_limit: 5,
        per_item_cap: None,
        wait_timeout_ms: 1_000,
        poll_interval_ms: 50,
        respect_robots: false,
        ..ScraperConfig::default()
    }
}

/// One function detail block, addressed by `fun_<name>`
pub fn function_block(name: &str, argument: &str) -> String {
    format!(
        r#"<div class="tv-pine-reference-item" id="fun_{name}">
            <div class="tv-pine-reference-item__header">{name}</div>
            <div class="tv-pine-reference-item__text">The {name} function.</div>
            <div class="tv-pine-reference-item__sub-header">Syntax</div>
            <pre class="tv-pine-reference-item__syntax selected">{name}(source, length) → series float</pre>
            <div class="tv-pine-reference-item__sub-header">Arguments</div>
            <div class="tv-pine-reference-item__text"><span class="tv-pine-reference-item__arg-type">{argument}</span> Argument.</div>
            <div class="tv-pine-reference-item__sub-header">Returns</div>
            <div class="tv-pine-reference-item__text">Result of {name}.</div>
        </div>"#
    )
}

/// One variable detail block, addressed by `var_<name>`
pub fn variable_block(name: &str) -> String {
    format!(
        r#"<div class="tv-pine-reference-item" id="var_{name}">
            <div class="tv-pine-reference-item__header">{name}</div>
            <div class="tv-pine-reference-item__text">Current {name} price.</div>
            <div class="tv-pine-reference-item__sub-header">Type</div>
            <div class="tv-pine-reference-item__text">series float</div>
            <div class="tv-pine-reference-item__sub-header">Remarks</div>
            <div class="tv-pine-reference-item__text">Previous values may be accessed with <code>[]</code>.</div>
        </div>"#
    )
}

/// One accordion section with a link per `(name, href)`
pub fn section(title: &str, links: &[(&str, &str)]) -> String {
    let links: String = links
        .iter()
        .map(|(name, href)| format!(r#"<a href="{href}">{name}</a>"#))
        .collect();

    format!(
        r#"<div class="tv-accordion__section-header">{title}</div>
        <div class="tv-accordion__section-body">{links}</div>"#
    )
}

/// A full index page: accordion sections followed by detail blocks
pub fn index_page(sections: &[String], blocks: &[String]) -> String {
    format!(
        r#"<html><body>
        <div class="tv-accordion">{}</div>
        <div class="tv-pine-reference-items">{}</div>
        </body></html>"#,
        sections.concat(),
        blocks.concat()
    )
}
