use crate::extract::DetailLocator;
use crate::model::Version;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for Pine-Ref-Harvest
///
/// Every section has defaults, so an empty file (or no file) is a valid
/// configuration that crawls the full public reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScraperConfig {
    /// Root of the reference site; version trees live at `<base-url>v<N>/`
    pub base_url: String,

    /// Versions to crawl
    pub versions: Vec<Version>,

    /// Maximum number of detail extractions in flight at once
    pub concurrency_limit: u32,

    /// Maximum number of items processed per category (0 or absent = all)
    pub per_item_cap: Option<u32>,

    /// Whether detail blocks are addressed by fragment or by dedicated page
    pub detail_mode: DetailLocator,

    /// How long to wait for any expected marker (milliseconds)
    pub wait_timeout_ms: u64,

    /// Delay between re-renders while waiting for a marker (milliseconds)
    pub poll_interval_ms: u64,

    /// Whether robots.txt is honoured
    pub respect_robots: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.tradingview.com/pine-script-reference/".to_string(),
            versions: Version::SUPPORTED.to_vec(),
            concurrency_limit: 5,
            per_item_cap: None,
            detail_mode: DetailLocator::Fragment,
            wait_timeout_ms: 60_000,
            poll_interval_ms: 500,
            respect_robots: true,
        }
    }
}

impl ScraperConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Returns the per-category item cap, treating 0 as unbounded
    pub fn item_cap(&self) -> Option<usize> {
        self.per_item_cap
            .filter(|cap| *cap > 0)
            .map(|cap| cap as usize)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler; also the robots.txt product token
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,

    /// Email address for crawler-related contact
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "pine-ref-harvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/pine-ref-harvest".to_string(),
            contact_email: "maintainers@pine-ref-harvest.dev".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving one subdirectory per version
    pub directory: String,

    /// Path of the JSON run report
    pub summary_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./pine-reference".to_string(),
            summary_path: "./pine-reference/summary.json".to_string(),
        }
    }
}

impl OutputConfig {
    /// Redirects artifacts to `directory`
    ///
    /// A summary path still at its default moves along with the artifacts;
    /// an explicitly configured one is kept.
    pub fn set_directory(&mut self, directory: impl Into<String>) {
        let directory = directory.into();
        if self.summary_path == Self::default().summary_path {
            self.summary_path = Path::new(&directory)
                .join("summary.json")
                .display()
                .to_string();
        }
        self.directory = directory;
    }
}
