//! Harvest coordinator - main crawl orchestration logic
//!
//! This module drives a run:
//! - Every configured version is crawled concurrently
//! - Within a version, categories are processed one after another
//! - Within a category, detail extractions fan out through the shared gate
//! - Each finished category is handed to the output sink
//!
//! Nothing below the run level is fatal. A category that cannot be discovered
//! or written is logged and listed as skipped in the report; an item whose
//! detail cannot be retrieved keeps its stub fields.

use crate::config::{Config, ScraperConfig};
use crate::crawler::ConcurrencyGate;
use crate::extract::{discover, extract_detail};
use crate::model::{Category, DetailKind, ItemStub, Record, Version};
use crate::output::{
    CategoryReport, JsonFileSink, OutputSink, RunReport, SkippedCategory, VersionReport,
};
use crate::source::{HttpPageSource, PageSource};
use crate::ScrapeError;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use url::Url;

/// Main harvest coordinator structure
pub struct Coordinator<P: ?Sized, S: ?Sized> {
    config: ScraperConfig,
    base_url: Url,
    source: Arc<P>,
    sink: Arc<S>,
    gate: ConcurrencyGate,
}

impl<P, S> Coordinator<P, S>
where
    P: PageSource + ?Sized,
    S: OutputSink + ?Sized,
{
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Crawl behavior (versions, timeouts, detail mode, cap)
    /// * `source` - Page source used for every index and detail retrieval
    /// * `sink` - Destination of the category artifacts
    /// * `gate` - Admission control shared by all detail extractions
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScrapeError)` - The base URL does not parse
    pub fn new(
        config: ScraperConfig,
        source: Arc<P>,
        sink: Arc<S>,
        gate: ConcurrencyGate,
    ) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            config,
            base_url,
            source,
            sink,
            gate,
        })
    }

    /// Runs the whole harvest and reports what was written
    pub async fn run(&self) -> RunReport {
        let started_at = Utc::now();
        tracing::info!(
            "Starting harvest of {} versions (detail mode: {:?}, gate capacity: {})",
            self.config.versions.len(),
            self.config.detail_mode,
            self.gate.capacity()
        );

        let versions = join_all(
            self.config
                .versions
                .iter()
                .map(|version| self.run_version(*version)),
        )
        .await;

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            versions,
        };

        tracing::info!(
            "Harvest completed: {} items in {} artifacts, {} categories skipped",
            report.total_items(),
            report.total_artifacts(),
            report.total_skipped()
        );

        report
    }

    /// Processes every category of one version, in order
    pub async fn run_version(&self, version: Version) -> VersionReport {
        let mut report = VersionReport::new(version);

        for category in Category::ALL {
            match self.run_category(version, category).await {
                Ok(category_report) => report.categories.push(category_report),
                Err(e) => {
                    tracing::warn!("Skipping {} for {}: {}", category, version, e);
                    report.skipped.push(SkippedCategory {
                        category,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Discovers, enriches and writes one category of one version
    ///
    /// # Returns
    ///
    /// * `Ok(CategoryReport)` - The artifact was written
    /// * `Err(ScrapeError)` - The category was not written; nothing else is affected
    pub async fn run_category(
        &self,
        version: Version,
        category: Category,
    ) -> Result<CategoryReport, ScrapeError> {
        let index_url = version.index_url(&self.base_url)?;
        tracing::debug!("Discovering {} in {}", category, index_url);

        let mut stubs = discover(
            &*self.source,
            &index_url,
            version,
            category,
            self.config.wait_timeout(),
        )
        .await?;

        if let Some(cap) = self.config.item_cap() {
            if stubs.len() > cap {
                tracing::debug!(
                    "Capping {} {} from {} to {} items",
                    version,
                    category,
                    stubs.len(),
                    cap
                );
                stubs.truncate(cap);
            }
        }

        let (records, detail_failures) = match category.detail_kind() {
            Some(kind) => self.extract_all(kind, stubs).await,
            None => (stubs.into_iter().map(Record::Generic).collect(), 0),
        };

        let artifact = self.sink.write(version, category, &records)?;
        tracing::info!(
            "Saved {} {} items for {} to {}",
            records.len(),
            category.slug(),
            version,
            artifact.display()
        );

        Ok(CategoryReport {
            category,
            items: records.len(),
            detail_failures,
            artifact,
        })
    }

    /// Extracts every stub concurrently, keeping index order
    async fn extract_all(&self, kind: DetailKind, stubs: Vec<ItemStub>) -> (Vec<Record>, usize) {
        let timeout = self.config.wait_timeout();
        let locator = self.config.detail_mode;

        let outcomes = join_all(stubs.into_iter().map(|stub| {
            extract_detail(&*self.source, &self.gate, locator, kind, stub, timeout)
        }))
        .await;

        let failures = outcomes.iter().filter(|o| o.error.is_some()).count();
        let records = outcomes.into_iter().map(|o| o.record).collect();
        (records, failures)
    }
}

/// Runs a harvest with the HTTP page source and JSON file sink
///
/// # Example
///
/// ```no_run
/// use pine_ref_harvest::config::Config;
/// use pine_ref_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_harvest(&Config::default()).await?;
/// println!("{} items written", report.total_items());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: &Config) -> Result<RunReport, ScrapeError> {
    let source = Arc::new(HttpPageSource::from_config(config)?);
    let sink = Arc::new(JsonFileSink::new(&config.output.directory));
    let gate = ConcurrencyGate::new(config.scraper.concurrency_limit as usize);

    let coordinator = Coordinator::new(config.scraper.clone(), source, sink, gate)?;
    Ok(coordinator.run().await)
}
