//! Run report generation
//!
//! The coordinator returns a [`RunReport`] describing what was written and what
//! was skipped for every version. This module prints it for humans and saves
//! it as JSON next to the artifacts.

use crate::model::{Category, Version};
use crate::output::traits::{OutputError, OutputResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub versions: Vec<VersionReport>,
}

/// Outcome of one version
#[derive(Debug, Clone, Serialize)]
pub struct VersionReport {
    pub version: Version,
    pub categories: Vec<CategoryReport>,
    pub skipped: Vec<SkippedCategory>,
}

/// A category whose artifact was written
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: Category,

    /// Number of records in the artifact
    pub items: usize,

    /// Records whose detail retrieval failed (stub fields only)
    pub detail_failures: usize,

    pub artifact: PathBuf,
}

/// A category with no artifact, and why
#[derive(Debug, Clone, Serialize)]
pub struct SkippedCategory {
    pub category: Category,
    pub reason: String,
}

impl RunReport {
    /// Total number of records written across all versions
    pub fn total_items(&self) -> usize {
        self.versions
            .iter()
            .flat_map(|v| &v.categories)
            .map(|c| c.items)
            .sum()
    }

    /// Total number of artifacts written
    pub fn total_artifacts(&self) -> usize {
        self.versions.iter().map(|v| v.categories.len()).sum()
    }

    /// Total number of items left with empty details
    pub fn total_detail_failures(&self) -> usize {
        self.versions
            .iter()
            .flat_map(|v| &v.categories)
            .map(|c| c.detail_failures)
            .sum()
    }

    /// Total number of skipped categories
    pub fn total_skipped(&self) -> usize {
        self.versions.iter().map(|v| v.skipped.len()).sum()
    }

    /// Returns the report of one version
    pub fn version(&self, version: Version) -> Option<&VersionReport> {
        self.versions.iter().find(|v| v.version == version)
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

impl VersionReport {
    pub fn new(version: Version) -> Self {
        Self {
            version,
            categories: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Returns the report of a written category
    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn was_skipped(&self, category: Category) -> bool {
        self.skipped.iter().any(|s| s.category == category)
    }
}

/// Prints a run report to stdout
pub fn print_report(report: &RunReport) {
    println!("=== Pine-Ref-Harvest Run Report ===\n");
    println!("Started:  {}", report.started_at.to_rfc3339());
    println!("Finished: {}", report.finished_at.to_rfc3339());
    println!("Duration: {} seconds\n", report.duration_seconds());

    for version in &report.versions {
        println!("{}:", version.version);
        for category in &version.categories {
            if category.detail_failures > 0 {
                println!(
                    "  {:<12} {:>5} items ({} without details) -> {}",
                    category.category.title(),
                    category.items,
                    category.detail_failures,
                    category.artifact.display()
                );
            } else {
                println!(
                    "  {:<12} {:>5} items -> {}",
                    category.category.title(),
                    category.items,
                    category.artifact.display()
                );
            }
        }
        for skipped in &version.skipped {
            println!("  {:<12} skipped: {}", skipped.category.title(), skipped.reason);
        }
        println!();
    }

    println!(
        "Total: {} items in {} artifacts, {} without details, {} categories skipped",
        report.total_items(),
        report.total_artifacts(),
        report.total_detail_failures(),
        report.total_skipped()
    );
}

/// Writes a run report as pretty-printed JSON
pub fn write_report(report: &RunReport, path: &Path) -> OutputResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| OutputError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    Ok(())
}
