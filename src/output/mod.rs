//! Output module for persisting harvested artifacts
//!
//! This module handles:
//! - The output sink interface the coordinator writes through
//! - Writing one JSON artifact per (version, category)
//! - Building, printing and saving the run report

mod json;
pub mod stats;
mod traits;

pub use json::JsonFileSink;
pub use stats::{print_report, write_report, CategoryReport, RunReport, SkippedCategory, VersionReport};
pub use traits::{OutputError, OutputResult, OutputSink};
