//! Data model for harvested reference documentation
//!
//! This module defines the identifiers that select what to crawl (`Version`,
//! `Category`) and the record shapes that end up in the artifacts.

mod category;
mod record;
mod version;

pub use category::{Category, DetailKind};
pub use record::{
    Argument, FunctionDetail, FunctionRecord, ItemStub, Record, VariableDetail, VariableRecord,
};
pub use version::{UnsupportedVersion, Version};
