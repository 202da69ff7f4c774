//! Crawler module for orchestrating a harvest run
//!
//! This module contains:
//! - The concurrency gate bounding in-flight detail extractions
//! - The coordinator driving versions, categories and items

mod coordinator;
mod gate;

pub use coordinator::{run_harvest, Coordinator};
pub use gate::{ConcurrencyGate, GateSlot};
