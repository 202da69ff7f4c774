//! Extraction pipeline pieces
//!
//! - `index`: finds a category's section in a version index and lists its stubs
//! - `detail`: enriches function and variable stubs from their detail blocks
//! - `rules`: the ordered fallback rules used by the detail extractor

pub mod detail;
pub mod index;
pub mod rules;

pub use detail::{extract_detail, DetailLocator, DetailOutcome};
pub use index::{discover, parse_index};
