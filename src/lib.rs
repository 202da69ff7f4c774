//! Pine-Ref-Harvest: a versioned harvester for the Pine Script language reference
//!
//! This crate crawls the accordion-style reference index of every supported
//! language version, follows each function and variable into its detail block,
//! and writes one JSON artifact per (version, category) pair.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod markup;
pub mod model;
pub mod output;
pub mod source;

use thiserror::Error;

/// Main error type for harvesting operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Index for {version} never rendered at {url}")]
    RenderTimeout { version: model::Version, url: String },

    #[error("Category '{category}' not found in the {version} index")]
    CategoryNotFound {
        version: model::Version,
        category: model::Category,
    },

    #[error("Detail markup for '{name}' never appeared at {url}")]
    DetailTimeout { name: String, url: String },

    #[error("Item '{name}' has no fragment to locate its detail block")]
    MissingFragment { name: String },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Concurrency gate was closed")]
    GateClosed,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ConcurrencyGate, Coordinator};
pub use model::{Category, ItemStub, Record, Version};
