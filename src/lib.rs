//! Adsift: a classified-listing harvester
//!
//! This crate crawls a classified-ad index, follows each listing to its
//! detail page, extracts structured fields, geocodes the advertised city,
//! and appends unique listings to a dated spreadsheet. When the source
//! starts refusing requests, the crawler rotates its egress IP through an
//! external VPN client before retrying.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod geo;
pub mod progress;
pub mod store;
pub mod vpn;

use thiserror::Error;

/// Main error type for adsift operations
#[derive(Debug, Error)]
pub enum AdsiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Index fetch failed for {url}: {message}")]
    IndexFetch { url: String, message: String },

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Geocoding error: {0}")]
    Geo(#[from] geo::GeoError),

    #[error("VPN client error: {0}")]
    Vpn(#[from] vpn::VpnError),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

/// Result type alias for adsift operations
pub type Result<T> = std::result::Result<T, AdsiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ListingCandidate, Pipeline};
pub use extract::{phone_numbers, store_key, ListingRecord};
pub use geo::{Coordinates, LocationResolver, Resolution};
pub use progress::CrawlObserver;
