//! Location resolution
//!
//! Wraps the geocoding provider behind a trait so the pipeline can be
//! tested without network access, and caches lookups so each (city, state)
//! pair is geocoded at most once per run.

mod nominatim;
mod resolver;

pub use nominatim::NominatimGeocoder;
pub use resolver::{LocationResolver, Resolution};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the geocoding provider
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected geocoder response: {0}")]
    Response(String),
}

/// Geographic coordinates as returned by the provider, unrounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The geocoding collaborator boundary
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Looks up a free-form query, returning `None` when there is no match
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeoError>;
}
