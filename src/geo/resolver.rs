use crate::geo::{Coordinates, Geocoder};
use crate::progress::CrawlObserver;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of a location lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Resolved(Coordinates),
    Unresolved,
}

impl Resolution {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Resolution::Resolved(coords) => Some(*coords),
            Resolution::Unresolved => None,
        }
    }
}

/// Resolves a (city, state) pair to coordinates through a geocoding provider
///
/// Lookups are cached for the resolver's lifetime, so a pipeline run
/// geocodes each distinct pair at most once. A provider miss logs
/// `"City not found"` through the observer and resolves to `Unresolved`;
/// a provider error is logged with its cause and treated the same way.
/// Neither ever propagates.
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    cache: HashMap<(String, String), Resolution>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            cache: HashMap::new(),
        }
    }

    /// Resolves a city/state pair, consulting the cache first
    pub async fn resolve(
        &mut self,
        city: &str,
        state: &str,
        observer: &dyn CrawlObserver,
    ) -> Resolution {
        let cache_key = (city.to_string(), state.to_string());
        if let Some(resolution) = self.cache.get(&cache_key) {
            return *resolution;
        }

        let query = format!("{}, {}", city, state);
        let resolution = match self.geocoder.geocode(&query).await {
            Ok(Some(coords)) => Resolution::Resolved(coords),
            Ok(None) => {
                observer.on_log("City not found");
                Resolution::Unresolved
            }
            Err(e) => {
                observer.on_log(&format!("Geocoding failed for {}: {}", query, e));
                Resolution::Unresolved
            }
        };

        self.cache.insert(cache_key, resolution);
        resolution
    }
}
