//! Crawl pipeline - the main per-listing processing loop
//!
//! Candidates are processed strictly sequentially, in index order. Every
//! per-item failure is isolated: it is logged through the observer and the
//! loop moves on. The only way to stop a run early is to not start it.

use crate::config::Config;
use crate::crawler::parser::{extract_candidates, has_active_marker, parse_detail};
use crate::crawler::{build_http_client, fetch_page, FetchOutcome, ListingCandidate};
use crate::extract::{phone_numbers, ListingRecord};
use crate::geo::{Geocoder, LocationResolver, NominatimGeocoder};
use crate::progress::CrawlObserver;
use crate::store::RecordStore;
use crate::vpn::VpnController;
use crate::{AdsiftError, Result};
use reqwest::Client;
use scraper::Selector;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// The crawl pipeline
///
/// Owns the HTTP client, the record store, the location resolver, and the
/// VPN controller for the duration of a run. Holding the controller
/// exclusively is what keeps rotations serialized: there is never more
/// than one rotation in flight.
pub struct Pipeline {
    config: Arc<Config>,
    client: Client,
    store: RecordStore,
    resolver: LocationResolver,
    vpn: VpnController,
    observer: Arc<dyn CrawlObserver>,
}

impl Pipeline {
    /// Builds a pipeline with production collaborators
    pub fn new(config: Config, observer: Arc<dyn CrawlObserver>) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimGeocoder::new(client.clone()));
        let vpn = VpnController::new(config.vpn.clone());
        Self::with_collaborators(config, observer, geocoder, vpn)
    }

    /// Builds a pipeline with injected geocoding and VPN collaborators
    /// (used by tests and embedding callers)
    pub fn with_collaborators(
        config: Config,
        observer: Arc<dyn CrawlObserver>,
        geocoder: Arc<dyn Geocoder>,
        vpn: VpnController,
    ) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        let store = RecordStore::open_xlsx(
            Path::new(&config.output.directory),
            &config.search.city,
            &config.search.state,
            config.search.distance,
        )?;
        let resolver = LocationResolver::new(geocoder);

        Ok(Self {
            config: Arc::new(config),
            client,
            store,
            resolver,
            vpn,
            observer,
        })
    }

    /// Path of the destination spreadsheet
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Scans the index page and returns the listing candidates in document
    /// order
    ///
    /// Unlike per-candidate processing, a failure here is an error: with no
    /// index there is nothing to run against.
    pub async fn collect_candidates(&self) -> Result<Vec<ListingCandidate>> {
        self.observer.on_state_change("scanning index");

        let index_url = &self.config.search.index_url;
        let html = match fetch_page(&self.client, index_url).await {
            FetchOutcome::Success { body } => body,
            outcome => {
                return Err(AdsiftError::IndexFetch {
                    url: index_url.clone(),
                    message: outcome.failure_cause().unwrap_or_default(),
                })
            }
        };

        let base_url = Url::parse(index_url)?;
        let selector = Selector::parse(&self.config.search.listing_selector)
            .map_err(|e| AdsiftError::Selector(e.to_string()))?;

        let candidates = extract_candidates(&html, &base_url, &selector);
        tracing::info!("Found {} listing candidates", candidates.len());
        Ok(candidates)
    }

    /// Processes every candidate and returns the records newly persisted
    /// this run
    ///
    /// Progress is reported before each candidate from its position in
    /// index order, so it never regresses; 100 fires once after the last
    /// candidate has been attempted. Duplicates and filtered pages are
    /// excluded from the returned set without being treated as errors.
    pub async fn run(&mut self, candidates: Vec<ListingCandidate>) -> Vec<ListingRecord> {
        let total = candidates.len();
        self.observer.on_state_change("processing listings");

        let mut saved = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            self.observer.on_progress(progress_percent(index, total));

            if let Some(record) = self.process_candidate(candidate).await {
                saved.push(record);
            }
        }

        self.observer.on_progress(100);
        self.observer.on_state_change("done");
        saved
    }

    /// Processes one candidate end to end
    ///
    /// Returns the record if it was newly persisted; `None` covers every
    /// skip: fetch failure, marker absent, fields missing, duplicate.
    async fn process_candidate(&mut self, candidate: &ListingCandidate) -> Option<ListingRecord> {
        let body = self.fetch_with_rotation(&candidate.url).await?;

        // Pages without the marker are silently excluded; that is the
        // filtering outcome, not a failure.
        if !has_active_marker(&body) {
            tracing::debug!("No active marker on {}", candidate.url);
            return None;
        }

        let detail = match parse_detail(&body) {
            Some(detail) => detail,
            None => {
                self.observer
                    .on_log(&format!("Skipping {}: detail fields missing", candidate.url));
                return None;
            }
        };

        let phones = phone_numbers(&detail.description);
        let search = self.config.search.clone();
        let resolution = self
            .resolver
            .resolve(&search.city, &search.state, self.observer.as_ref())
            .await;
        let coordinates = resolution.coordinates();

        let record = ListingRecord {
            title: detail.title,
            description: detail.description,
            phone_numbers: phones,
            posted: detail.posted,
            city: search.city,
            state: search.state,
            distance: search.distance,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
        };

        match self.store.save_if_new(&record) {
            Ok(true) => {
                self.observer.on_log(&format!("Saved '{}'", record.title));
                Some(record)
            }
            Ok(false) => {
                tracing::debug!("Duplicate title '{}', skipped", record.title);
                None
            }
            Err(e) => {
                self.observer
                    .on_log(&format!("Failed to save '{}': {}", record.title, e));
                None
            }
        }
    }

    /// Fetches a detail page, rotating the VPN connection and retrying
    /// once on a transient failure
    ///
    /// Any failure outcome (timeout, network error, non-success status)
    /// counts as transient and triggers the rotation policy. If rotation
    /// fails, or the single retry fails, the candidate is abandoned.
    async fn fetch_with_rotation(&mut self, url: &str) -> Option<String> {
        let first = fetch_page(&self.client, url).await;
        let cause = match first {
            FetchOutcome::Success { body } => return Some(body),
            outcome => outcome.failure_cause().unwrap_or_default(),
        };

        self.observer
            .on_log(&format!("Error accessing {}: {}", url, cause));

        self.observer.on_state_change("rotating ip");
        let rotated = self.vpn.rotate().await;
        self.observer.on_state_change("processing listings");

        if !rotated {
            self.observer
                .on_log(&format!("IP rotation failed, skipping {}", url));
            return None;
        }

        match fetch_page(&self.client, url).await {
            FetchOutcome::Success { body } => Some(body),
            outcome => {
                self.observer.on_log(&format!(
                    "Retry failed for {}: {}",
                    url,
                    outcome.failure_cause().unwrap_or_default()
                ));
                None
            }
        }
    }
}

/// Progress through the candidate list before processing item `index`
fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (index * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_three_candidates() {
        assert_eq!(progress_percent(0, 3), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
    }

    #[test]
    fn test_progress_percent_is_monotonic() {
        let total = 7;
        let mut last = 0;
        for index in 0..total {
            let percent = progress_percent(index, total);
            assert!(percent >= last);
            assert!(percent < 100);
            last = percent;
        }
    }

    #[test]
    fn test_progress_percent_empty_list() {
        assert_eq!(progress_percent(0, 0), 100);
    }
}
