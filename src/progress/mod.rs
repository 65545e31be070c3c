//! Crawl progress reporting
//!
//! The pipeline reports progress, state labels, and log lines to its caller
//! through an injected observer. Callbacks are invoked synchronously, in
//! pipeline order, and never concurrently with each other.

use std::sync::Mutex;

/// Receiver for pipeline events
///
/// Implementations must be cheap: the pipeline calls these inline between
/// fetches and never buffers events.
pub trait CrawlObserver: Send + Sync {
    /// Overall progress through the candidate list, 0..=100.
    /// Values are monotonically non-decreasing; 100 fires only after the
    /// last candidate has been attempted.
    fn on_progress(&self, percent: u8);

    /// A human-readable label for the pipeline's current phase
    fn on_state_change(&self, label: &str);

    /// A log line explaining a skip, failure, or notable event
    fn on_log(&self, message: &str);
}

/// Observer that forwards events to the tracing subscriber
///
/// This is what the CLI installs; embedding callers can provide their own
/// observer instead.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_progress(&self, percent: u8) {
        tracing::debug!("progress: {}%", percent);
    }

    fn on_state_change(&self, label: &str) {
        tracing::info!("state: {}", label);
    }

    fn on_log(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Observer that records every event, for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub progress: Mutex<Vec<u8>>,
    pub states: Mutex<Vec<String>>,
    pub logs: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of log lines equal to `message`
    pub fn log_count(&self, message: &str) -> usize {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.as_str() == message)
            .count()
    }
}

impl CrawlObserver for RecordingObserver {
    fn on_progress(&self, percent: u8) {
        self.progress.lock().unwrap().push(percent);
    }

    fn on_state_change(&self, label: &str) {
        self.states.lock().unwrap().push(label.to_string());
    }

    fn on_log(&self, message: &str) {
        self.logs.lock().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_collects_in_order() {
        let observer = RecordingObserver::new();
        observer.on_progress(0);
        observer.on_progress(50);
        observer.on_log("first");
        observer.on_log("second");
        observer.on_state_change("done");

        assert_eq!(*observer.progress.lock().unwrap(), vec![0, 50]);
        assert_eq!(observer.logs.lock().unwrap().len(), 2);
        assert_eq!(observer.states.lock().unwrap()[0], "done");
    }

    #[test]
    fn test_log_count_matches_exact_message() {
        let observer = RecordingObserver::new();
        observer.on_log("City not found");
        observer.on_log("something else");
        assert_eq!(observer.log_count("City not found"), 1);
    }
}
