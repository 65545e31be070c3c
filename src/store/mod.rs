//! Record store gateway
//!
//! The gateway owns persistence: it derives the dated destination file
//! from the search parameters, checks the title column for duplicates,
//! and appends new records. The dedup check and the append happen under
//! one lock, so concurrent writers within this process cannot interleave
//! them. Separate processes writing the same file still race; run one
//! crawler per destination.

mod traits;
mod xlsx;

pub use traits::{Spreadsheet, StoreError, StoreResult};
pub use xlsx::XlsxSheet;

use crate::extract::{store_key, ListingRecord};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Gateway over the spreadsheet collaborator with dedup-by-title semantics
pub struct RecordStore {
    sheet: Mutex<Box<dyn Spreadsheet>>,
    path: PathBuf,
}

impl RecordStore {
    /// Opens the xlsx store for a search, deriving the filename from the
    /// search parameters and today's date
    pub fn open_xlsx(
        directory: &Path,
        city: &str,
        state: &str,
        distance: u32,
    ) -> StoreResult<Self> {
        std::fs::create_dir_all(directory)?;
        let path = directory.join(store_key(city, state, distance));
        let sheet = XlsxSheet::open(&path)?;
        Ok(Self {
            sheet: Mutex::new(Box::new(sheet)),
            path,
        })
    }

    /// Wraps an arbitrary spreadsheet implementation (used by tests)
    pub fn new(sheet: Box<dyn Spreadsheet>, path: PathBuf) -> Self {
        Self {
            sheet: Mutex::new(sheet),
            path,
        }
    }

    /// Path of the destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the record unless a record with the same title is already
    /// stored
    ///
    /// Returns `Ok(true)` when the record was appended, `Ok(false)` when it
    /// was a duplicate. The title check reads the full existing title
    /// column before any write.
    pub fn save_if_new(&self, record: &ListingRecord) -> StoreResult<bool> {
        let mut sheet = self.sheet.lock().unwrap();

        if sheet.exists() {
            let titles = sheet.read_titles()?;
            if titles.contains(&record.title) {
                return Ok(false);
            }
        }

        sheet.append_row(record)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// In-memory spreadsheet that counts appends
    struct CountingSheet {
        titles: HashSet<String>,
        appends: Arc<AtomicUsize>,
        exists: bool,
    }

    impl Spreadsheet for CountingSheet {
        fn exists(&self) -> bool {
            self.exists
        }

        fn read_titles(&self) -> StoreResult<HashSet<String>> {
            Ok(self.titles.clone())
        }

        fn append_row(&mut self, record: &ListingRecord) -> StoreResult<()> {
            self.appends.fetch_add(1, Ordering::SeqCst);
            self.titles.insert(record.title.clone());
            self.exists = true;
            Ok(())
        }
    }

    fn sample_record(title: &str) -> ListingRecord {
        ListingRecord {
            title: title.to_string(),
            description: "Sample Description".to_string(),
            phone_numbers: vec![],
            posted: "2023-10-01".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            distance: 100,
            latitude: None,
            longitude: None,
        }
    }

    fn counting_store() -> (RecordStore, Arc<AtomicUsize>) {
        let appends = Arc::new(AtomicUsize::new(0));
        let sheet = CountingSheet {
            titles: HashSet::new(),
            appends: appends.clone(),
            exists: false,
        };
        let store = RecordStore::new(Box::new(sheet), PathBuf::from("test.xlsx"));
        (store, appends)
    }

    #[test]
    fn test_saves_new_record() {
        let (store, appends) = counting_store();
        assert!(store.save_if_new(&sample_record("Sample Title")).unwrap());
        assert_eq!(appends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_title_skips_append() {
        let (store, appends) = counting_store();
        assert!(store.save_if_new(&sample_record("Sample Title")).unwrap());
        assert!(!store.save_if_new(&sample_record("Sample Title")).unwrap());
        assert_eq!(appends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distinct_titles_both_saved() {
        let (store, appends) = counting_store();
        assert!(store.save_if_new(&sample_record("First")).unwrap());
        assert!(store.save_if_new(&sample_record("Second")).unwrap());
        assert_eq!(appends.load(Ordering::SeqCst), 2);
    }
}
