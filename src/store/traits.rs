//! Store traits and error types

use crate::extract::ListingRecord;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Workbook read error: {0}")]
    Read(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// The spreadsheet collaborator boundary
///
/// One implementation backs one destination file. The gateway above it
/// decides when to read and when to write; implementations only answer
/// the three primitive questions.
pub trait Spreadsheet: Send {
    /// Whether the destination file exists yet
    fn exists(&self) -> bool;

    /// The full set of titles currently stored
    fn read_titles(&self) -> StoreResult<HashSet<String>>;

    /// Appends one record, creating the destination on first write
    fn append_row(&mut self, record: &ListingRecord) -> StoreResult<()>;
}
