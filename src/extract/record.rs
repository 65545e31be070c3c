use serde::Serialize;

/// A fully extracted listing, ready to persist
///
/// The `title` is the dedup key: the store never holds two records with the
/// same title. Records are immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ListingRecord {
    pub title: String,
    pub description: String,
    pub phone_numbers: Vec<String>,
    pub posted: String,
    pub city: String,
    pub state: String,
    pub distance: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
