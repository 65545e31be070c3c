//! Field extractors
//!
//! Pure functions that turn detail-page text into structured fields:
//! phone numbers via pattern matching and the dated store-key derivation.
//! Title, description, and posted date come through the detail-page parser
//! verbatim; this module only assembles what is computed from them.

mod key;
mod phone;
mod record;

pub use key::store_key;
pub use phone::phone_numbers;
pub use record::ListingRecord;
