//! Store-key derivation
//!
//! The destination spreadsheet name is derived from the search parameters
//! and the current calendar date, so same-day runs against the same search
//! append to one file and a new day starts a fresh one.

use chrono::Local;

/// Derives the spreadsheet filename for a search
///
/// Format: `lowercase(stripSpaces(city))_lowercase(state)_<distance>_YYYY-MM-DD.xlsx`.
/// Uses the local calendar date at call time, not any listing's posted date,
/// so identical inputs on the same day always produce the same key.
///
/// # Example
///
/// ```
/// use adsift::extract::store_key;
/// use chrono::Local;
///
/// let key = store_key("New York", "NY", 50);
/// let today = Local::now().format("%Y-%m-%d");
/// assert_eq!(key, format!("newyork_ny_50_{}.xlsx", today));
/// ```
pub fn store_key(city: &str, state: &str, distance: u32) -> String {
    let city = city.replace(' ', "").to_lowercase();
    let state = state.to_lowercase();
    let date = Local::now().format("%Y-%m-%d");
    format!("{}_{}_{}_{}.xlsx", city, state, distance, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_format() {
        let expected_date = Local::now().format("%Y-%m-%d").to_string();
        let key = store_key("New York", "NY", 50);
        assert_eq!(key, format!("newyork_ny_50_{}.xlsx", expected_date));
    }

    #[test]
    fn test_store_key_is_deterministic() {
        assert_eq!(store_key("New York", "NY", 50), store_key("New York", "NY", 50));
    }

    #[test]
    fn test_strips_all_spaces() {
        let key = store_key("Salt Lake City", "UT", 100);
        assert!(key.starts_with("saltlakecity_ut_100_"));
    }
}
