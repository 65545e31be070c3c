//! Phone-number extraction
//!
//! Matches the telephone formats that show up in listing descriptions:
//! an optional `+<country code>`, an optional parenthesized area code,
//! and `-` or space separated digit groups.

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3} )?(?:\(\d{3}\) ?|\d{3}[- ])\d{3}[- ]\d{4}")
        .expect("phone pattern is a valid regex")
});

/// Extracts phone numbers from free-form text
///
/// Matches are returned in left-to-right order of appearance, as the exact
/// substrings found in the text. No normalization is applied.
///
/// # Example
///
/// ```
/// use adsift::extract::phone_numbers;
///
/// let numbers = phone_numbers("Contact me at +1 (123) 456-7890 or 987-654-3210.");
/// assert_eq!(numbers, vec!["+1 (123) 456-7890", "987-654-3210"]);
/// ```
pub fn phone_numbers(text: &str) -> Vec<String> {
    PHONE_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
