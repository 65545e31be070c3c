//! Index and detail page parsing
//!
//! The index page yields listing candidates (anchors resolved against the
//! index URL); a detail page yields the structural-marker check and the
//! extracted text fields.

use crate::crawler::ListingCandidate;
use scraper::{Html, Selector};
use url::Url;

/// Anchor inside the posting body whose `href="#"` marks a live listing
const MARKER_SELECTOR: &str = "#postingbody a";

/// Node holding the listing title text
const TITLE_SELECTOR: &str = "#titletextonly";

/// Node holding the listing description
const BODY_SELECTOR: &str = "#postingbody";

/// Element carrying the posted date in its datetime attribute
const DATE_SELECTOR: &str = "time";

/// Text fields extracted from a detail page, passed through verbatim
#[derive(Debug, Clone)]
pub struct DetailPage {
    pub title: String,
    pub description: String,
    pub posted: String,
}

/// Collects listing candidates from an index page
///
/// Anchors matching `selector` are resolved against `base_url` and
/// returned in document order. Non-http(s) targets, fragment-only hrefs,
/// and special schemes are dropped, the same way a browser address bar
/// would never show them.
pub fn extract_candidates(html: &str, base_url: &Url, selector: &Selector) -> Vec<ListingCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for element in document.select(selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(href, base_url) {
                candidates.push(ListingCandidate { url: absolute_url });
            }
        }
    }

    candidates
}

/// Checks a detail page for the structural marker
///
/// The marker is an anchor inside the posting body whose `href` attribute
/// equals the literal `#`, the site-specific signal that the ad is still
/// active. Pages without it are filtered, not failed.
pub fn has_active_marker(html: &str) -> bool {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(MARKER_SELECTOR) {
        Ok(s) => s,
        Err(_) => return false,
    };

    document
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href == "#")
        .unwrap_or(false)
}

/// Extracts the text fields from a detail page
///
/// Returns `None` when the title or posting body node is missing; the
/// posted date is optional and comes back empty when absent.
pub fn parse_detail(html: &str) -> Option<DetailPage> {
    let document = Html::parse_document(html);

    let title = select_text(&document, TITLE_SELECTOR)?;
    let description = select_text(&document, BODY_SELECTOR)?;
    let posted = extract_posted(&document).unwrap_or_default();

    Some(DetailPage {
        title,
        description,
        posted,
    })
}

/// First non-empty text content matched by a selector
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Posted date from the first `<time>` element: its datetime attribute,
/// falling back to its text
fn extract_posted(document: &Html) -> Option<String> {
    let selector = Selector::parse(DATE_SELECTOR).ok()?;
    let element = document.select(&selector).next()?;

    if let Some(datetime) = element.value().attr("datetime") {
        return Some(datetime.to_string());
    }

    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Resolves a candidate href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
