use crate::geo::{Coordinates, GeoError, Geocoder};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// One entry of a Nominatim search response
///
/// Coordinates come back as decimal strings, not numbers.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Geocoder backed by a Nominatim-style search endpoint
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Public OpenStreetMap Nominatim instance
    pub const DEFAULT_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";

    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, Self::DEFAULT_BASE_URL)
    }

    /// Points the geocoder at a different endpoint (used by tests)
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeoError> {
        let url = format!("{}/search", self.base_url);
        let places: Vec<Place> = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = match places.into_iter().next() {
            Some(p) => p,
            None => return Ok(None),
        };

        parse_coordinates(&place.lat, &place.lon).map(Some)
    }
}

/// Parses the string coordinates of a search response entry
fn parse_coordinates(lat: &str, lon: &str) -> Result<Coordinates, GeoError> {
    let latitude: f64 = lat
        .parse()
        .map_err(|_| GeoError::Response(format!("unparseable latitude '{}'", lat)))?;
    let longitude: f64 = lon
        .parse()
        .map_err(|_| GeoError::Response(format!("unparseable longitude '{}'", lon)))?;

    Ok(Coordinates {
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        let coords = parse_coordinates("40.7128", "-74.0060").unwrap();
        assert_eq!(coords.latitude, 40.7128);
        assert_eq!(coords.longitude, -74.0060);
    }

    #[test]
    fn test_parse_coordinates_rejects_garbage() {
        assert!(parse_coordinates("north-ish", "-74.0").is_err());
        assert!(parse_coordinates("40.7", "west").is_err());
    }

    #[tokio::test]
    async fn test_geocode_against_mock_server() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "34.0522", "lon": "-118.2437" }
            ])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::with_base_url(Client::new(), server.uri());
        let coords = geocoder.geocode("Los Angeles, CA").await.unwrap().unwrap();
        assert_eq!(coords.latitude, 34.0522);
        assert_eq!(coords.longitude, -118.2437);
    }

    #[tokio::test]
    async fn test_geocode_no_match() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::with_base_url(Client::new(), server.uri());
        let result = geocoder.geocode("InvalidCity, InvalidState").await.unwrap();
        assert!(result.is_none());
    }
}
