//! Place search capability: nearby search and text find-place.
//!
//! Requests are described by [`NearbyRequest`] and [`PlaceQuery`]; the plugin
//! host turns them into HTTPS calls against the Google Places web service and
//! hands the raw status/body back for parsing here. Each request yields exactly
//! one reply.

use crate::domain::{Category, Coordinate, Location, LocationId, LocationStore, MAX_RATING};
use crate::engine::CategoryFilter;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Default nearby-search radius in meters.
pub const DEFAULT_RADIUS_M: u32 = 3000;

const NEARBY_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const FIND_PLACE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";

/// Description used when a result carries no vicinity.
const NO_DESCRIPTION: &str = "No description available.";

/// Why a place search failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceSearchError {
    /// The HTTP request itself failed (non-2xx status).
    #[error("place search returned HTTP {0}")]
    Http(u16),

    /// The service answered but refused the request.
    #[error("place search rejected ({status}): {message}")]
    Rejected { status: String, message: String },

    /// The response body could not be understood.
    #[error("malformed place search response: {0}")]
    Malformed(String),
}

/// Nearby search around a center point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub center: Coordinate,
    pub radius_m: u32,
    /// Category the results will be attributed to; `None` searches every type.
    pub category: Option<Category>,
}

impl NearbyRequest {
    #[must_use]
    pub const fn new(center: Coordinate, radius_m: u32, filter: CategoryFilter) -> Self {
        Self {
            center,
            radius_m,
            category: filter.category(),
        }
    }

    /// Request URL including the API key.
    #[must_use]
    pub fn url(&self, api_key: &str) -> String {
        let mut url = format!(
            "{NEARBY_ENDPOINT}?location={},{}&radius={}",
            self.center.lat, self.center.lng, self.radius_m
        );
        if let Some(place_type) = self.category.and_then(Category::provider_type) {
            url.push_str("&type=");
            url.push_str(place_type);
        }
        url.push_str("&key=");
        url.push_str(&encode(api_key));
        url
    }
}

/// Free-text place lookup biased towards the current map center.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub text: String,
    pub bias: Coordinate,
}

impl PlaceQuery {
    /// Request URL including the API key.
    #[must_use]
    pub fn url(&self, api_key: &str) -> String {
        format!(
            "{FIND_PLACE_ENDPOINT}?input={}&inputtype=textquery&fields=name,geometry&locationbias=point:{},{}&key={}",
            encode(&self.text),
            self.bias.lat,
            self.bias.lng,
            encode(api_key),
        )
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    open_now: Option<bool>,
}

/// One nearby-search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyPlace {
    place_id: String,
    name: String,
    geometry: Geometry,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_ratings_total: Option<u32>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
}

impl NearbyPlace {
    /// Converts the result into a location attributed to `category`.
    #[must_use]
    pub fn into_location(self, category: Option<Category>) -> Location {
        let category = category.unwrap_or(Category::Unclassified);
        let open_now = self.opening_hours.and_then(|hours| hours.open_now).unwrap_or(false);

        Location {
            id: LocationId::new(self.place_id),
            name: self.name,
            category,
            coordinate: Coordinate::new(self.geometry.location.lat, self.geometry.location.lng),
            description: self
                .vicinity
                .filter(|vicinity| !vicinity.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            rating: self.rating.unwrap_or(0.0).clamp(0.0, MAX_RATING),
            reviews: self.user_ratings_total.unwrap_or(0),
            icon: category.style().glyph.to_string(),
            details: if open_now { "Open now" } else { "Closed" }.to_string(),
        }
    }
}

/// A resolved find-place lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPlace {
    pub name: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    name: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error_message: Option<String>,
}

fn check_http(status_code: u16) -> Result<(), PlaceSearchError> {
    if (200..300).contains(&status_code) {
        Ok(())
    } else {
        Err(PlaceSearchError::Http(status_code))
    }
}

fn rejected(status: String, message: Option<String>) -> PlaceSearchError {
    PlaceSearchError::Rejected {
        status,
        message: message.unwrap_or_default(),
    }
}

/// Parses a nearby-search response.
///
/// `ZERO_RESULTS` is a successful, empty reply.
///
/// # Errors
///
/// See [`PlaceSearchError`].
pub fn parse_nearby(status_code: u16, body: &[u8]) -> Result<Vec<NearbyPlace>, PlaceSearchError> {
    check_http(status_code)?;
    let response: NearbyResponse =
        serde_json::from_slice(body).map_err(|e| PlaceSearchError::Malformed(e.to_string()))?;

    match response.status.as_str() {
        "OK" => Ok(response.results),
        "ZERO_RESULTS" => Ok(Vec::new()),
        _ => Err(rejected(response.status, response.error_message)),
    }
}

/// Parses a find-place response, returning the first candidate.
///
/// # Errors
///
/// See [`PlaceSearchError`].
pub fn parse_find_place(status_code: u16, body: &[u8]) -> Result<Option<FoundPlace>, PlaceSearchError> {
    check_http(status_code)?;
    let response: FindPlaceResponse =
        serde_json::from_slice(body).map_err(|e| PlaceSearchError::Malformed(e.to_string()))?;

    match response.status.as_str() {
        "OK" => Ok(response.candidates.into_iter().next().map(|candidate| FoundPlace {
            name: candidate.name,
            coordinate: Coordinate::new(candidate.geometry.location.lat, candidate.geometry.location.lng),
        })),
        "ZERO_RESULTS" => Ok(None),
        _ => Err(rejected(response.status, response.error_message)),
    }
}

/// Builds a replacement store from nearby results.
///
/// Repeated place ids keep their first occurrence; results with out-of-range
/// coordinates are dropped.
#[must_use]
pub fn places_to_store(places: Vec<NearbyPlace>, category: Option<Category>) -> LocationStore {
    let mut seen = HashSet::new();
    let locations: Vec<Location> = places
        .into_iter()
        .map(|place| place.into_location(category))
        .filter(|location| location.validate().is_ok())
        .filter(|location| seen.insert(location.id.clone()))
        .collect();

    // Every record was validated and de-duplicated above.
    LocationStore::new(locations).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEARBY_OK: &str = r#"{
        "status": "OK",
        "results": [
            {
                "place_id": "abc",
                "name": "Bryant Park",
                "geometry": { "location": { "lat": 40.7536, "lng": -73.9832 } },
                "vicinity": "New York",
                "rating": 4.7,
                "user_ratings_total": 1000,
                "opening_hours": { "open_now": true }
            },
            {
                "place_id": "def",
                "name": "Pocket Park",
                "geometry": { "location": { "lat": 40.75, "lng": -73.98 } }
            },
            {
                "place_id": "abc",
                "name": "Bryant Park (duplicate)",
                "geometry": { "location": { "lat": 40.7536, "lng": -73.9832 } }
            }
        ]
    }"#;

    #[test]
    fn test_nearby_url_maps_landmark_type() {
        let request = NearbyRequest::new(
            Coordinate::new(40.7128, -74.006),
            DEFAULT_RADIUS_M,
            CategoryFilter::Only(Category::Landmark),
        );
        let url = request.url("k3y");
        assert!(url.starts_with(NEARBY_ENDPOINT));
        assert!(url.contains("location=40.7128,-74.006"));
        assert!(url.contains("radius=3000"));
        assert!(url.contains("type=tourist_attraction"));
        assert!(url.ends_with("key=k3y"));
    }

    #[test]
    fn test_nearby_url_without_category_has_no_type() {
        let request = NearbyRequest::new(Coordinate::new(1.0, 2.0), 500, CategoryFilter::All);
        assert!(!request.url("k").contains("type="));
    }

    #[test]
    fn test_find_place_url_encodes_query() {
        let query = PlaceQuery {
            text: "Empire State & co".to_string(),
            bias: Coordinate::new(40.0, -74.0),
        };
        let url = query.url("k");
        assert!(url.contains("input=Empire%20State%20%26%20co"));
        assert!(url.contains("inputtype=textquery"));
    }

    #[test]
    fn test_parse_nearby_and_convert() {
        let places = parse_nearby(200, NEARBY_OK.as_bytes()).unwrap();
        assert_eq!(places.len(), 3);

        let store = places_to_store(places, Some(Category::Park));
        assert_eq!(store.len(), 2);

        let bryant = &store.as_slice()[0];
        assert_eq!(bryant.name, "Bryant Park");
        assert_eq!(bryant.category, Category::Park);
        assert_eq!(bryant.details, "Open now");
        assert_eq!(bryant.reviews, 1000);
        assert_eq!(bryant.icon, "🌳");

        let pocket = &store.as_slice()[1];
        assert_eq!(pocket.description, "No description available.");
        assert_eq!(pocket.details, "Closed");
        assert!(pocket.rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_results_without_category_are_unclassified() {
        let places = parse_nearby(200, NEARBY_OK.as_bytes()).unwrap();
        let store = places_to_store(places, None);
        assert!(store.as_slice().iter().all(|l| l.category == Category::Unclassified));
        assert_eq!(store.as_slice()[0].icon, "📍");
    }

    #[test]
    fn test_zero_results_is_empty_success() {
        let body = br#"{"status":"ZERO_RESULTS","results":[]}"#;
        assert_eq!(parse_nearby(200, body), Ok(vec![]));
    }

    #[test]
    fn test_denied_request_is_rejected() {
        let body = br#"{"status":"REQUEST_DENIED","error_message":"bad key","results":[]}"#;
        assert_eq!(
            parse_nearby(200, body),
            Err(PlaceSearchError::Rejected {
                status: "REQUEST_DENIED".to_string(),
                message: "bad key".to_string(),
            })
        );
    }

    #[test]
    fn test_http_failure_and_garbage() {
        assert_eq!(parse_nearby(503, b""), Err(PlaceSearchError::Http(503)));
        assert!(matches!(parse_nearby(200, b"<html>"), Err(PlaceSearchError::Malformed(_))));
    }

    #[test]
    fn test_find_place_first_candidate() {
        let body = br#"{
            "status": "OK",
            "candidates": [
                { "name": "Empire State Building", "geometry": { "location": { "lat": 40.7484, "lng": -73.9857 } } },
                { "name": "Other", "geometry": { "location": { "lat": 0.0, "lng": 0.0 } } }
            ]
        }"#;
        let found = parse_find_place(200, body).unwrap().unwrap();
        assert_eq!(found.name, "Empire State Building");
        assert_eq!(found.coordinate, Coordinate::new(40.7484, -73.9857));
    }

    #[test]
    fn test_find_place_zero_results_is_none() {
        let body = br#"{"status":"ZERO_RESULTS","candidates":[]}"#;
        assert_eq!(parse_find_place(200, body), Ok(None));
    }
}
