//! Google Places Text Search client
//!
//! One GET per search. `OK` and `ZERO_RESULTS` are the only provider
//! statuses treated as success; anything else surfaces as
//! [`PlacesError::Status`] so the transport shell can report it distinctly
//! from internal failures.

use crate::network::HttpClient;
use serde::Deserialize;
use thiserror::Error;

/// Default text-search endpoint
pub const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

/// Errors from the places client
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Provider answered with a non-success, non-zero-results status
    #[error("places API returned status {status}")]
    Status {
        status: String,
        message: Option<String>,
    },
    /// Transport failure or undecodable response
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// One place record as returned by the provider, read-only
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub place_id: Option<String>,
}

impl PlaceResult {
    /// Coordinates, when the provider supplied a location
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let location = self.geometry.as_ref()?.location.as_ref()?;
        Some((location.lat, location.lng))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Text-search response envelope
#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

/// Client for the provider's text-search endpoint
pub struct PlacesClient {
    client: HttpClient,
    base_url: String,
}

impl PlacesClient {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: TEXT_SEARCH_URL.to_string(),
        }
    }

    /// Override the endpoint URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Run a text search and return the accepted results.
    ///
    /// `ZERO_RESULTS` yields an empty list rather than an error.
    pub async fn text_search(
        &self,
        query: &str,
        api_key: &str,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let response = self
            .client
            .get_with_params(&self.base_url, &[("query", query), ("key", api_key)])
            .await?;

        let body: TextSearchResponse = response.json()?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(body.results),
            _ => Err(PlacesError::Status {
                status: body.status,
                message: body.error_message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PlacesClient {
        PlacesClient::new(HttpClient::new().unwrap())
            .with_base_url(format!("{}/textsearch/json", server.uri()))
    }

    #[tokio::test]
    async fn test_text_search_forwards_query_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/textsearch/json"))
            .and(query_param("query", "restaurant sate Jakarta"))
            .and(query_param("key", "maps-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [
                    {
                        "name": "Sate Khas Senayan",
                        "formatted_address": "Jl. Kebon Sirih, Jakarta",
                        "geometry": { "location": { "lat": -6.186486, "lng": 106.834091 } },
                        "rating": 4.5,
                        "user_ratings_total": 1200,
                        "place_id": "abc123"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let results = client_for(&server)
            .text_search("restaurant sate Jakarta", "maps-key")
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Sate Khas Senayan");
        assert_eq!(results[0].coordinates(), Some((-6.186486, 106.834091)));
    }

    #[tokio::test]
    async fn test_text_search_zero_results_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/textsearch/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
            )
            .mount(&server)
            .await;

        let results = client_for(&server)
            .text_search("restaurant nothing here", "maps-key")
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_text_search_surfaces_provider_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/textsearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .text_search("restaurant sate", "bad-key")
            .await
            .unwrap_err();
        match err {
            PlacesError::Status { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_text_search_undecodable_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/textsearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .text_search("restaurant sate", "maps-key")
            .await
            .unwrap_err();
        assert!(matches!(err, PlacesError::Transport(_)));
    }

    #[test]
    fn test_missing_geometry_yields_no_coordinates() {
        let place: PlaceResult = serde_json::from_value(json!({ "name": "Mystery Spot" })).unwrap();
        assert_eq!(place.coordinates(), None);
    }
}
