//! HTTP request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::query::build_search_query;
use crate::results::PlacesPayload;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

/// Places search handler.
///
/// Validates input and configuration before any outbound call, then runs
/// normalize -> build query -> provider search -> reshape.
pub async fn places(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<PlacesPayload>, ApiError> {
    let raw_query = match &body {
        Some(Json(value)) => value
            .get("query")
            .and_then(Value::as_str)
            .filter(|query| !query.is_empty()),
        None => None,
    }
    .ok_or(ApiError::InvalidQuery)?
    .to_string();

    let api_key = state
        .settings
        .places
        .api_key
        .clone()
        .ok_or(ApiError::MissingApiKey)?;

    // Structure the query; degrades to the naive descriptor on any failure
    let parsed = state.normalizer.normalize(&raw_query).await;
    let search_query = build_search_query(&parsed);

    debug!("places search: {:?} -> {:?}", raw_query, search_query);

    let results = state.places.text_search(&search_query, &api_key).await?;

    Ok(Json(PlacesPayload::assemble(
        raw_query,
        search_query,
        parsed,
        results,
        &api_key,
    )))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "placefinder-rs",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }))
}

/// JSON 404 fallback for unmatched routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlacesSettings, Settings};
    use crate::network::HttpClient;
    use crate::places::PlacesClient;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state(api_key: Option<&str>, places_url: Option<&str>) -> AppState {
        let settings = Settings {
            places: PlacesSettings {
                api_key: api_key.map(String::from),
            },
            ..Settings::default()
        };
        let mut state = AppState::new(settings, HttpClient::new().unwrap());
        if let Some(url) = places_url {
            state.places =
                Arc::new(PlacesClient::new(HttpClient::new().unwrap()).with_base_url(url));
        }
        state
    }

    #[tokio::test]
    async fn test_places_rejects_missing_body() {
        let err = places(State(test_state(Some("maps-key"), None)), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery));
    }

    #[tokio::test]
    async fn test_places_rejects_missing_query_field() {
        let body = Some(Json(json!({ "q": "wrong field" })));
        let err = places(State(test_state(Some("maps-key"), None)), body)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery));
    }

    #[tokio::test]
    async fn test_places_rejects_non_string_query() {
        let body = Some(Json(json!({ "query": 42 })));
        let err = places(State(test_state(Some("maps-key"), None)), body)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery));
    }

    #[tokio::test]
    async fn test_places_rejects_empty_query() {
        let body = Some(Json(json!({ "query": "" })));
        let err = places(State(test_state(Some("maps-key"), None)), body)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidQuery));
    }

    #[tokio::test]
    async fn test_places_rejects_missing_api_key() {
        let body = Some(Json(json!({ "query": "tempat makan enak" })));
        let err = places(State(test_state(None, None)), body).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_places_naive_path_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/textsearch/json"))
            .and(query_param("query", "restaurant tempat makan enak di Jakarta"))
            .and(query_param("key", "maps-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [
                    {
                        "name": "Warung Enak",
                        "formatted_address": "Jakarta",
                        "geometry": { "location": { "lat": -6.2, "lng": 106.8 } }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let state = test_state(
            Some("maps-key"),
            Some(&format!("{}/textsearch/json", server.uri())),
        );
        let body = Some(Json(json!({ "query": "tempat makan enak di Jakarta" })));
        let Json(payload) = places(State(state), body).await.unwrap();

        assert_eq!(payload.original_query, "tempat makan enak di Jakarta");
        assert_eq!(payload.search_query, "restaurant tempat makan enak di Jakarta");
        assert_eq!(payload.parsed.place_type, "restaurant");
        assert_eq!(payload.count, 1);
        assert_eq!(payload.places[0].name, "Warung Enak");
    }

    #[tokio::test]
    async fn test_places_zero_results_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/textsearch/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
            )
            .mount(&server)
            .await;

        let state = test_state(
            Some("maps-key"),
            Some(&format!("{}/textsearch/json", server.uri())),
        );
        let body = Some(Json(json!({ "query": "tempat yang tidak ada" })));
        let Json(payload) = places(State(state), body).await.unwrap();

        assert_eq!(payload.count, 0);
        assert!(payload.places.is_empty());
    }

    #[tokio::test]
    async fn test_places_surfaces_provider_denial() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/textsearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid."
            })))
            .mount(&server)
            .await;

        let state = test_state(
            Some("bad-key"),
            Some(&format!("{}/textsearch/json", server.uri())),
        );
        let body = Some(Json(json!({ "query": "tempat makan" })));
        let err = places(State(state), body).await.unwrap_err();

        match err {
            ApiError::Upstream { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
