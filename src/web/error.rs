//! API error taxonomy mapped to HTTP responses

use crate::places::PlacesError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced at the HTTP boundary.
///
/// Normalization failures never reach this type; they are absorbed inside
/// the normalizer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is missing a usable query string
    #[error("query is required as string")]
    InvalidQuery,
    /// Search-provider credential is not configured
    #[error("Google Maps API key is not configured")]
    MissingApiKey,
    /// Provider answered with an unacceptable status
    #[error("Error from Google Places API")]
    Upstream {
        status: String,
        message: Option<String>,
    },
    /// Anything else; details are logged, never sent to the client
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<PlacesError> for ApiError {
    fn from(e: PlacesError) -> Self {
        match e {
            PlacesError::Status { status, message } => ApiError::Upstream { status, message },
            PlacesError::Transport(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, body) = match &self {
            ApiError::InvalidQuery => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            ApiError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
            ApiError::Upstream { status, message } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": self.to_string(), "status": status, "message": message }),
            ),
            ApiError::Internal(e) => {
                tracing::error!("internal error handling request: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
        };

        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::InvalidQuery.to_string(), "query is required as string");
        assert_eq!(
            ApiError::MissingApiKey.to_string(),
            "Google Maps API key is not configured"
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).to_string(),
            "Internal server error"
        );
    }

    #[test]
    fn test_provider_status_maps_to_upstream() {
        let err: ApiError = PlacesError::Status {
            status: "REQUEST_DENIED".to_string(),
            message: Some("denied".to_string()),
        }
        .into();
        assert!(matches!(err, ApiError::Upstream { .. }));
    }

    #[test]
    fn test_provider_transport_maps_to_internal() {
        let err: ApiError = PlacesError::Transport(anyhow::anyhow!("connection refused")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
