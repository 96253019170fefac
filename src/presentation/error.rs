use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::error::{DomainError, ProviderError};

/// Error shape returned to HTTP clients. Internal failures are logged and
/// collapsed into a generic message so store and provider details never
/// leak into responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input rejected at the boundary, with per-field messages.
    Validation(Vec<String>),
    /// A well-formed request that cannot be satisfied, e.g. unknown city.
    Business(String),
    /// The upstream weather provider failed.
    Upstream(String),
    Unauthorized(String),
    Internal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub mensagem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalhes: Option<Vec<String>>,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Provider(ProviderError::CityNotFound(city)) => {
                ApiError::Business(format!("City not found: {city}"))
            }
            DomainError::Provider(provider_err) => {
                error!(%provider_err, "weather provider failure");
                ApiError::Upstream("Weather service is currently unavailable.".to_string())
            }
            other => {
                error!(%other, "internal failure");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, mensagem, detalhes) = match self {
            ApiError::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                "Invalid request parameters.".to_string(),
                Some(messages),
            ),
            ApiError::Business(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::Upstream(message) => (StatusCode::BAD_GATEWAY, message, None),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message, None),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.".to_string(),
                None,
            ),
        };

        let body = ErrorBody {
            status_code: status.as_u16(),
            mensagem,
            detalhes,
        };

        (status, Json(body)).into_response()
    }
}
