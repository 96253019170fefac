use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{domain::services::token_service::TokenService, presentation::error::ApiError};

/// Middleware guarding the weather routes. Expects `Authorization: Bearer
/// <token>`; on success the verified claims are attached as a request
/// extension for downstream handlers.
pub async fn require_auth<T: TokenService + 'static>(
    State(tokens): State<Arc<T>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(token) = header_value.and_then(|value| value.strip_prefix("Bearer ")) else {
        return Err(ApiError::Unauthorized(
            "Missing or malformed Authorization header.".to_string(),
        ));
    };

    let claims = tokens.verify(token).map_err(|err| {
        warn!(%err, "token rejected");
        ApiError::Unauthorized("Invalid or expired token.".to_string())
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
