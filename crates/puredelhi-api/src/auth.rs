use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use puredelhi_core::{SecurityEvent, SecurityLogger};

use crate::{ApiError, ApiResult, AppState};

/// Bearer-token middleware for routes that require a signed-in citizen.
/// Validates the JWT and attaches an `AuthContext` extension; requests
/// without a valid token are rejected with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let context = state.jwt.validate_token(&token).map_err(|e| {
        SecurityLogger::log_event(SecurityEvent::TokenRejected {
            reason: e.to_string(),
        });
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}
