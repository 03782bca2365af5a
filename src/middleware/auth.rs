use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::{validate_jwt, CallerIdentity, JwtError};
use crate::error::CallableError;
use crate::handlers::AppState;

/// Validates the bearer token and injects the CallerIdentity into the request
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, CallableError> {
    let token = extract_jwt_from_headers(&headers).map_err(CallableError::unauthenticated)?;

    let claims = validate_jwt(&token, &state.jwt_secret).map_err(|e| match e {
        JwtError::InvalidSecret => CallableError::internal("JWT secret not configured"),
        other => {
            warn!("Rejected bearer token: {}", other);
            CallableError::unauthenticated(other.to_string())
        }
    })?;

    request.extensions_mut().insert(CallerIdentity::from(claims));
    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
