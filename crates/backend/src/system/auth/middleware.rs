use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::SessionClaims;

use crate::shared::config;

/// Claims of an admin session carried by the `Authorization` header.
/// Missing or invalid tokens give 401, a valid non-admin session gives 403.
pub fn authorize_admin(headers: &HeaderMap, secret: &str) -> Result<SessionClaims, StatusCode> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(super::jwt::bearer_token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = super::jwt::validate_token(token, secret).map_err(|e| {
        tracing::warn!("Rejected admin token: {:#}", e);
        StatusCode::UNAUTHORIZED
    })?;

    if !claims.is_admin {
        tracing::warn!("Session '{}' is not an admin", claims.username);
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(claims)
}

/// Gate for operator routes. Stores the verified claims in request
/// extensions so handlers do not validate the token twice.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let secret = config::current().auth.jwt_secret;
    let claims = authorize_admin(req.headers(), &secret).map_err(|status| {
        tracing::debug!("Admin gate refused {} with {}", req.uri().path(), status);
        status
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
