use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::SessionClaims;

use super::middleware::authorize_admin;
use crate::shared::config;

/// Verified operator session. Reuses the claims left by `require_admin`;
/// on routes outside the gate it checks the Bearer token itself.
pub struct AdminSession(pub SessionClaims);

impl AdminSession {
    fn resolve(parts: &Parts, secret: &str) -> Result<Self, StatusCode> {
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(AdminSession(claims.clone()));
        }
        authorize_admin(&parts.headers, secret).map(AdminSession)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let secret = config::current().auth.jwt_secret;
        Self::resolve(parts, &secret)
    }
}
