use serde::{Deserialize, Serialize};

/// Claims of an operator session token issued by the admin login surface.
/// Handlers that need the session receive it explicitly through an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // operator id
    pub username: String,
    pub is_admin: bool,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at timestamp
}
