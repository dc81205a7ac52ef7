use anyhow::{Context, Result};
use contracts::system::auth::SessionClaims;
use jsonwebtoken::{decode, DecodingKey, Validation};

/// Validates an operator session token and returns its claims.
///
/// Tokens are issued by the admin login surface and signed with the shared
/// `[auth] jwt_secret`. An empty secret rejects every token.
pub fn validate_token(token: &str, secret: &str) -> Result<SessionClaims> {
    if secret.is_empty() {
        anyhow::bail!("No JWT secret configured");
    }

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
pub fn issue_token(claims: &SessionClaims, secret: &str) -> Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}
