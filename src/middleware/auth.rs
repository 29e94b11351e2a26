use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Authenticated caller context extracted from a verified JWT.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Bearer-token gate in front of the protected resources.
///
/// Exactly two terminal outcomes per request: the decoded identity is injected
/// as an `AuthUser` extension and the request proceeds, or the request is
/// rejected before any handler or store access runs. Nothing is cached between
/// requests.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let claims = validate_jwt(&token)?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::missing_credential("missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::missing_credential("invalid Authorization header encoding"))?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::missing_credential("Authorization header must use the Bearer scheme")
    })?;

    if token.trim().is_empty() {
        return Err(ApiError::missing_credential("empty bearer token"));
    }

    Ok(token.to_string())
}

/// Verify signature and expiry against the process-wide secret
fn validate_jwt(token: &str) -> Result<Claims, ApiError> {
    let secret = &config::config().security.jwt_secret;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| ApiError::invalid_credential(format!("invalid or expired token: {}", e)))?;

    Ok(token_data.claims)
}
