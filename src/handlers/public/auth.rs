//! Credential issuance: account registration and login.
//!
//! Both endpoints are public; everything else behind `/tareas` and
//! `/api/items` expects the token issued here.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::database::users;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/auth/register - create a user account
///
/// The password is stored only as a bcrypt hash. Duplicate usernames map to
/// 409 via the UNIQUE constraint rather than a read-then-insert race.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (username, password) = require_credentials(payload)?;

    let password_hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .map_err(|e| ApiError::internal(e.to_string()))?;

    let user_id = match users::insert(&state.db, &username, &password_hash).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(ApiError::conflict("user already exists"));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(username = %username, user_id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "user registered", "userId": user_id })),
    ))
}

/// POST /api/auth/login - verify credentials and issue a JWT
///
/// Unknown username and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (username, password) = require_credentials(payload)?;

    let Some(user) = users::find_by_username(&state.db, &username).await? else {
        return Err(ApiError::invalid_credential("invalid credentials"));
    };

    let stored_hash = user.password_hash.clone();
    let password_matches =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &stored_hash))
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .map_err(|e| ApiError::internal(e.to_string()))?;

    if !password_matches {
        return Err(ApiError::invalid_credential("invalid credentials"));
    }

    let token = generate_jwt(Claims::new(user.id, user.username.clone()))
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::info!(username = %user.username, "login ok");

    Ok(Json(json!({ "message": "login ok", "token": token })))
}

fn require_credentials(payload: CredentialsRequest) -> Result<(String, String), ApiError> {
    let username = payload
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::missing_field("username"))?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::missing_field("password"))?;

    Ok((username, password))
}
