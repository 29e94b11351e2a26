//! Protected example resource backed by the relational table.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use crate::database::items;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// GET /api/items - list every item
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items = items::list_all(&state.db).await?;
    Ok(Json(items))
}

/// POST /api/items - create an item; `name` is required
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = payload
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::missing_field("name"))?;

    let item = items::insert(&state.db, &name, payload.description.as_deref()).await?;

    tracing::debug!(user = %user.username, item_id = item.id, "item created");

    Ok((StatusCode::CREATED, Json(item)))
}
