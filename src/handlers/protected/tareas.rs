//! RESTful task resource backed by the JSON document store.
//!
//! Every handler runs behind the bearer-token gate; validation happens before
//! any store access.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::api::format::{tarea_to_api_value, tareas_to_api_values};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validation::{parse_task_id, validate_new_tarea, validate_tarea_patch};

/// GET /tareas - full collection with a total count
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tasks = state.tasks.list_all().await?;

    Ok(Json(json!({
        "total": tasks.len(),
        "tareas": tareas_to_api_values(&tasks),
    })))
}

/// POST /tareas - create a task from a validated payload
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = validate_new_tarea(&body)?;
    let task = state.tasks.create(payload.titulo, payload.descripcion).await?;

    tracing::debug!(user_id = user.user_id, user = %user.username, task_id = task.id, "task created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "task created",
            "tarea": tarea_to_api_value(&task),
        })),
    ))
}

/// PUT /tareas/:id - merge the supplied fields into an existing task
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_task_id(&id)?;
    let patch = validate_tarea_patch(&body)?;

    let Some(task) = state.tasks.update(id, patch).await? else {
        return Err(ApiError::not_found(format!("task {} not found", id)));
    };

    tracing::debug!(user = %user.username, task_id = task.id, "task updated");

    Ok(Json(json!({
        "message": "task updated",
        "tarea": tarea_to_api_value(&task),
    })))
}

/// DELETE /tareas/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_task_id(&id)?;

    // Fetch first so the response can echo the removed record.
    let Some(task) = state.tasks.get_by_id(id).await? else {
        return Err(ApiError::not_found(format!("task {} not found", id)));
    };
    state.tasks.delete(id).await?;

    tracing::debug!(user = %user.username, task_id = id, "task deleted");

    Ok(Json(json!({
        "message": "task deleted",
        "tareaEliminada": tarea_to_api_value(&task),
    })))
}
