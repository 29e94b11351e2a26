//! Structural validation of task payloads and path identifiers.
//!
//! Runs before any store access so malformed input never costs I/O. Bodies
//! arrive as raw `serde_json::Value` so wrong-typed fields surface as taxonomy
//! errors instead of serde rejections.

use serde_json::Value;

use crate::error::ApiError;
use crate::store::TaskPatch;

pub const MAX_TITLE_CHARS: usize = 200;

/// Validated payload for creating a task.
#[derive(Debug, Clone)]
pub struct NewTarea {
    pub titulo: String,
    pub descripcion: String,
}

pub fn validate_new_tarea(body: &Value) -> Result<NewTarea, ApiError> {
    let titulo = require_titulo(body)?;
    let descripcion = optional_string(body, "descripcion")?.unwrap_or_default();

    Ok(NewTarea { titulo, descripcion })
}

/// Validate whichever of `titulo`, `descripcion`, `completada` the caller
/// supplied; omitted (or null) fields pass through as `None` and are left
/// untouched by the store.
pub fn validate_tarea_patch(body: &Value) -> Result<TaskPatch, ApiError> {
    let mut patch = TaskPatch::default();

    if body.get("titulo").is_some_and(|v| !v.is_null()) {
        // The title invariant (non-empty, bounded) holds on update too.
        patch.title = Some(require_titulo(body)?);
    }

    patch.description = optional_string(body, "descripcion")?;

    patch.completed = match body.get("completada") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(flag)) => Some(*flag),
        Some(_) => return Err(ApiError::invalid_type("completada", "a boolean")),
    };

    Ok(patch)
}

/// Path identifiers must be base-10 integers with no fractional or
/// non-numeric component.
pub fn parse_task_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::invalid_identifier(raw))
}

fn require_titulo(body: &Value) -> Result<String, ApiError> {
    let value = match body.get("titulo") {
        None | Some(Value::Null) => return Err(ApiError::missing_field("titulo")),
        Some(value) => value,
    };

    let titulo = value
        .as_str()
        .ok_or_else(|| ApiError::invalid_type("titulo", "a string"))?;

    if titulo.is_empty() {
        return Err(ApiError::missing_field("titulo"));
    }
    if titulo.chars().count() > MAX_TITLE_CHARS {
        return Err(ApiError::field_too_long("titulo", MAX_TITLE_CHARS));
    }

    Ok(titulo.to_string())
}

fn optional_string(body: &Value, field: &str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ApiError::invalid_type(field, "a string")),
    }
}
