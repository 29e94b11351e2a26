use serde_json::{json, Map, Value};

use crate::store::Task;

/// Convert a task into the public wire shape consumed by existing clients:
/// `{ id, titulo, descripcion, completada, createdAt, updatedAt }`.
///
/// The persisted document keeps its own field names; only this boundary
/// speaks the client vocabulary. `updatedAt` is omitted until the task has
/// been modified at least once.
pub fn tarea_to_api_value(task: &Task) -> Value {
    let mut obj = Map::new();
    obj.insert("id".into(), json!(task.id));
    obj.insert("titulo".into(), Value::String(task.title.clone()));
    obj.insert("descripcion".into(), Value::String(task.description.clone()));
    obj.insert("completada".into(), Value::Bool(task.completed));
    obj.insert("createdAt".into(), Value::String(task.created_at.to_rfc3339()));
    if let Some(updated_at) = task.updated_at {
        obj.insert("updatedAt".into(), Value::String(updated_at.to_rfc3339()));
    }

    Value::Object(obj)
}

/// Convert a list of tasks to API values
pub fn tareas_to_api_values(tasks: &[Task]) -> Vec<Value> {
    tasks.iter().map(tarea_to_api_value).collect()
}
