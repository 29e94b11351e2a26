mod document;
mod tasks;

pub use document::{JsonFileDocument, StoreError, TaskDocument};
pub use tasks::{Task, TaskPatch, TaskStore};
