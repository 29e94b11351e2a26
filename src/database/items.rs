use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A row of the protected example resource backed by the relational table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>("SELECT id, name, description FROM items")
        .fetch_all(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
) -> Result<Item, sqlx::Error> {
    let result = sqlx::query("INSERT INTO items (name, description) VALUES (?, ?)")
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;

    Ok(Item {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        description: description.map(str::to_string),
    })
}
