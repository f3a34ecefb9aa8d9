use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::{
    Pool, Row, Sqlite,
    sqlite::{SqlitePoolOptions, SqliteRow},
};

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId, TodoStatus},
};

/// SQL-backed store. Ids come from the `AUTOINCREMENT` column, so a deleted id
/// is never handed out again.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                status TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query("SELECT id, text, status FROM todos ORDER BY id")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query("SELECT id, text, status FROM todos WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).transpose()
    }

    async fn exists_by_id(&self, id: TodoId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todos WHERE id = ?1)")
            .bind(id.0)
            .fetch_one(&*self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, todo: Todo) -> Result<Todo> {
        match todo.id {
            None => {
                let result = sqlx::query("INSERT INTO todos (text, status) VALUES (?1, ?2)")
                    .bind(&todo.text)
                    .bind(todo.status.as_str())
                    .execute(&*self.pool)
                    .await?;
                let id = TodoId(result.last_insert_rowid());
                Ok(Todo { id: Some(id), ..todo })
            }
            Some(id) => {
                sqlx::query("INSERT OR REPLACE INTO todos (id, text, status) VALUES (?1, ?2, ?3)")
                    .bind(id.0)
                    .bind(&todo.text)
                    .bind(todo.status.as_str())
                    .execute(&*self.pool)
                    .await?;
                Ok(todo)
            }
        }
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<()> {
        sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let id: i64 = row.get("id");
    let text: String = row.get("text");
    let status_str: String = row.get("status");
    let status: TodoStatus = status_str
        .parse()
        .map_err(|()| anyhow!("unknown status `{status_str}` stored for todo {id}"))?;
    Ok(Todo { id: Some(TodoId(id)), text, status })
}
