use async_trait::async_trait;

use super::todo::{Todo, TodoId};

/// Entity store for todos. `save` has upsert semantics: a todo without an id is
/// inserted under a freshly assigned id, a todo with one overwrites the record
/// with that id. Absence on reads is `None`, never an error. Deleting an id
/// that does not exist is the caller's problem to avoid; both implementations
/// treat it as a no-op.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn find_all(&self) -> anyhow::Result<Vec<Todo>>;
    async fn find_by_id(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn exists_by_id(&self, id: TodoId) -> anyhow::Result<bool>;
    async fn save(&self, todo: Todo) -> anyhow::Result<Todo>;
    async fn delete_by_id(&self, id: TodoId) -> anyhow::Result<()>;
}
