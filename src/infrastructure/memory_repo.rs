use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId},
};

/// Map-backed store for tests and local runs. The id counter starts at 1 and
/// never reuses an id, even after deletes.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    items: BTreeMap<TodoId, Todo>,
    next_id: i64,
}

impl Default for Inner {
    fn default() -> Self {
        Self { items: BTreeMap::new(), next_id: 1 }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>> {
        Ok(self.inner.lock().unwrap().items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.inner.lock().unwrap().items.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: TodoId) -> Result<bool> {
        Ok(self.inner.lock().unwrap().items.contains_key(&id))
    }

    async fn save(&self, mut todo: Todo) -> Result<Todo> {
        let mut inner = self.inner.lock().unwrap();
        let id = match todo.id {
            Some(id) => id,
            None => {
                let id = TodoId(inner.next_id);
                inner.next_id += 1;
                todo.id = Some(id);
                id
            }
        };
        inner.items.insert(id, todo.clone());
        Ok(todo)
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<()> {
        self.inner.lock().unwrap().items.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::TodoStatus;

    fn todo(text: &str, status: TodoStatus) -> Todo {
        Todo { id: None, text: text.into(), status }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids_and_find_by_id_returns_equal_todo() {
        let repo = InMemoryTodoRepository::default();
        let first = repo.save(todo("First", TodoStatus::Pending)).await.unwrap();
        let second = repo.save(todo("Second", TodoStatus::Completed)).await.unwrap();
        assert_eq!(first.id, Some(TodoId(1)));
        assert_eq!(second.id, Some(TodoId(2)));

        let found = repo.find_by_id(TodoId(1)).await.unwrap().unwrap();
        assert_eq!(found, first);
    }

    #[tokio::test]
    async fn save_with_id_overwrites_the_existing_record() {
        let repo = InMemoryTodoRepository::default();
        let created = repo.save(todo("Before", TodoStatus::Pending)).await.unwrap();
        let replaced = Todo { text: "After".into(), status: TodoStatus::Completed, ..created };
        repo.save(replaced.clone()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![replaced]);
    }

    #[tokio::test]
    async fn exists_and_delete() {
        let repo = InMemoryTodoRepository::default();
        let created = repo.save(todo("Todo", TodoStatus::Pending)).await.unwrap();
        let id = created.id.unwrap();

        assert!(repo.exists_by_id(id).await.unwrap());
        repo.delete_by_id(id).await.unwrap();
        assert!(!repo.exists_by_id(id).await.unwrap());
        assert_eq!(repo.find_by_id(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = InMemoryTodoRepository::default();
        let first = repo.save(todo("First", TodoStatus::Pending)).await.unwrap();
        repo.delete_by_id(first.id.unwrap()).await.unwrap();
        let second = repo.save(todo("Second", TodoStatus::Pending)).await.unwrap();
        assert_eq!(second.id, Some(TodoId(2)));
    }
}
