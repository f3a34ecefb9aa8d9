use axum::http::StatusCode;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<R: TodoRepository> {
    pub repo: R,
}

pub fn router<R: TodoRepository + Clone>(state: AppState<R>) -> Router {
    Router::new()
        .route("/todos", post(create_todo::<R>).get(list_todos::<R>))
        .route(
            "/todos/:id",
            get(get_todo::<R>).put(update_todo::<R>).delete(delete_todo::<R>),
        )
        .with_state(state)
}

async fn list_todos<R: TodoRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.repo.find_all().await?))
}

async fn get_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<TodoId>,
) -> Result<Json<Todo>, ApiError> {
    match state.repo.find_by_id(id).await? {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::NotFound),
    }
}

async fn create_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Json(payload): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = payload.validate()?;
    let created = state.repo.save(todo).await?;
    tracing::info!(id = ?created.id, "todo created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<TodoId>,
    Json(payload): Json<UpdateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Some(mut todo) = state.repo.find_by_id(id).await? else {
        tracing::info!(%id, "todo not found for update");
        return Err(ApiError::UnknownId);
    };
    payload.apply(&mut todo)?;
    tracing::info!(%id, "updating todo");
    let updated = state.repo.save(todo).await?;
    Ok((StatusCode::ACCEPTED, Json(updated)))
}

async fn delete_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, ApiError> {
    if !state.repo.exists_by_id(id).await? {
        tracing::info!(%id, "todo not found for delete");
        return Err(ApiError::UnknownId);
    }
    state.repo.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
