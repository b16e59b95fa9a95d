use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, patch},
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{CurrentUser, jwt::jwt_auth},
    db::entities::todo,
    response::{ApiResponse, ApiResult},
    services::todo_service::{TodoChanges, TodoService},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/toggle", patch(toggle_todo))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Vec<TodoResponse>> {
    let service = TodoService::new(state.db.clone());
    let todos = service.list(&caller).await?;
    ApiResponse::list(todos.into_iter().map(TodoResponse::from).collect())
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<TodoResponse> {
    let service = TodoService::new(state.db.clone());
    let todo = service.get(&caller, &id).await?;
    ApiResponse::ok(todo.into())
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Json(body): Json<CreateTodoRequest>,
) -> ApiResult<TodoResponse> {
    let service = TodoService::new(state.db.clone());
    let title = body.title.unwrap_or_default();
    let todo = service
        .create(&caller, &title, body.description.as_deref())
        .await?;
    ApiResponse::with_message(
        StatusCode::CREATED,
        "Todo created successfully",
        todo.into(),
    )
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTodoRequest>,
) -> ApiResult<TodoResponse> {
    let service = TodoService::new(state.db.clone());
    let changes = TodoChanges {
        title: body.title,
        description: body.description,
        is_completed: body.is_completed,
    };
    let todo = service.update(&caller, &id, changes).await?;
    ApiResponse::with_message(StatusCode::OK, "Todo updated successfully", todo.into())
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<serde_json::Value> {
    let service = TodoService::new(state.db.clone());
    service.delete(&caller, &id).await?;
    ApiResponse::with_message(
        StatusCode::OK,
        "Todo deleted successfully",
        serde_json::json!({}),
    )
}

async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<TodoResponse> {
    let service = TodoService::new(state.db.clone());
    let todo = service.toggle(&caller, &id).await?;
    ApiResponse::with_message(StatusCode::OK, "Todo status updated", todo.into())
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            is_completed: model.is_completed,
            owner_id: model.owner_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
