use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{Deadline, Todo};
use crate::error::ApiResult;
use crate::http::middleware::{TodoContext, UserContext};
use crate::http::request::ApiJson;
use crate::http::server::AppState;

/// Body of `POST /todos` and `PUT /todos/{id}`.
#[derive(Debug, Deserialize)]
pub struct TodoPayload {
    pub title: String,
    /// Raw date-like input; parsed according to the deadline policy.
    /// An explicit `null` is `Some(Value::Null)`, a missing field is `None`.
    #[serde(default, deserialize_with = "present")]
    pub deadline: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl TodoPayload {
    fn deadline(&self, state: &AppState) -> ApiResult<Deadline> {
        Deadline::resolve(self.deadline.as_ref(), state.deadlines.strict)
    }
}

/// `GET /todos`
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.store.todos(&user.user_id)?))
}

/// `POST /todos`
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ApiJson(body): ApiJson<TodoPayload>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let deadline = body.deadline(&state)?;
    let todo = state.store.create_todo(
        &user.user_id,
        body.title,
        deadline,
        state.quota.free_todo_limit,
    )?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PUT /todos/{id}`
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(todo): Extension<TodoContext>,
    ApiJson(body): ApiJson<TodoPayload>,
) -> ApiResult<Json<Todo>> {
    let deadline = body.deadline(&state)?;
    let updated = state
        .store
        .update_todo(&todo.user_id, &todo.todo_id, body.title, deadline)?;
    Ok(Json(updated))
}

/// `PATCH /todos/{id}/done`
pub async fn mark_todo_done(
    State(state): State<AppState>,
    Extension(todo): Extension<TodoContext>,
) -> ApiResult<Json<Todo>> {
    Ok(Json(state.store.complete_todo(&todo.user_id, &todo.todo_id)?))
}

/// `DELETE /todos/{id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(todo): Extension<TodoContext>,
) -> ApiResult<StatusCode> {
    state.store.delete_todo(&todo.user_id, &todo.todo_id)?;
    Ok(StatusCode::NO_CONTENT)
}
