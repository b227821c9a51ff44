//! Lookup middleware.
//!
//! Each step resolves an entity from the request, attaches a context value
//! to the request extensions and hands over to the next step. A failed
//! lookup ends the chain with the matching `ApiError`.

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::domain::{parse_todo_id, parse_user_id};
use crate::error::{ApiError, ApiResult, LookupKey};
use crate::http::request::username_from;
use crate::http::server::AppState;
use crate::store::AccountSnapshot;

/// The resolved user, attached by the lookup steps.
#[derive(Clone, Debug)]
pub struct UserContext {
    pub user_id: Uuid,
    pub username: String,
    pub pro: bool,
    pub todo_count: usize,
}

impl From<AccountSnapshot> for UserContext {
    fn from(snapshot: AccountSnapshot) -> Self {
        Self {
            user_id: snapshot.id,
            username: snapshot.username,
            pro: snapshot.pro,
            todo_count: snapshot.todo_count,
        }
    }
}

/// The resolved todo and its owner, attached by `require_todo`.
#[derive(Clone, Debug)]
pub struct TodoContext {
    pub user_id: Uuid,
    pub todo_id: Uuid,
}

/// Resolve the acting user from the `username` header.
pub async fn require_user_by_username(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let user = resolve_username(&state, &req)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Resolve the user named by the `{id}` path parameter.
pub async fn require_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let user_id = parse_user_id(&id)?;
    let user = UserContext::from(state.store.snapshot_by_id(&user_id)?);
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Resolve a todo by the `username` header and the `{id}` path parameter.
///
/// The user is resolved first, then the id is checked for shape, then the
/// todo is looked up inside that user's list only.
pub async fn require_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let user = resolve_username(&state, &req)?;
    let todo_id = parse_todo_id(&id)?;
    let todo = state.store.todo(&user.user_id, &todo_id)?;

    tracing::trace!(user_id = %user.user_id, todo_id = %todo.id, "Todo resolved");
    req.extensions_mut().insert(TodoContext {
        user_id: user.user_id,
        todo_id: todo.id,
    });
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

fn resolve_username(state: &AppState, req: &Request) -> ApiResult<UserContext> {
    let username = username_from(req.headers()).ok_or(ApiError::UserNotFound(LookupKey::Username))?;
    state.store.snapshot_by_username(username).map(UserContext::from)
}
