use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

use crate::domain::User;
use crate::error::ApiResult;
use crate::http::middleware::UserContext;
use crate::http::request::ApiJson;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub username: String,
}

/// `POST /users`
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.store.register(body.name, body.username)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`
pub async fn show_user(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.store.user(&user.user_id)?))
}

/// `PATCH /users/{id}/pro`
pub async fn activate_pro(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.store.upgrade_to_pro(&user.user_id)?))
}
