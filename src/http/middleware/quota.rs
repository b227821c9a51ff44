//! Todo creation quota.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};

use crate::domain::user::within_quota;
use crate::error::{ApiError, ApiResult};
use crate::http::middleware::lookup::UserContext;
use crate::http::server::AppState;

/// Stop free users who already hold the configured number of todos.
///
/// Must run after `require_user_by_username`.
pub async fn enforce_todo_quota(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    req: Request,
    next: Next,
) -> ApiResult<Response> {
    if !within_quota(user.pro, user.todo_count, state.quota.free_todo_limit) {
        tracing::info!(
            user_id = %user.user_id,
            todos = user.todo_count,
            limit = state.quota.free_todo_limit,
            "Todo quota exceeded"
        );
        return Err(ApiError::QuotaExceeded);
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary() {
        assert!(within_quota(false, 9, 10));
        assert!(!within_quota(false, 10, 10));
        assert!(within_quota(true, 10, 10));
        assert!(within_quota(true, 500, 10));
    }
}
