//! Request-scoped error taxonomy.
//!
//! Every failure a caller can trigger is one of these variants. None of them
//! is fatal to the process; `http::response` renders them as `{ "error": msg }`
//! with the matching 4xx status.

use axum::extract::rejection::JsonRejection;
use std::fmt;

/// Which key a failed user lookup was keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
    Id,
    Username,
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id => f.write_str("id"),
            LookupKey::Username => f.write_str("username"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("User not found by {0}")]
    UserNotFound(LookupKey),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Pro plan is already activated.")]
    AlreadyPro,

    #[error("Apenas usuários PRO podem criar mais de 10 todos.")]
    QuotaExceeded,

    #[error("O ID é inválido")]
    InvalidId,

    #[error("Esse todo não pertence à esse usuário, ou não existe")]
    TodoNotFound,

    #[error("Invalid deadline")]
    InvalidDeadline,

    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),
}

pub type ApiResult<T> = Result<T, ApiError>;
