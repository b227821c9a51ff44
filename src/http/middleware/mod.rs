//! Request middleware.
//!
//! # Chains
//! ```text
//! GET    /users/{id}       → require_user_by_id
//! PATCH  /users/{id}/pro   → require_user_by_id
//! GET    /todos            → require_user_by_username
//! POST   /todos            → require_user_by_username → enforce_todo_quota
//! PUT    /todos/{id}       → require_todo
//! PATCH  /todos/{id}/done  → require_todo
//! DELETE /todos/{id}       → require_user_by_username → require_todo
//! ```

pub mod lookup;
pub mod metrics;
pub mod quota;

pub use lookup::{require_todo, require_user_by_id, require_user_by_username, TodoContext, UserContext};
pub use metrics::track_metrics;
pub use quota::enforce_todo_quota;
