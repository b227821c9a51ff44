//! Route handlers. Each one runs after its middleware chain has resolved
//! the entities it needs.

pub mod health;
pub mod todos;
pub mod users;

pub use health::health;
pub use todos::{create_todo, delete_todo, list_todos, mark_todo_done, update_todo};
pub use users::{activate_pro, register_user, show_user};
