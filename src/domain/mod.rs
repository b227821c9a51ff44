//! Entity model.
//!
//! A `User` owns its `Todo`s directly; there is no separate todo table and
//! no ownership field on a todo. Looking a todo up under the wrong user is
//! indistinguishable from looking up one that does not exist.

pub mod deadline;
pub mod ids;
pub mod todo;
pub mod user;

pub use deadline::Deadline;
pub use ids::{new_id, parse_todo_id, parse_user_id};
pub use todo::Todo;
pub use user::User;
