use serde::Serialize;
use uuid::Uuid;

use super::ids::new_id;
use super::todo::Todo;

/// A registered account together with the todos it owns, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub pro: bool,
    pub todos: Vec<Todo>,
}

impl User {
    pub fn new(name: String, username: String) -> Self {
        Self {
            id: new_id(),
            name,
            username,
            pro: false,
            todos: Vec::new(),
        }
    }

    /// Whether another todo fits under `limit` for a free account.
    pub fn can_add_todo(&self, limit: usize) -> bool {
        within_quota(self.pro, self.todos.len(), limit)
    }
}

/// Pro accounts are unlimited; free accounts may hold at most `limit` todos.
pub fn within_quota(pro: bool, todo_count: usize, limit: usize) -> bool {
    pro || todo_count < limit
}
