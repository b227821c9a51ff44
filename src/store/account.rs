//! A user plus the todo-id index over its todo list.

use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{Todo, User};

#[derive(Debug)]
pub(crate) struct Account {
    pub(crate) user: User,
    /// todo id -> position in `user.todos`
    positions: HashMap<Uuid, usize>,
}

impl Account {
    pub(crate) fn new(user: User) -> Self {
        let positions = index_positions(&user.todos);
        Self { user, positions }
    }

    pub(crate) fn position(&self, todo_id: &Uuid) -> Option<usize> {
        self.positions.get(todo_id).copied()
    }

    pub(crate) fn todo(&self, todo_id: &Uuid) -> Option<&Todo> {
        self.position(todo_id).map(|pos| &self.user.todos[pos])
    }

    pub(crate) fn todo_mut(&mut self, todo_id: &Uuid) -> Option<&mut Todo> {
        let pos = self.position(todo_id)?;
        self.user.todos.get_mut(pos)
    }

    pub(crate) fn push(&mut self, todo: Todo) {
        self.positions.insert(todo.id, self.user.todos.len());
        self.user.todos.push(todo);
    }

    /// Remove exactly one todo, keeping the order of the rest.
    pub(crate) fn remove(&mut self, todo_id: &Uuid) -> Option<Todo> {
        let pos = self.positions.remove(todo_id)?;
        let removed = self.user.todos.remove(pos);
        for (offset, todo) in self.user.todos[pos..].iter().enumerate() {
            self.positions.insert(todo.id, pos + offset);
        }
        Some(removed)
    }
}

fn index_positions(todos: &[Todo]) -> HashMap<Uuid, usize> {
    todos.iter().enumerate().map(|(pos, todo)| (todo.id, pos)).collect()
}
