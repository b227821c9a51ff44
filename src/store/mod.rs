//! In-memory user store.
//!
//! The store is the single source of truth for users and their todos. It is
//! created empty at startup, cloned cheaply as a handle into every handler,
//! and never persisted.
//!
//! # Design Decisions
//! - One `RwLock` guards everything; each operation is a single critical
//!   section, so check-then-mutate sequences cannot interleave
//! - Users are never removed, so positions in `accounts` are stable and the
//!   id/username indexes never need rebuilding
//! - Todo creation re-checks the quota under the write lock

mod account;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::domain::{Deadline, Todo, User};
use crate::error::{ApiError, ApiResult, LookupKey};
use crate::observability::metrics;

use self::account::Account;

/// Lightweight view of a user, without its todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub id: Uuid,
    pub username: String,
    pub pro: bool,
    pub todo_count: usize,
}

/// Aggregate counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub users: usize,
    pub todos: usize,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: Vec<Account>,
    by_id: HashMap<Uuid, usize>,
    by_username: HashMap<String, usize>,
}

impl Inner {
    fn account(&self, user_id: &Uuid) -> ApiResult<&Account> {
        self.by_id
            .get(user_id)
            .map(|&pos| &self.accounts[pos])
            .ok_or(ApiError::UserNotFound(LookupKey::Id))
    }

    fn account_mut(&mut self, user_id: &Uuid) -> ApiResult<&mut Account> {
        match self.by_id.get(user_id) {
            Some(&pos) => Ok(&mut self.accounts[pos]),
            None => Err(ApiError::UserNotFound(LookupKey::Id)),
        }
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            users: self.accounts.len(),
            todos: self.accounts.iter().map(|a| a.user.todos.len()).sum(),
        }
    }
}

/// Shared handle to the store.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Inner>>,
}

impl UserStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new user. Usernames are unique across the store.
    pub fn register(&self, name: String, username: String) -> ApiResult<User> {
        let mut inner = self.write();
        if inner.by_username.contains_key(&username) {
            return Err(ApiError::DuplicateUsername);
        }

        let user = User::new(name, username);
        let pos = inner.accounts.len();
        inner.by_id.insert(user.id, pos);
        inner.by_username.insert(user.username.clone(), pos);
        inner.accounts.push(Account::new(user.clone()));

        metrics::record_store_size(inner.stats());
        tracing::debug!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub fn user(&self, user_id: &Uuid) -> ApiResult<User> {
        self.read().account(user_id).map(|a| a.user.clone())
    }

    pub fn snapshot_by_id(&self, user_id: &Uuid) -> ApiResult<AccountSnapshot> {
        self.read().account(user_id).map(snapshot)
    }

    pub fn snapshot_by_username(&self, username: &str) -> ApiResult<AccountSnapshot> {
        let inner = self.read();
        inner
            .by_username
            .get(username)
            .map(|&pos| snapshot(&inner.accounts[pos]))
            .ok_or(ApiError::UserNotFound(LookupKey::Username))
    }

    /// Activate the pro plan. There is no way back.
    pub fn upgrade_to_pro(&self, user_id: &Uuid) -> ApiResult<User> {
        let mut inner = self.write();
        let account = inner.account_mut(user_id)?;
        if account.user.pro {
            return Err(ApiError::AlreadyPro);
        }
        account.user.pro = true;
        tracing::info!(user_id = %user_id, "Pro plan activated");
        Ok(account.user.clone())
    }

    /// All todos of a user, in insertion order.
    pub fn todos(&self, user_id: &Uuid) -> ApiResult<Vec<Todo>> {
        self.read().account(user_id).map(|a| a.user.todos.clone())
    }

    /// Append a todo unless a free account already holds `free_limit` of them.
    pub fn create_todo(
        &self,
        user_id: &Uuid,
        title: String,
        deadline: Deadline,
        free_limit: usize,
    ) -> ApiResult<Todo> {
        let mut inner = self.write();
        let account = inner.account_mut(user_id)?;
        if !account.user.can_add_todo(free_limit) {
            return Err(ApiError::QuotaExceeded);
        }

        let todo = Todo::new(title, deadline);
        account.push(todo.clone());

        metrics::record_store_size(inner.stats());
        tracing::debug!(user_id = %user_id, todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    pub fn todo(&self, user_id: &Uuid, todo_id: &Uuid) -> ApiResult<Todo> {
        self.read()
            .account(user_id)?
            .todo(todo_id)
            .cloned()
            .ok_or(ApiError::TodoNotFound)
    }

    pub fn update_todo(
        &self,
        user_id: &Uuid,
        todo_id: &Uuid,
        title: String,
        deadline: Deadline,
    ) -> ApiResult<Todo> {
        self.with_todo_mut(user_id, todo_id, |todo| todo.revise(title, deadline))
    }

    pub fn complete_todo(&self, user_id: &Uuid, todo_id: &Uuid) -> ApiResult<Todo> {
        self.with_todo_mut(user_id, todo_id, Todo::mark_done)
    }

    /// Remove exactly one todo. Fails if it is no longer in the user's list.
    pub fn delete_todo(&self, user_id: &Uuid, todo_id: &Uuid) -> ApiResult<Todo> {
        let mut inner = self.write();
        let removed = inner
            .account_mut(user_id)?
            .remove(todo_id)
            .ok_or(ApiError::TodoNotFound)?;

        metrics::record_store_size(inner.stats());
        tracing::debug!(user_id = %user_id, todo_id = %todo_id, "Todo deleted");
        Ok(removed)
    }

    pub fn stats(&self) -> StoreStats {
        self.read().stats()
    }

    fn with_todo_mut<F>(&self, user_id: &Uuid, todo_id: &Uuid, f: F) -> ApiResult<Todo>
    where
        F: FnOnce(&mut Todo),
    {
        let mut inner = self.write();
        let todo = inner
            .account_mut(user_id)?
            .todo_mut(todo_id)
            .ok_or(ApiError::TodoNotFound)?;
        f(todo);
        Ok(todo.clone())
    }
}

fn snapshot(account: &Account) -> AccountSnapshot {
    AccountSnapshot {
        id: account.user.id,
        username: account.user.username.clone(),
        pro: account.user.pro,
        todo_count: account.user.todos.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 10;

    fn deadline() -> Deadline {
        Deadline::at(chrono::Utc::now())
    }

    #[test]
    fn test_register_and_lookup() {
        let store = UserStore::new();
        let user = store.register("A".into(), "a".into()).unwrap();

        assert_eq!(store.user(&user.id).unwrap(), user);
        let snap = store.snapshot_by_username("a").unwrap();
        assert_eq!(snap.id, user.id);
        assert!(!snap.pro);
        assert_eq!(snap.todo_count, 0);

        assert!(matches!(
            store.snapshot_by_username("b"),
            Err(ApiError::UserNotFound(LookupKey::Username))
        ));
        assert!(matches!(
            store.user(&Uuid::new_v4()),
            Err(ApiError::UserNotFound(LookupKey::Id))
        ));
    }

    #[test]
    fn test_duplicate_username_does_not_mutate() {
        let store = UserStore::new();
        let first = store.register("A".into(), "a".into()).unwrap();

        assert!(matches!(
            store.register("A2".into(), "a".into()),
            Err(ApiError::DuplicateUsername)
        ));
        assert_eq!(store.stats().users, 1);
        assert_eq!(store.snapshot_by_username("a").unwrap().id, first.id);
    }

    #[test]
    fn test_upgrade_only_once() {
        let store = UserStore::new();
        let user = store.register("A".into(), "a".into()).unwrap();

        assert!(store.upgrade_to_pro(&user.id).unwrap().pro);
        assert!(matches!(store.upgrade_to_pro(&user.id), Err(ApiError::AlreadyPro)));
        assert!(store.user(&user.id).unwrap().pro);
    }

    #[test]
    fn test_quota_enforced_for_free_users() {
        let store = UserStore::new();
        let user = store.register("A".into(), "a".into()).unwrap();

        for i in 0..LIMIT {
            store.create_todo(&user.id, format!("t{i}"), deadline(), LIMIT).unwrap();
        }
        assert!(matches!(
            store.create_todo(&user.id, "overflow".into(), deadline(), LIMIT),
            Err(ApiError::QuotaExceeded)
        ));
        assert_eq!(store.todos(&user.id).unwrap().len(), LIMIT);

        store.upgrade_to_pro(&user.id).unwrap();
        store.create_todo(&user.id, "overflow".into(), deadline(), LIMIT).unwrap();
        assert_eq!(store.todos(&user.id).unwrap().len(), LIMIT + 1);
    }

    #[test]
    fn test_todos_keep_insertion_order() {
        let store = UserStore::new();
        let user = store.register("A".into(), "a".into()).unwrap();
        for title in ["first", "second", "third"] {
            store.create_todo(&user.id, title.into(), deadline(), LIMIT).unwrap();
        }

        let titles: Vec<_> = store.todos(&user.id).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
        assert_eq!(store.user(&user.id).unwrap().todos.len(), 3);
    }

    #[test]
    fn test_todo_scoped_to_owner() {
        let store = UserStore::new();
        let alice = store.register("Alice".into(), "alice".into()).unwrap();
        let bob = store.register("Bob".into(), "bob".into()).unwrap();
        let todo = store.create_todo(&alice.id, "mine".into(), deadline(), LIMIT).unwrap();

        assert_eq!(store.todo(&alice.id, &todo.id).unwrap().id, todo.id);
        assert!(matches!(store.todo(&bob.id, &todo.id), Err(ApiError::TodoNotFound)));
        assert!(matches!(
            store.complete_todo(&bob.id, &todo.id),
            Err(ApiError::TodoNotFound)
        ));
    }

    #[test]
    fn test_update_and_complete() {
        let store = UserStore::new();
        let user = store.register("A".into(), "a".into()).unwrap();
        let todo = store.create_todo(&user.id, "old".into(), deadline(), LIMIT).unwrap();

        let updated = store
            .update_todo(&user.id, &todo.id, "new".into(), Deadline::invalid())
            .unwrap();
        assert_eq!(updated.title, "new");
        assert!(!updated.deadline.is_valid());
        assert_eq!(updated.created_at, todo.created_at);
        assert!(!updated.done);

        assert!(store.complete_todo(&user.id, &todo.id).unwrap().done);
        assert!(store.complete_todo(&user.id, &todo.id).unwrap().done);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let store = UserStore::new();
        let user = store.register("A".into(), "a".into()).unwrap();
        let keep = store.create_todo(&user.id, "keep".into(), deadline(), LIMIT).unwrap();
        let gone = store.create_todo(&user.id, "gone".into(), deadline(), LIMIT).unwrap();
        let tail = store.create_todo(&user.id, "tail".into(), deadline(), LIMIT).unwrap();

        store.delete_todo(&user.id, &gone.id).unwrap();

        let ids: Vec<_> = store.todos(&user.id).unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, [keep.id, tail.id]);
        assert!(matches!(store.todo(&user.id, &gone.id), Err(ApiError::TodoNotFound)));
        assert!(matches!(store.delete_todo(&user.id, &gone.id), Err(ApiError::TodoNotFound)));
        // positions shifted correctly
        assert_eq!(store.complete_todo(&user.id, &tail.id).unwrap().title, "tail");
        assert_eq!(store.stats(), StoreStats { users: 1, todos: 2 });
    }

    #[test]
    fn test_concurrent_creation_respects_quota() {
        let store = UserStore::new();
        let user = store.register("A".into(), "a".into()).unwrap();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                let id = user.id;
                std::thread::spawn(move || store.create_todo(&id, format!("t{i}"), deadline(), LIMIT).is_ok())
            })
            .collect();
        let created = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();

        assert_eq!(created, LIMIT);
        assert_eq!(store.todos(&user.id).unwrap().len(), LIMIT);
    }
}
