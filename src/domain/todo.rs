use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::deadline::{timestamp, Deadline};
use super::ids::new_id;

/// A single to-do item. Owned by exactly one user for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub deadline: Deadline,
    pub done: bool,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: String, deadline: Deadline) -> Self {
        Self {
            id: new_id(),
            title,
            deadline,
            done: false,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields. Identity, completion and creation time are kept.
    pub fn revise(&mut self, title: String, deadline: Deadline) {
        self.title = title;
        self.deadline = deadline;
    }

    /// Idempotent: marking a finished todo again changes nothing.
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
