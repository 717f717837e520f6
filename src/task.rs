//! Task data structure and identifier.
//!
//! A `Task` is a single line of text with two flags: `checked` marks it as
//! completed and `removed` places it in the trash. Everything else about a
//! task's lifecycle lives in [`crate::store::TaskStore`].

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Opaque task identifier, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(raw: u64) -> Self {
        TaskId(raw)
    }

    /// Raw numeric value, for display and logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub checked: bool,
    pub removed: bool,
    pub created_at: DateTime<Local>,
}

impl Task {
    /// Create an unchecked, not removed task.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            checked: false,
            removed: false,
            created_at: Local::now(),
        }
    }

    /// Whether the UI lets the user change the text.
    pub fn is_editable(&self) -> bool {
        !self.checked && !self.removed
    }

    /// Label of the per-task action button.
    pub fn action_label(&self) -> &'static str {
        if self.removed {
            "restore"
        } else {
            "delete"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_active_and_editable() {
        let task = Task::new(TaskId::new(7), "buy milk");
        assert_eq!(task.id.get(), 7);
        assert_eq!(task.text, "buy milk");
        assert!(!task.checked);
        assert!(!task.removed);
        assert!(task.is_editable());
        assert_eq!(task.action_label(), "delete");
    }

    #[test]
    fn test_checked_or_removed_task_is_not_editable() {
        let mut task = Task::new(TaskId::new(1), "x");
        task.checked = true;
        assert!(!task.is_editable());

        task.checked = false;
        task.removed = true;
        assert!(!task.is_editable());
        assert_eq!(task.action_label(), "restore");
    }

    #[test]
    fn test_task_id_serializes_as_number() {
        let json = serde_json::to_string(&TaskId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
