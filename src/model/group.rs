use serde::{Deserialize, Serialize};

use super::task::Task;

/// A named, ordered collection of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    /// Display name (trimmed, never empty once accepted by the store; not unique)
    pub name: String,
    /// Tasks in display order. The group owns them exclusively.
    pub tasks: Vec<Task>,
}

impl TaskGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        TaskGroup {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Number of completed tasks in this group
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
