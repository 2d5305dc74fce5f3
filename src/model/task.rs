use serde::{Deserialize, Serialize};

/// A single task inside a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display text (trimmed, never empty once accepted by the store)
    pub text: String,
    /// Completion flag. Older exports omit it.
    #[serde(default)]
    pub completed: bool,
    /// Tags in entry order, case-sensitive. Older exports omit them.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Create an open task with the given text and tags
    pub fn new(text: impl Into<String>, tags: Vec<String>) -> Self {
        Task {
            text: text.into(),
            completed: false,
            tags,
        }
    }

    /// Whether this task carries `tag` exactly
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
