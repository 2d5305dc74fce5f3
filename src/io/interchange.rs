//! The JSON interchange format for a whole group list.
//!
//! ```json
//! [
//!   { "name": "Home", "tasks": [
//!       { "text": "Buy milk", "completed": false, "tags": ["errand"] }
//!   ] }
//! ]
//! ```
//!
//! Tasks written before tagging existed carry no `tags` (and the earliest ones
//! no `completed`); both default on read. Writing always emits every field.

use crate::model::group::TaskGroup;

/// File name offered for exports when nothing else is configured
pub const DEFAULT_EXPORT_NAME: &str = "taskGroups.json";

#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    #[error("invalid task data: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid task data: group {group} has a blank name")]
    BlankName { group: usize },
    #[error("invalid task data: task {task} in group {group} has blank text")]
    BlankText { group: usize, task: usize },
    #[error("could not serialize task data: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Serialize groups as pretty-printed JSON (two-space indent, trailing newline)
pub fn export_groups(groups: &[TaskGroup]) -> Result<String, InterchangeError> {
    let mut text = serde_json::to_string_pretty(groups).map_err(InterchangeError::Serialize)?;
    text.push('\n');
    Ok(text)
}

/// Parse interchange text. Anything other than an array of groups fails,
/// as does a blank group name or task text.
pub fn import_groups(text: &str) -> Result<Vec<TaskGroup>, InterchangeError> {
    let groups: Vec<TaskGroup> = serde_json::from_str(text).map_err(InterchangeError::Parse)?;
    for (gi, group) in groups.iter().enumerate() {
        if group.name.trim().is_empty() {
            return Err(InterchangeError::BlankName { group: gi });
        }
        if let Some(ti) = group.tasks.iter().position(|t| t.text.trim().is_empty()) {
            return Err(InterchangeError::BlankText { group: gi, task: ti });
        }
    }
    Ok(groups)
}
