use tracing::debug;

use crate::io::interchange::{self, InterchangeError};
use crate::model::group::TaskGroup;
use crate::model::task::Task;
use crate::ops::filter::{self, TaskFilter};
use crate::ops::tags::parse_tags;

/// Why a store operation declined. The store is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("group name cannot be empty")]
    EmptyName,
    #[error("task text cannot be empty")]
    EmptyText,
    #[error("no group at index {0}")]
    GroupOutOfRange(usize),
    #[error("no task at index {task} in group {group}")]
    TaskOutOfRange { group: usize, task: usize },
}

/// The single source of truth for groups, tasks and the group selection.
///
/// Every mutation either applies completely or returns a [`StoreError`]
/// without touching anything, so callers racing a delete against a stale
/// index get a no-op rather than a panic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    groups: Vec<TaskGroup>,
    selected: Option<usize>,
    dirty: bool,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// A clean store holding `groups` with nothing selected
    pub fn from_groups(groups: Vec<TaskGroup>) -> Self {
        Store {
            groups,
            selected: None,
            dirty: false,
        }
    }

    pub fn groups(&self) -> &[TaskGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&TaskGroup> {
        self.groups.get(index)
    }

    pub fn task(&self, group: usize, task: usize) -> Option<&Task> {
        self.groups.get(group)?.tasks.get(task)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_group(&self) -> Option<&TaskGroup> {
        self.groups.get(self.selected?)
    }

    /// Whether anything changed since the last import or export
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    /// Append a new empty group. Returns its index.
    pub fn add_group(&mut self, name: &str) -> Result<usize, StoreError> {
        let name = accept_name(name)?;
        self.groups.push(TaskGroup::new(name));
        self.dirty = true;
        let index = self.groups.len() - 1;
        debug!(index, "group added");
        Ok(index)
    }

    pub fn rename_group(&mut self, index: usize, name: &str) -> Result<(), StoreError> {
        self.check_group(index)?;
        let name = accept_name(name)?;
        self.groups[index].name = name;
        self.dirty = true;
        debug!(index, "group renamed");
        Ok(())
    }

    /// Remove a group with all its tasks, keeping the selection on the same
    /// logical group (or clearing it if that group is the one removed).
    pub fn delete_group(&mut self, index: usize) -> Result<TaskGroup, StoreError> {
        self.check_group(index)?;
        let removed = self.groups.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        self.dirty = true;
        debug!(index, tasks = removed.tasks.len(), "group deleted");
        Ok(removed)
    }

    /// Select a group. An invalid index leaves the current selection alone.
    pub fn select_group(&mut self, index: usize) -> Result<(), StoreError> {
        self.check_group(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Append an open task. `tags` is comma-separated entry text.
    /// Returns the new task's index within the group.
    pub fn add_task(&mut self, group: usize, text: &str, tags: &str) -> Result<usize, StoreError> {
        self.check_group(group)?;
        let text = accept_text(text)?;
        let tasks = &mut self.groups[group].tasks;
        tasks.push(Task::new(text, parse_tags(tags)));
        self.dirty = true;
        let index = tasks.len() - 1;
        debug!(group, task = index, "task added");
        Ok(index)
    }

    /// Replace a task's text and tags; its completion state is kept.
    pub fn edit_task(
        &mut self,
        group: usize,
        task: usize,
        text: &str,
        tags: &str,
    ) -> Result<(), StoreError> {
        self.check_task(group, task)?;
        let text = accept_text(text)?;
        let target = &mut self.groups[group].tasks[task];
        target.text = text;
        target.tags = parse_tags(tags);
        self.dirty = true;
        debug!(group, task, "task edited");
        Ok(())
    }

    /// Replace a task's text only. Tags are kept exactly as stored.
    pub fn edit_task_text(
        &mut self,
        group: usize,
        task: usize,
        text: &str,
    ) -> Result<(), StoreError> {
        self.check_task(group, task)?;
        let text = accept_text(text)?;
        self.groups[group].tasks[task].text = text;
        self.dirty = true;
        debug!(group, task, "task text edited");
        Ok(())
    }

    pub fn delete_task(&mut self, group: usize, task: usize) -> Result<Task, StoreError> {
        self.check_task(group, task)?;
        let removed = self.groups[group].tasks.remove(task);
        self.dirty = true;
        debug!(group, task, "task deleted");
        Ok(removed)
    }

    /// Flip a task's completion flag. Returns the new value.
    pub fn toggle_complete(&mut self, group: usize, task: usize) -> Result<bool, StoreError> {
        self.check_task(group, task)?;
        let target = &mut self.groups[group].tasks[task];
        target.completed = !target.completed;
        self.dirty = true;
        debug!(group, task, completed = target.completed, "task toggled");
        Ok(target.completed)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Tasks of `group` passing the query and tag filters, with their
    /// indices. An unknown group yields nothing.
    pub fn filter_tasks(
        &self,
        group: usize,
        query: &str,
        tag_filters: &[String],
    ) -> Vec<(usize, &Task)> {
        let filter = TaskFilter::new(query, tag_filters.iter().cloned());
        self.filter_with(group, &filter)
    }

    pub fn filter_with(&self, group: usize, filter: &TaskFilter) -> Vec<(usize, &Task)> {
        match self.groups.get(group) {
            Some(g) => filter::filter_tasks(&g.tasks, filter),
            None => Vec::new(),
        }
    }

    /// Unique tags used in `group`, in order of first appearance
    pub fn distinct_tags(&self, group: usize) -> Vec<String> {
        match self.groups.get(group) {
            Some(g) => filter::distinct_tags_of(&g.tasks),
            None => Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Import / export
    // -----------------------------------------------------------------------

    /// Swap in a whole new group list and drop the selection
    pub fn replace_groups(&mut self, groups: Vec<TaskGroup>) {
        self.groups = groups;
        self.selected = None;
        self.dirty = false;
    }

    /// Parse interchange text and, only if it is well-formed, replace all
    /// groups with it. Returns the number of groups loaded.
    pub fn import_str(&mut self, text: &str) -> Result<usize, InterchangeError> {
        let groups = interchange::import_groups(text)?;
        let count = groups.len();
        self.replace_groups(groups);
        Ok(count)
    }

    pub fn export_string(&self) -> Result<String, InterchangeError> {
        interchange::export_groups(&self.groups)
    }

    // -----------------------------------------------------------------------
    // Bounds
    // -----------------------------------------------------------------------

    fn check_group(&self, group: usize) -> Result<(), StoreError> {
        if group < self.groups.len() {
            Ok(())
        } else {
            Err(StoreError::GroupOutOfRange(group))
        }
    }

    fn check_task(&self, group: usize, task: usize) -> Result<(), StoreError> {
        self.check_group(group)?;
        if task < self.groups[group].tasks.len() {
            Ok(())
        } else {
            Err(StoreError::TaskOutOfRange { group, task })
        }
    }
}

fn accept_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(name.to_string())
}

fn accept_text(text: &str) -> Result<String, StoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StoreError::EmptyText);
    }
    Ok(text.to_string())
}
