//! Transient per-panel state: cursors, in-progress edits and the task search.
//! None of this is part of the store or the exported data.

use crate::model::task::Task;
use crate::ops::filter::TaskFilter;
use crate::ops::store::{Store, StoreError};
use crate::ops::tags::join_tags;

use super::draft::Draft;

// ---------------------------------------------------------------------------
// Group panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEditKind {
    New,
    Rename(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEdit {
    pub kind: GroupEditKind,
    pub draft: Draft,
}

#[derive(Debug, Clone, Default)]
pub struct GroupPanel {
    /// Row under the cursor
    pub cursor: usize,
    pub edit: Option<GroupEdit>,
}

impl GroupPanel {
    pub fn start_new(&mut self) {
        self.edit = Some(GroupEdit {
            kind: GroupEditKind::New,
            draft: Draft::default(),
        });
    }

    /// Begin renaming the group under the cursor, pre-filled with its name
    pub fn start_rename(&mut self, store: &Store) -> bool {
        let Some(group) = store.group(self.cursor) else {
            return false;
        };
        self.edit = Some(GroupEdit {
            kind: GroupEditKind::Rename(self.cursor),
            draft: Draft::new(group.name.clone()),
        });
        true
    }

    pub fn cancel(&mut self) {
        self.edit = None;
    }

    /// Apply the draft. The edit stays open if the store declines it.
    pub fn save(&mut self, store: &mut Store) -> Result<(), StoreError> {
        let Some(edit) = &self.edit else {
            return Ok(());
        };
        match edit.kind {
            GroupEditKind::New => {
                let index = store.add_group(edit.draft.as_str())?;
                self.cursor = index;
            }
            GroupEditKind::Rename(index) => store.rename_group(index, edit.draft.as_str())?,
        }
        self.edit = None;
        Ok(())
    }

    /// Keep cursor and rename target pointing at the same groups after
    /// `index` was removed
    pub fn group_deleted(&mut self, index: usize, remaining: usize) {
        match self.edit.as_ref().map(|e| e.kind) {
            Some(GroupEditKind::Rename(target)) if target == index => self.edit = None,
            Some(GroupEditKind::Rename(target)) if target > index => {
                if let Some(edit) = &mut self.edit {
                    edit.kind = GroupEditKind::Rename(target - 1);
                }
            }
            _ => {}
        }
        self.clamp(remaining);
    }

    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_by(&mut self, delta: isize, len: usize) {
        self.cursor = step(self.cursor, delta, len);
    }
}

// ---------------------------------------------------------------------------
// Task panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEditKind {
    New,
    Edit(usize),
}

/// Which input of a task edit has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Text,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub kind: TaskEditKind,
    pub text: Draft,
    pub tags: Draft,
    pub field: TaskField,
}

impl TaskEdit {
    pub fn focused_mut(&mut self) -> &mut Draft {
        match self.field {
            TaskField::Text => &mut self.text,
            TaskField::Tags => &mut self.tags,
        }
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            TaskField::Text => TaskField::Tags,
            TaskField::Tags => TaskField::Text,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskPanel {
    /// Group the panel state belongs to. When the store's selection moves
    /// away from it, everything else resets.
    pub group: Option<usize>,
    /// Row under the cursor, as an index into the filtered list
    pub cursor: usize,
    pub edit: Option<TaskEdit>,
    pub filter: TaskFilter,
    /// Cursor into the group's distinct tags while the tag picker is open
    pub tag_cursor: usize,
}

impl TaskPanel {
    /// Follow the store's selection. Returns true if the panel was reset.
    pub fn sync(&mut self, selected: Option<usize>) -> bool {
        if self.group == selected {
            return false;
        }
        *self = TaskPanel {
            group: selected,
            ..TaskPanel::default()
        };
        true
    }

    /// Track a deleted group so the panel keeps following the same one
    pub fn group_deleted(&mut self, index: usize) {
        if let Some(group) = self.group
            && group > index
        {
            self.group = Some(group - 1);
        }
    }

    /// Filtered tasks of the panel's group with their store indices
    pub fn visible<'a>(&self, store: &'a Store) -> Vec<(usize, &'a Task)> {
        match self.group {
            Some(group) => store.filter_with(group, &self.filter),
            None => Vec::new(),
        }
    }

    /// Store index of the task under the cursor
    pub fn current_task(&self, store: &Store) -> Option<usize> {
        self.visible(store).get(self.cursor).map(|(i, _)| *i)
    }

    pub fn clamp(&mut self, store: &Store) {
        let len = self.visible(store).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_by(&mut self, delta: isize, store: &Store) {
        let len = self.visible(store).len();
        self.cursor = step(self.cursor, delta, len);
    }

    pub fn start_new(&mut self) -> bool {
        if self.group.is_none() {
            return false;
        }
        self.edit = Some(TaskEdit {
            kind: TaskEditKind::New,
            text: Draft::default(),
            tags: Draft::default(),
            field: TaskField::Text,
        });
        true
    }

    /// Begin editing the task under the cursor, pre-filled with its text and
    /// its tags joined as `a, b`
    pub fn start_edit(&mut self, store: &Store) -> bool {
        let (Some(group), Some(index)) = (self.group, self.current_task(store)) else {
            return false;
        };
        let Some(task) = store.task(group, index) else {
            return false;
        };
        self.edit = Some(TaskEdit {
            kind: TaskEditKind::Edit(index),
            text: Draft::new(task.text.clone()),
            tags: Draft::new(join_tags(&task.tags)),
            field: TaskField::Text,
        });
        true
    }

    pub fn cancel(&mut self) {
        self.edit = None;
    }

    /// Apply the drafts. The edit stays open if the store declines it.
    pub fn save(&mut self, store: &mut Store) -> Result<(), StoreError> {
        let (Some(group), Some(edit)) = (self.group, &self.edit) else {
            return Ok(());
        };
        let text = edit.text.as_str();
        let tags = edit.tags.as_str();
        match edit.kind {
            TaskEditKind::New => {
                let index = store.add_task(group, text, tags)?;
                // Land on the new task if the current filter shows it.
                if let Some(row) = self.visible(store).iter().position(|(i, _)| *i == index) {
                    self.cursor = row;
                }
            }
            TaskEditKind::Edit(index) => store.edit_task(group, index, text, tags)?,
        }
        self.edit = None;
        self.clamp(store);
        Ok(())
    }

    /// Delete the task under the cursor, dropping an edit that targets it
    pub fn delete_current(&mut self, store: &mut Store) -> Result<Option<Task>, StoreError> {
        let (Some(group), Some(index)) = (self.group, self.current_task(store)) else {
            return Ok(None);
        };
        let removed = store.delete_task(group, index)?;
        match self.edit.as_ref().map(|e| e.kind) {
            Some(TaskEditKind::Edit(target)) if target == index => self.edit = None,
            Some(TaskEditKind::Edit(target)) if target > index => {
                if let Some(edit) = &mut self.edit {
                    edit.kind = TaskEditKind::Edit(target - 1);
                }
            }
            _ => {}
        }
        self.clamp(store);
        Ok(Some(removed))
    }

    pub fn toggle_current(&mut self, store: &mut Store) -> Result<Option<bool>, StoreError> {
        let (Some(group), Some(index)) = (self.group, self.current_task(store)) else {
            return Ok(None);
        };
        let completed = store.toggle_complete(group, index)?;
        Ok(Some(completed))
    }

    /// Toggle the tag under the tag-picker cursor as a required filter
    pub fn toggle_tag_filter(&mut self, store: &Store) -> Option<String> {
        let tags = store.distinct_tags(self.group?);
        let tag = tags.get(self.tag_cursor)?.clone();
        self.filter.toggle_tag(&tag);
        self.clamp(store);
        Some(tag)
    }
}

fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}
