use serde::Serialize;

use crate::model::{Task, TaskGroup};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct GroupJson {
    pub index: usize,
    pub name: String,
    pub tasks: usize,
    pub completed: usize,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub index: usize,
    pub text: String,
    pub completed: bool,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub group: String,
    pub tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn group_to_json(index: usize, group: &TaskGroup) -> GroupJson {
    GroupJson {
        index,
        name: group.name.clone(),
        tasks: group.tasks.len(),
        completed: group.completed_count(),
    }
}

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        index,
        text: task.text.clone(),
        completed: task.completed,
        tags: task.tags.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// `0  Home (1/3)`
pub fn format_group_line(index: usize, group: &TaskGroup) -> String {
    format!(
        "{}  {} ({}/{})",
        index,
        group.name,
        group.completed_count(),
        group.tasks.len()
    )
}

/// `1  [x] Wash car #chore #outside`
pub fn format_task_line(index: usize, task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let tags_str = if task.tags.is_empty() {
        String::new()
    } else {
        format!(
            " {}",
            task.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ")
        )
    };
    format!("{}  [{}] {}{}", index, check, task.text, tags_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn task_line_with_tags() {
        let mut task = Task::new("Wash car", vec!["chore".into(), "outside".into()]);
        assert_eq!(format_task_line(1, &task), "1  [ ] Wash car #chore #outside");
        task.completed = true;
        task.tags.clear();
        assert_eq!(format_task_line(1, &task), "1  [x] Wash car");
    }

    #[test]
    fn group_line_counts() {
        let mut group = TaskGroup::new("Home");
        group.tasks.push(Task::new("Buy milk", vec![]));
        assert_eq!(format_group_line(0, &group), "0  Home (0/1)");
    }

    #[test]
    fn task_json_shape() {
        let task = Task::new("Buy milk", vec!["errand".into()]);
        let json = serde_json::to_string(&task_to_json(0, &task)).unwrap();
        assert_eq!(
            json,
            r#"{"index":0,"text":"Buy milk","completed":false,"tags":["errand"]}"#
        );
    }
}
