use indexmap::IndexSet;

use crate::model::task::Task;

/// Search query plus required tags, as applied to one group's task list.
///
/// A task passes when `(text contains query OR some tag contains query)`
/// and it carries every required tag. The query is trimmed and compared
/// case-insensitively as a substring; required tags must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub query: String,
    pub tags: IndexSet<String>,
}

impl TaskFilter {
    pub fn new<I, S>(query: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TaskFilter {
            query: query.to_string(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the filter lets every task through
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.tags.is_empty()
    }

    /// Add `tag` to the required set, or remove it if already present.
    /// Returns whether the tag is required afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.tags.shift_remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.tags.clear();
    }

    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.query.trim().to_lowercase();
        query_matches(task, &needle) && self.tags.iter().all(|tag| task.has_tag(tag))
    }
}

/// `needle` must already be lowercased. An empty needle matches everything.
fn query_matches(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    task.text.to_lowercase().contains(needle)
        || task.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Tasks passing `filter`, in their original order, each paired with its
/// index in `tasks`.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<(usize, &'a Task)> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task))
        .collect()
}

/// Unique tags across `tasks`, in order of first appearance
pub fn distinct_tags_of<'a, I>(tasks: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut seen: IndexSet<&str> = IndexSet::new();
    for task in tasks {
        for tag in &task.tags {
            seen.insert(tag.as_str());
        }
    }
    seen.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(text: &str, tags: &[&str]) -> Task {
        Task::new(text, tags.iter().map(|t| t.to_string()).collect())
    }

    fn sample() -> Vec<Task> {
        vec![
            task("Buy milk", &["errand"]),
            task("Wash car", &["chore", "outside"]),
            task("Mow lawn", &["chore", "outside", "weekend"]),
            task("Call plumber", &[]),
        ]
    }

    fn texts(hits: &[(usize, &Task)]) -> Vec<String> {
        hits.iter().map(|(_, t)| t.text.clone()).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::default());
        assert_eq!(hits.len(), tasks.len());
        let indices: Vec<usize> = hits.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn query_matches_text_case_insensitively() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::new("MILK", Vec::<String>::new()));
        assert_eq!(texts(&hits), vec!["Buy milk"]);
    }

    #[test]
    fn query_matches_tag_substring() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::new("week", Vec::<String>::new()));
        assert_eq!(texts(&hits), vec!["Mow lawn"]);
    }

    #[test]
    fn query_is_trimmed() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::new("  car ", Vec::<String>::new()));
        assert_eq!(texts(&hits), vec!["Wash car"]);
        assert!(TaskFilter::new("   ", Vec::<String>::new()).is_empty());
    }

    #[test]
    fn tag_filters_require_every_tag() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::new("", ["chore", "weekend"]));
        assert_eq!(texts(&hits), vec!["Mow lawn"]);
    }

    #[test]
    fn tag_filters_are_case_sensitive() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::new("", ["Chore"]));
        assert!(hits.is_empty());
    }

    #[test]
    fn query_and_tag_filters_combine() {
        let tasks = sample();
        // "wash" hits the text of one chore; "outside" alone would hit two.
        let hits = filter_tasks(&tasks, &TaskFilter::new("wash", ["outside"]));
        assert_eq!(texts(&hits), vec!["Wash car"]);
        // A query matching only through a tag still needs the required tags.
        let hits = filter_tasks(&tasks, &TaskFilter::new("errand", ["chore"]));
        assert!(hits.is_empty());
    }

    #[test]
    fn hits_keep_original_indices() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::new("", ["outside"]));
        let indices: Vec<usize> = hits.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn toggle_tag_adds_then_removes() {
        let mut filter = TaskFilter::default();
        assert!(filter.toggle_tag("chore"));
        assert!(filter.toggle_tag("outside"));
        assert!(!filter.toggle_tag("chore"));
        assert_eq!(filter.tags.iter().collect::<Vec<_>>(), vec!["outside"]);
        filter.clear();
        assert!(filter.is_empty());
    }

    #[test]
    fn distinct_tags_in_first_appearance_order() {
        let tasks = sample();
        assert_eq!(
            distinct_tags_of(&tasks),
            vec!["errand", "chore", "outside", "weekend"]
        );
    }

    #[test]
    fn distinct_tags_over_filtered_list() {
        let tasks = sample();
        let hits = filter_tasks(&tasks, &TaskFilter::new("lawn", Vec::<String>::new()));
        let tags = distinct_tags_of(hits.iter().map(|(_, t)| *t));
        assert_eq!(tags, vec!["chore", "outside", "weekend"]);
    }
}
