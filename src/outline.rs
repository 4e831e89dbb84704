//! Converted task model
//!
//! The outline is the in-memory result of a conversion: lists in their
//! input order, each carrying its top-level tasks, plus subtasks grouped
//! under their parent task's id. It is built once by
//! [`crate::convert::build_outline`] and only read after that.

use std::collections::HashMap;

/// Completion state of a converted task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Open,
    Completed,
}

impl TaskStatus {
    /// Returns the status marker Singularity expects: `+` for completed
    pub fn marker(&self) -> &'static str {
        match self {
            TaskStatus::Open => "",
            TaskStatus::Completed => "+",
        }
    }

    /// Returns true if this status represents completion
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

/// A task ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Source task id, used to look up subtasks at render time
    pub id: String,
    /// Display name, already quote-sanitized
    pub name: String,
    /// Description lines: extra data first, then note contents
    pub description_lines: Vec<String>,
    /// Completion state
    pub status: TaskStatus,
    /// Rendered due-date text, when the task has one
    pub due: Option<String>,
}

/// A list and its top-level tasks, both in input order
#[derive(Debug, Clone, PartialEq)]
pub struct TaskList {
    pub name: String,
    pub tasks: Vec<Task>,
}

/// The full converted hierarchy
#[derive(Debug, Clone, Default)]
pub struct Outline {
    lists: Vec<TaskList>,
    subtasks: HashMap<String, Vec<Task>>,
    task_count: usize,
}

impl Outline {
    /// Assembles an outline from its parts
    ///
    /// `task_count` is the number of distinct top-level task ids, which
    /// can differ from the summed sequence lengths when an export reuses
    /// an id.
    pub fn new(
        lists: Vec<TaskList>,
        subtasks: HashMap<String, Vec<Task>>,
        task_count: usize,
    ) -> Self {
        Self {
            lists,
            subtasks,
            task_count,
        }
    }

    /// Lists in input order
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    /// Subtasks of a task, in input order; empty when it has none
    pub fn subtasks_of(&self, task_id: &str) -> &[Task] {
        self.subtasks
            .get(task_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of lists
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Number of distinct top-level tasks
    pub fn task_count(&self) -> usize {
        self.task_count
    }

    /// Number of data rows a render of this outline emits: the root
    /// row, one per list, one per top-level task and one per subtask
    /// reachable through its parent
    pub fn row_count(&self) -> usize {
        let mut rows = 1;
        for list in &self.lists {
            rows += 1;
            for task in &list.tasks {
                rows += 1 + self.subtasks_of(&task.id).len();
            }
        }
        rows
    }
}

/// Replaces double quotes with single quotes so rendered fields never
/// need CSV escaping
pub fn sanitize_quotes(s: &str) -> String {
    s.replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            name: format!("Task {}", id),
            description_lines: Vec::new(),
            status: TaskStatus::Open,
            due: None,
        }
    }

    #[test]
    fn status_markers() {
        assert_eq!(TaskStatus::Open.marker(), "");
        assert_eq!(TaskStatus::Completed.marker(), "+");
        assert!(TaskStatus::Completed.is_completed());
        assert!(!TaskStatus::Open.is_completed());
    }

    #[test]
    fn subtasks_of_unknown_task_is_empty() {
        let outline = Outline::default();
        assert!(outline.subtasks_of("nope").is_empty());
    }

    #[test]
    fn row_count_walks_reachable_rows() {
        let mut subtasks = HashMap::new();
        subtasks.insert("t1".to_string(), vec![task("t1.1"), task("t1.2")]);
        // Orphan group: no top-level task carries this id
        subtasks.insert("gone".to_string(), vec![task("x")]);

        let lists = vec![
            TaskList {
                name: "Work".to_string(),
                tasks: vec![task("t1"), task("t2")],
            },
            TaskList {
                name: "Home".to_string(),
                tasks: Vec::new(),
            },
        ];

        let outline = Outline::new(lists, subtasks, 2);
        // root + 2 lists + 2 tasks + 2 reachable subtasks
        assert_eq!(outline.row_count(), 7);
    }

    #[test]
    fn sanitize_quotes_replaces_every_double_quote() {
        assert_eq!(sanitize_quotes(r#"Say "hi""#), "Say 'hi'");
        assert_eq!(sanitize_quotes("no quotes"), "no quotes");
        assert_eq!(sanitize_quotes(r#""""#), "''");
    }
}
