//! Export-to-outline conversion
//!
//! One linear pass over the export: index the lists, group the notes,
//! then walk the task records filtering trash and completed items,
//! enriching descriptions, resolving due dates, and classifying each
//! survivor as a top-level task or a subtask.

use std::collections::{HashMap, HashSet};

use chrono::{Local, TimeZone};
use thiserror::Error;

use crate::outline::{sanitize_quotes, Outline, Task, TaskList, TaskStatus};
use crate::rtm::{ListRecord, NoteRecord, TaskRecord};

/// Errors that abort a conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Task {task_id} references unknown list '{list_id}'")]
    UnknownList { task_id: String, list_id: String },

    #[error("Task {task_id} has a due date but no date_due_has_time flag")]
    MissingDueFlag { task_id: String },

    #[error("Task {task_id} has an unrepresentable due timestamp: {millis}")]
    InvalidDueTimestamp { task_id: String, millis: i64 },
}

/// Conversion switches, straight from the CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Keep completed tasks instead of dropping them
    pub preserve_completed: bool,
}

/// Ordered id → list mapping
///
/// Lists keep their input order. A record reusing an id overwrites the
/// name at the original position, so the last name wins but the list
/// stays where it first appeared.
#[derive(Debug, Default)]
pub struct ListIndex {
    lists: Vec<TaskList>,
    by_id: HashMap<String, usize>,
}

impl ListIndex {
    /// Builds the index from the export's list records
    pub fn build(records: &[ListRecord]) -> Self {
        let mut index = ListIndex::default();
        for record in records {
            match index.by_id.get(&record.id) {
                Some(&slot) => index.lists[slot].name = record.name.clone(),
                None => {
                    index.by_id.insert(record.id.clone(), index.lists.len());
                    index.lists.push(TaskList {
                        name: record.name.clone(),
                        tasks: Vec::new(),
                    });
                }
            }
        }
        index
    }

    /// Number of distinct lists
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns true if the export carried no lists
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Notes grouped by the task series they attach to
#[derive(Debug, Default)]
pub struct NoteIndex {
    by_series: HashMap<String, Vec<String>>,
}

impl NoteIndex {
    /// Groups note contents by series id, keeping input order
    pub fn build(records: &[NoteRecord]) -> Self {
        let mut index = NoteIndex::default();
        for record in records {
            index
                .by_series
                .entry(record.series_id.clone())
                .or_default()
                .push(record.content.clone());
        }
        index
    }

    /// Number of distinct series that have notes
    pub fn series_count(&self) -> usize {
        self.by_series.len()
    }

    /// Note contents for a series; empty when the series has none
    pub fn for_series(&self, series_id: &str) -> &[String] {
        self.by_series
            .get(series_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Walks the task records and assembles the outline
///
/// Trashed tasks are skipped outright. Completed tasks are skipped
/// unless `preserve_completed` is set. Every surviving record must name
/// a known list. A record with a `parent_id` becomes a subtask of that
/// parent; everything else lands in its list's top-level sequence.
///
/// A subtask whose parent was itself filtered out stays grouped under
/// the missing parent's id and is never rendered. The importer has no
/// way to represent such orphans, so they are dropped silently.
pub fn build_outline(
    records: &[TaskRecord],
    list_index: ListIndex,
    notes: &NoteIndex,
    options: &ConvertOptions,
) -> Result<Outline, ConvertError> {
    let ListIndex { mut lists, by_id } = list_index;
    let mut subtasks: HashMap<String, Vec<Task>> = HashMap::new();
    let mut top_level: HashSet<String> = HashSet::new();

    for record in records {
        if record.is_trashed() {
            continue;
        }

        let mut description_lines = Vec::new();
        if let Some(url) = &record.url {
            description_lines.push(format!("URL: {}", url));
        }
        if !record.tags.is_empty() {
            description_lines.push(format!("Tags: {}", record.tags.join(", ")));
        }
        if let Some(repeat) = &record.repeat {
            description_lines.push(format!("Repeat info: {}", repeat));
        }

        let due = match record.date_due {
            Some(millis) => Some(due_text(&record.id, millis, record.date_due_has_time)?),
            None => None,
        };

        let status = if record.is_completed() {
            if !options.preserve_completed {
                continue;
            }
            TaskStatus::Completed
        } else {
            TaskStatus::Open
        };

        description_lines.extend(notes.for_series(&record.series_id).iter().cloned());

        let task = Task {
            id: record.id.clone(),
            name: sanitize_quotes(&record.name),
            description_lines,
            status,
            due,
        };

        let slot = by_id
            .get(&record.list_id)
            .copied()
            .ok_or_else(|| ConvertError::UnknownList {
                task_id: record.id.clone(),
                list_id: record.list_id.clone(),
            })?;

        match &record.parent_id {
            Some(parent_id) => subtasks.entry(parent_id.clone()).or_default().push(task),
            None => {
                top_level.insert(record.id.clone());
                lists[slot].tasks.push(task);
            }
        }
    }

    Ok(Outline::new(lists, subtasks, top_level.len()))
}

/// Renders the due column text for an epoch-millisecond due value
///
/// The stamp is always formatted at seconds precision so the date-only
/// form can drop the fixed-width `THH:MM:SS` suffix.
fn due_text(task_id: &str, millis: i64, has_time: Option<bool>) -> Result<String, ConvertError> {
    let has_time = has_time.ok_or_else(|| ConvertError::MissingDueFlag {
        task_id: task_id.to_string(),
    })?;

    let due = Local
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ConvertError::InvalidDueTimestamp {
            task_id: task_id.to_string(),
            millis,
        })?;

    let mut text = due.format("%Y-%m-%dT%H:%M:%S").to_string();
    if !has_time {
        text.truncate(text.len() - 9);
    }
    Ok(text)
}
