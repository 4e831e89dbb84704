//! Remember The Milk export schema
//!
//! An RTM export is a single JSON document with three top-level arrays:
//! `lists`, `notes`, and `tasks`. The records are modeled with explicit
//! optional fields so every presence check is typed rather than probed
//! out of a generic value.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// A complete Remember The Milk JSON export
#[derive(Debug, Clone, Deserialize)]
pub struct RtmExport {
    pub lists: Vec<ListRecord>,
    pub notes: Vec<NoteRecord>,
    pub tasks: Vec<TaskRecord>,
}

impl RtmExport {
    /// Loads and parses an export file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read export: {}", path.display()))?;
        let export = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse export: {}", path.display()))?;
        Ok(export)
    }
}

/// A task list as exported by RTM
#[derive(Debug, Clone, Deserialize)]
pub struct ListRecord {
    pub id: String,
    pub name: String,
}

/// A note attached to a task series
#[derive(Debug, Clone, Deserialize)]
pub struct NoteRecord {
    pub series_id: String,
    pub content: String,
}

/// A task as exported by RTM
///
/// `date_completed` and `date_trashed` carry timestamps in the export,
/// but only the key's presence matters here, so any value (including
/// `null`) counts as set.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub series_id: String,
    pub list_id: String,

    pub url: Option<String>,
    pub repeat: Option<String>,

    /// Due instant in epoch milliseconds
    pub date_due: Option<i64>,

    /// Whether the due instant carries a meaningful time of day.
    /// Must accompany `date_due`; the converter rejects one without
    /// the other.
    pub date_due_has_time: Option<bool>,

    #[serde(default, deserialize_with = "presence")]
    pub date_completed: Option<serde_json::Value>,

    #[serde(default, deserialize_with = "presence")]
    pub date_trashed: Option<serde_json::Value>,

    pub parent_id: Option<String>,
}

impl TaskRecord {
    /// Returns true if the task was completed
    pub fn is_completed(&self) -> bool {
        self.date_completed.is_some()
    }

    /// Returns true if the task was moved to the trash
    pub fn is_trashed(&self) -> bool {
        self.date_trashed.is_some()
    }
}

/// Deserializes a presence-only field: the key being there is the
/// signal, whatever its value
fn presence<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_task(json: &str) -> TaskRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_complete_export() {
        let json = r#"{
            "lists": [{"id": "l1", "name": "Work"}],
            "notes": [{"series_id": "s1", "content": "note text"}],
            "tasks": [{
                "id": "t1",
                "name": "Say hi",
                "tags": ["a", "b"],
                "series_id": "s1",
                "list_id": "l1",
                "url": "https://example.com",
                "repeat": "FREQ=WEEKLY",
                "date_due": 1655737659000,
                "date_due_has_time": true,
                "date_completed": 1655737659322,
                "parent_id": "t0"
            }]
        }"#;

        let export: RtmExport = serde_json::from_str(json).unwrap();
        assert_eq!(export.lists.len(), 1);
        assert_eq!(export.lists[0].name, "Work");
        assert_eq!(export.notes[0].series_id, "s1");

        let task = &export.tasks[0];
        assert_eq!(task.tags, vec!["a", "b"]);
        assert_eq!(task.url.as_deref(), Some("https://example.com"));
        assert_eq!(task.date_due, Some(1655737659000));
        assert_eq!(task.date_due_has_time, Some(true));
        assert_eq!(task.parent_id.as_deref(), Some("t0"));
        assert!(task.is_completed());
        assert!(!task.is_trashed());
    }

    #[test]
    fn optional_task_fields_default_to_absent() {
        let task = parse_task(
            r#"{"id": "t1", "name": "n", "tags": [], "series_id": "s1", "list_id": "l1"}"#,
        );

        assert!(task.url.is_none());
        assert!(task.repeat.is_none());
        assert!(task.date_due.is_none());
        assert!(task.date_due_has_time.is_none());
        assert!(task.parent_id.is_none());
        assert!(!task.is_completed());
        assert!(!task.is_trashed());
    }

    #[test]
    fn marker_with_null_value_counts_as_present() {
        let task = parse_task(
            r#"{"id": "t1", "name": "n", "tags": [], "series_id": "s1", "list_id": "l1",
                "date_trashed": null}"#,
        );

        assert!(task.is_trashed());
    }

    #[test]
    fn marker_with_timestamp_counts_as_present() {
        let task = parse_task(
            r#"{"id": "t1", "name": "n", "tags": [], "series_id": "s1", "list_id": "l1",
                "date_completed": 1655737659322}"#,
        );

        assert!(task.is_completed());
    }

    #[test]
    fn missing_required_task_field_is_an_error() {
        // No tags array
        let result: Result<TaskRecord, _> =
            serde_json::from_str(r#"{"id": "t1", "name": "n", "series_id": "s1", "list_id": "l1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_top_level_key_is_an_error() {
        let result: Result<RtmExport, _> =
            serde_json::from_str(r#"{"lists": [], "notes": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let task = parse_task(
            r#"{"id": "t1", "name": "n", "tags": [], "series_id": "s1", "list_id": "l1",
                "priority": "P1", "date_created": 1600000000000}"#,
        );

        assert_eq!(task.id, "t1");
    }

    #[test]
    fn from_path_reads_a_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, r#"{"lists": [], "notes": [], "tasks": []}"#).unwrap();

        let export = RtmExport::from_path(&path).unwrap();
        assert!(export.lists.is_empty());
        assert!(export.tasks.is_empty());
    }

    #[test]
    fn from_path_fails_on_malformed_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, "{not json").unwrap();

        let result = RtmExport::from_path(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
