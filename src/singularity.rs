//! Singularity CSV rendering
//!
//! Renders an [`Outline`] into the flat outline-numbered CSV that
//! Singularity imports. Rows are `\n`-terminated. Only the Name and
//! Description fields of Task rows are quoted; double quotes inside
//! them were already converted to single quotes, so the writer never
//! has to escape anything. Descriptions may span multiple lines inside
//! one quoted field.

use crate::outline::{sanitize_quotes, Outline, Task};

/// Column header row
const HEADER: &str = "Id,Type,Name,Description,Priority,Status,Date,Deadline";

/// Name of the fixed root project row
const ROOT_NAME: &str = "Remember The Milk";

/// Renders the outline as CSV text
///
/// The root row is `1`; lists number `1.<i>`, their top-level tasks
/// `1.<i>.<j>`, and subtasks `1.<i>.<j>.<k>`, all 1-based in input
/// order. List rows carry the name bare; Priority and Deadline stay
/// empty on every row.
pub fn render(outline: &Outline) -> String {
    let mut csv = String::new();
    csv.push_str(HEADER);
    csv.push('\n');
    csv.push_str(&format!("1,Project,{},,,,,\n", ROOT_NAME));

    for (i, list) in outline.lists().iter().enumerate() {
        let list_id = format!("1.{}", i + 1);
        csv.push_str(&format!("{},Project,{},,,,,\n", list_id, list.name));

        for (j, task) in list.tasks.iter().enumerate() {
            let task_id = format!("{}.{}", list_id, j + 1);
            push_task_row(&mut csv, &task_id, task);

            for (k, subtask) in outline.subtasks_of(&task.id).iter().enumerate() {
                let subtask_id = format!("{}.{}", task_id, k + 1);
                push_task_row(&mut csv, &subtask_id, subtask);
            }
        }
    }

    csv
}

/// Appends one Task row
///
/// The name was sanitized when the task was built; description lines
/// are sanitized here as they are joined.
fn push_task_row(csv: &mut String, id: &str, task: &Task) {
    let description = task
        .description_lines
        .iter()
        .map(|line| sanitize_quotes(line))
        .collect::<Vec<_>>()
        .join("\n");

    csv.push_str(&format!(
        "{},Task,\"{}\",\"{}\",,{},{},\n",
        id,
        task.name,
        description,
        task.status.marker(),
        task.due.as_deref().unwrap_or(""),
    ));
}
