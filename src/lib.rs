//! rtm2sing - Converts Remember The Milk exports to Singularity CSV
//!
//! The converter makes one linear pass: load the JSON export, index the
//! lists, group the notes, filter and enrich the tasks, then render the
//! outline-numbered CSV that Singularity imports.

pub mod cli;
pub mod convert;
pub mod outline;
pub mod rtm;
pub mod singularity;

pub use outline::{Outline, Task, TaskList, TaskStatus};
