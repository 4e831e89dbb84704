//! # Command-Line Interface
//!
//! User-facing argument parsing and output formatting.
//!
//! ## Flags
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `--source` | Path to the RTM JSON export (required) |
//! | `--output` | CSV destination, defaults to `output.csv` |
//! | `--preserve-completed` | Keep completed tasks |
//! | `--format` | `text` (default) or `json` conversion summary |
//! | `--verbose` | Debug output on stderr |
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and run the conversion.

mod app;
mod output;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};
