//! Main CLI application structure

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use super::output::{Output, OutputFormat};
use crate::convert::{build_outline, ConvertOptions, ListIndex, NoteIndex};
use crate::rtm::RtmExport;
use crate::singularity;

#[derive(Parser)]
#[command(name = "rtm2sing")]
#[command(
    author,
    version,
    about = "Converts tasks exported from Remember The Milk to a Singularity-importable CSV"
)]
pub struct Cli {
    /// Path to the Remember The Milk JSON export
    #[arg(long, short = 's')]
    pub source: PathBuf,

    /// Where to write the generated CSV
    #[arg(long, short = 'o', default_value = "output.csv")]
    pub output: PathBuf,

    /// Keep completed tasks instead of dropping them
    #[arg(long)]
    pub preserve_completed: bool,

    /// Output format for the conversion summary
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    if !cli.source.is_file() {
        bail!("File not found: {}", cli.source.display());
    }

    output.verbose_ctx("load", &format!("Reading export: {}", cli.source.display()));
    let export = RtmExport::from_path(&cli.source)?;
    output.verbose_ctx(
        "load",
        &format!(
            "Export carries {} list, {} note and {} task records",
            export.lists.len(),
            export.notes.len(),
            export.tasks.len()
        ),
    );

    let lists = ListIndex::build(&export.lists);
    output.text(&format!("Loaded {} lists", lists.len()));

    let notes = NoteIndex::build(&export.notes);
    output.text(&format!("Loaded {} note series", notes.series_count()));

    let options = ConvertOptions {
        preserve_completed: cli.preserve_completed,
    };
    let outline = build_outline(&export.tasks, lists, &notes, &options)?;
    output.text(&format!("Loaded {} tasks", outline.task_count()));

    let csv = singularity::render(&outline);
    fs::write(&cli.output, &csv)
        .with_context(|| format!("Failed to write CSV: {}", cli.output.display()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "lists": outline.list_count(),
            "note_series": notes.series_count(),
            "tasks": outline.task_count(),
            "rows": outline.row_count(),
            "output": cli.output.display().to_string(),
        }));
    } else {
        output.success(&format!(
            "Wrote {} rows to {}",
            outline.row_count(),
            cli.output.display()
        ));
    }

    output.verbose("Conversion completed successfully");
    Ok(())
}
