//! Command execution: read tasks, merge, write tasks.

use std::fs;
use std::path::Path;

use tracing::info;

use super::parser::Cli;
use crate::error::{Error, Result};
use crate::merge::{merge_tasks, MergeOptions};
use crate::task::Task;

/// Run the merge over one input file.
///
/// The input is read and decoded in full before anything is written, so a
/// decode failure never leaves partial output behind.
pub fn run(cli: Cli) -> Result<()> {
    let output = cli.output.as_deref().unwrap_or(&cli.input);

    let tasks = read_tasks(&cli.input)?;
    let before = tasks.len();

    let opts = MergeOptions::new()
        .with_remove_empty(cli.remove_empty)
        .with_max_gap(cli.max_gap);
    let merged = merge_tasks(tasks, &opts);
    info!(
        input = %cli.input.display(),
        tasks = merged.len(),
        "merge pass complete"
    );

    write_tasks(output, &merged)?;

    log_info(
        &format!("Merged spans written to '{}'.", output.display()),
        cli.quiet,
    );
    if cli.remove_empty && merged.len() != before {
        log_info(
            &format!("  ({} empty tasks removed.)", before - merged.len()),
            cli.quiet,
        );
    }
    Ok(())
}

/// Read a JSON array of tasks from a file.
fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    let content =
        fs::read_to_string(path).map_err(|e| Error::source_not_found(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::decode(path, e))
}

/// Write tasks as pretty-printed JSON, creating parent directories as needed.
fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(tasks)?;
    fs::write(path, json)?;
    Ok(())
}

/// Log a status message to stderr (respects quiet flag).
fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{msg}");
    }
}
