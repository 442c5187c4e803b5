//! CLI argument parsing and structure definitions

use std::path::PathBuf;

use clap::Parser;

use crate::merge::DEFAULT_MAX_GAP;

/// Merge adjacent same-label annotation spans in Label Studio task files
#[derive(Parser, Debug)]
#[command(name = "spanmerge")]
#[command(
    author,
    version,
    about = "Merge adjacent same-label annotation spans in Label Studio task files",
    long_about = r#"
spanmerge - normalize model predictions for annotation review

Model predictions often split one entity into fragments: "Anna" and "Hansen"
as two PER spans one character apart. spanmerge rewrites a task file so each
run of same-label spans separated by at most --max-gap characters becomes a
single span with recomputed text and boundaries.

EXAMPLES:
  # Rewrite raw model output in place, keeping every task
  spanmerge model-predictions/predictions.json

  # Prepare a review-tool import file, dropping tasks with no spans
  spanmerge import/predictions_import.json --remove-empty

  # Write to a new file instead of rewriting the input
  spanmerge predictions.json -o merged.json
"#
)]
pub struct Cli {
    /// Input JSON file (array of Label Studio tasks)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output path (defaults to rewriting the input file in place)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Drop tasks left with no spans after merging
    #[arg(long)]
    pub remove_empty: bool,

    /// Maximum character gap between same-label spans to merge
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_GAP)]
    pub max_gap: usize,

    /// Suppress status messages
    #[arg(short, long)]
    pub quiet: bool,
}
