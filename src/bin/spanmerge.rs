//! spanmerge - merge adjacent same-label annotation spans in Label Studio
//! task files.
//!
//! # Usage
//!
//! ```bash
//! # Rewrite raw model output in place
//! spanmerge model-predictions/predictions.json
//!
//! # Prepare a review-tool import file, dropping empty tasks
//! spanmerge import/predictions_import.json --remove-empty
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use spanmerge::cli::{run, Cli};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
