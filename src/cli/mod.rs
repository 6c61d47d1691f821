pub mod check;
pub mod completions;
pub mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{HelpError, Result};
use crate::manifest::Manifest;

/// helpsrc - help source parser and reporting tool
#[derive(Parser, Debug)]
#[command(name = "helpsrc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse help source files and fail on the first error
    Check(check::CheckArgs),

    /// Parse help source files and print a summary report
    Report(report::ReportArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Resolve the input list: files named on the command line win,
/// otherwise the manifest's ordered sources are used.
fn effective_sources(files: Vec<PathBuf>, manifest_path: &Path) -> Result<Vec<PathBuf>> {
    if !files.is_empty() {
        return Ok(files);
    }

    let manifest = Manifest::load(manifest_path)?;
    if manifest.sources.is_empty() {
        return Err(HelpError::Manifest {
            message: "no sources to parse".to_string(),
            help: Some("Pass files on the command line or list them under `sources:`".to_string()),
        });
    }
    Ok(manifest.sources)
}
