//! Report command implementation.
//!
//! Parses the given sources and prints a document summary to stdout,
//! either human-readable or as JSON.

use std::path::PathBuf;

use clap::Args;

use crate::driver::parse_files;
use crate::error::{HelpError, Result};
use crate::manifest::MANIFEST_FILE;
use crate::output::{plural, Printer};
use crate::report::Summary;

/// Parse help source files and print a summary report
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Input files, parsed in the order given (manifest sources when empty)
    pub files: Vec<PathBuf>,

    /// Manifest to consult when no files are given
    #[arg(long, default_value = MANIFEST_FILE)]
    pub manifest: PathBuf,

    /// Emit the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ReportArgs, printer: &Printer) -> Result<()> {
    let sources = super::effective_sources(args.files, &args.manifest)?;

    printer.status("Parsing", &plural(sources.len(), "file", "files"));
    let doc = parse_files(&sources)?;
    let summary = Summary::from_document(&doc);

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| HelpError::Report {
            message: format!("could not serialize summary: {e}"),
        })?;
        println!("{json}");
    } else {
        print!("{}", summary.to_text());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Printer;
    use tempfile::tempdir;

    fn sample_args(dir: &tempfile::TempDir, json: bool) -> ReportArgs {
        let path = dir.path().join("help.src");
        std::fs::write(&path, "~Version=7\n~Topic=Intro\nhello\n").unwrap();
        ReportArgs {
            files: vec![path],
            manifest: PathBuf::from(MANIFEST_FILE),
            json,
        }
    }

    #[test]
    fn test_report_text_mode_runs() {
        let dir = tempdir().unwrap();
        run(sample_args(&dir, false), &Printer::new()).unwrap();
    }

    #[test]
    fn test_report_json_mode_runs() {
        let dir = tempdir().unwrap();
        run(sample_args(&dir, true), &Printer::new()).unwrap();
    }

    #[test]
    fn test_report_fails_on_unreadable_source() {
        let dir = tempdir().unwrap();
        let args = ReportArgs {
            files: vec![dir.path().join("missing.src")],
            manifest: PathBuf::from(MANIFEST_FILE),
            json: false,
        };
        assert!(run(args, &Printer::new()).is_err());
    }
}
