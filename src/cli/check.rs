//! Check command implementation.
//!
//! Parses the given sources and reports whether they are well formed.
//! The first parse error aborts the run with file and line context.

use std::path::PathBuf;

use clap::Args;

use crate::driver::parse_files;
use crate::error::Result;
use crate::manifest::MANIFEST_FILE;
use crate::output::{display_path, plural, Printer};

/// Parse help source files and fail on the first error
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input files, parsed in the order given (manifest sources when empty)
    pub files: Vec<PathBuf>,

    /// Manifest to consult when no files are given
    #[arg(long, default_value = MANIFEST_FILE)]
    pub manifest: PathBuf,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let sources = super::effective_sources(args.files, &args.manifest)?;

    for source in &sources {
        printer.status("Checking", &display_path(source));
    }
    let doc = parse_files(&sources)?;

    printer.status(
        "Checked",
        &format!(
            "{}, {}, {}, {}",
            plural(doc.topic_count(), "topic", "topics"),
            plural(doc.label_count(), "label", "labels"),
            plural(doc.table_count(), "table", "tables"),
            plural(doc.data_count(), "data block", "data blocks"),
        ),
    );

    Ok(())
}
