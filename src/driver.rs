//! Sequential multi-file driver.
//!
//! Feeds each named source through one shared [`Parser`], fully
//! consuming a file before the next begins so topic, label and
//! contents ordering stays deterministic across the run. The first
//! failure aborts with the offending path and 1-based line number.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::HelpDocument;
use crate::error::{HelpError, Result};
use crate::parser::Parser;

/// Parse the named files, in order, into one document.
pub fn parse_files(paths: &[PathBuf]) -> Result<HelpDocument> {
    let mut parser = Parser::new();
    for path in paths {
        feed_file(&mut parser, path)?;
    }
    Ok(parser.finish())
}

fn feed_file(parser: &mut Parser, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|e| HelpError::Io {
        path: path.to_path_buf(),
        message: format!("failed to read source: {e}"),
    })?;

    for (number, line) in text.lines().enumerate() {
        parser.feed_line(line).map_err(|source| HelpError::Parse {
            path: path.to_path_buf(),
            line: number + 1,
            source,
        })?;
    }
    Ok(())
}
