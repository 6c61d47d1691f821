//! helpsrc - help source parser and reporting tool
//!
//! A library for parsing line-oriented help source markup (`~` directive
//! lines, `;` comments, mode-routed content) into a structured document
//! of topics, tables, data blocks, labels and contents entries.

pub mod cli;
pub mod document;
pub mod driver;
pub mod error;
pub mod manifest;
pub mod output;
pub mod parser;
pub mod report;

pub use document::{output_stem, DataBlock, HelpDocument, Table, Topic};
pub use driver::parse_files;
pub use error::{HelpError, ParseError, Result};
pub use manifest::Manifest;
pub use parser::{parse_str, Directive, Flag, Keyed, Parser};
pub use report::{Summary, TopicSummary};
