//! Document model produced by the help source parser.
//!
//! A [`HelpDocument`] accumulates every topic, table, data block, label
//! and contents entry found across one or more source files, plus the
//! scalar metadata and toggle state set by directives. Collections keep
//! declaration order; name lookups go through side indexes.

use std::collections::HashMap;

use crate::error::ParseError;

/// A named topic: the primary container for help content lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Topic name exactly as written in the `~Topic=` directive.
    pub name: String,
    /// Content lines in source order, preserved verbatim.
    pub lines: Vec<String>,
    /// Topic-scoped format exclusion column, if one was set.
    pub format_exclude: Option<i64>,
}

impl Topic {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
            format_exclude: None,
        }
    }

    /// File stem a renderer would write this topic to.
    pub fn output_stem(&self) -> String {
        output_stem(&self.name)
    }
}

/// A named table of preformatted lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub lines: Vec<String>,
}

/// A named block of raw data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    pub name: String,
    pub lines: Vec<String>,
}

/// The in-memory result of parsing help source text.
///
/// Topics, tables and data blocks are stored in declaration order and
/// addressable by name. Scalar metadata and toggles are plain fields;
/// the counters only ever grow, directive errors abort the run before
/// anything is recorded for the failing line.
#[derive(Debug, Clone, Default)]
pub struct HelpDocument {
    topics: Vec<Topic>,
    topic_index: HashMap<String, usize>,
    tables: Vec<Table>,
    table_index: HashMap<String, usize>,
    datas: Vec<DataBlock>,
    data_index: HashMap<String, usize>,
    toc: Vec<String>,
    labels: HashMap<String, String>,

    /// C header file name from `~HdrFile=`.
    pub header_file: Option<String>,
    /// Compiled help file name from `~HlpFile=`.
    pub help_file: Option<String>,
    /// Version string from `~Version=`.
    pub version: Option<String>,

    /// State of the `Format+`/`Format-` toggle.
    pub formatting: bool,
    /// State of the `Doc+`/`Doc-` toggle.
    pub doc: bool,
    /// State of the `Online+`/`Online-` toggle.
    pub online: bool,
    /// State of the `CompressSpaces+`/`CompressSpaces-` toggle.
    pub compress_spaces: bool,
    /// State of the `FormatExclude+`/`FormatExclude-` toggle.
    pub format_exclude_enabled: bool,
    /// Format exclusion column set while no topic was active.
    pub global_format_exclude: Option<i64>,

    /// Keyed commands successfully applied.
    pub command_count: usize,
    /// Content lines successfully routed.
    pub content_count: usize,
}

impl HelpDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a topic by name.
    pub fn get_topic(&self, name: &str) -> Option<&Topic> {
        self.topic_index.get(name).map(|&i| &self.topics[i])
    }

    /// All topics, in declaration order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Number of topics.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Look up a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.table_index.get(name).map(|&i| &self.tables[i])
    }

    /// All tables, in declaration order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Look up a data block by name.
    pub fn get_data(&self, name: &str) -> Option<&DataBlock> {
        self.data_index.get(name).map(|&i| &self.datas[i])
    }

    /// All data blocks, in declaration order.
    pub fn datas(&self) -> &[DataBlock] {
        &self.datas
    }

    /// Number of data blocks.
    pub fn data_count(&self) -> usize {
        self.datas.len()
    }

    /// Table-of-contents lines, in source order.
    pub fn toc(&self) -> &[String] {
        &self.toc
    }

    /// Label to topic-name mapping.
    pub fn labels(&self) -> &HashMap<String, String> {
        &self.labels
    }

    /// Topic name a label points at.
    pub fn label_topic(&self, label: &str) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    /// Number of labels.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn topic_at(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    pub(crate) fn topic_at_mut(&mut self, index: usize) -> Option<&mut Topic> {
        self.topics.get_mut(index)
    }

    pub(crate) fn table_at_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables.get_mut(index)
    }

    pub(crate) fn data_at_mut(&mut self, index: usize) -> Option<&mut DataBlock> {
        self.datas.get_mut(index)
    }

    pub(crate) fn insert_topic(&mut self, name: &str) -> Result<usize, ParseError> {
        if self.topic_index.contains_key(name) {
            return Err(ParseError::DuplicateKey {
                kind: "topic",
                name: name.to_string(),
            });
        }
        let index = self.topics.len();
        self.topic_index.insert(name.to_string(), index);
        self.topics.push(Topic::new(name));
        Ok(index)
    }

    pub(crate) fn insert_table(&mut self, name: &str) -> Result<usize, ParseError> {
        if self.table_index.contains_key(name) {
            return Err(ParseError::DuplicateKey {
                kind: "table",
                name: name.to_string(),
            });
        }
        let index = self.tables.len();
        self.table_index.insert(name.to_string(), index);
        self.tables.push(Table {
            name: name.to_string(),
            lines: Vec::new(),
        });
        Ok(index)
    }

    pub(crate) fn insert_data(&mut self, name: &str) -> Result<usize, ParseError> {
        if self.data_index.contains_key(name) {
            return Err(ParseError::DuplicateKey {
                kind: "data block",
                name: name.to_string(),
            });
        }
        let index = self.datas.len();
        self.data_index.insert(name.to_string(), index);
        self.datas.push(DataBlock {
            name: name.to_string(),
            lines: Vec::new(),
        });
        Ok(index)
    }

    pub(crate) fn insert_label(&mut self, label: &str, topic: &str) -> Result<(), ParseError> {
        if self.labels.contains_key(label) {
            return Err(ParseError::DuplicateKey {
                kind: "label",
                name: label.to_string(),
            });
        }
        self.labels.insert(label.to_string(), topic.to_string());
        Ok(())
    }

    pub(crate) fn push_toc(&mut self, line: &str) {
        self.toc.push(line.to_string());
    }

    pub(crate) fn reset_toc(&mut self) {
        self.toc.clear();
    }
}

/// Derive the output file stem for a topic name.
///
/// The name is lower-cased and every maximal run of characters outside
/// `[0-9a-z-]` collapses to a single underscore, so a given topic name
/// always lands in the same file.
pub fn output_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut gap = false;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            stem.push(c);
            gap = false;
        } else if !gap {
            stem.push('_');
            gap = true;
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_topic_preserves_order() {
        let mut doc = HelpDocument::new();
        doc.insert_topic("Zeta").unwrap();
        doc.insert_topic("Alpha").unwrap();
        doc.insert_topic("Mid").unwrap();

        let names: Vec<&str> = doc.topics().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(doc.topic_count(), 3);
        assert!(doc.get_topic("Alpha").is_some());
        assert!(doc.get_topic("alpha").is_none());
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let mut doc = HelpDocument::new();
        doc.insert_topic("Intro").unwrap();
        let err = doc.insert_topic("Intro").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateKey {
                kind: "topic",
                name: "Intro".to_string()
            }
        );
        assert_eq!(doc.topic_count(), 1);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut doc = HelpDocument::new();
        doc.insert_label("HELP_MAIN", "Main").unwrap();
        let err = doc.insert_label("HELP_MAIN", "Other").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateKey {
                kind: "label",
                name: "HELP_MAIN".to_string()
            }
        );
        assert_eq!(doc.label_topic("HELP_MAIN"), Some("Main"));
    }

    #[test]
    fn test_tables_and_datas_tracked_separately() {
        let mut doc = HelpDocument::new();
        doc.insert_table("Keys").unwrap();
        doc.insert_data("Palette").unwrap();
        doc.insert_topic("Keys").unwrap();

        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.data_count(), 1);
        assert_eq!(doc.topic_count(), 1);
        assert!(doc.get_table("Keys").is_some());
        assert!(doc.get_data("Keys").is_none());
    }

    #[test]
    fn test_output_stem_lowercases_and_collapses() {
        assert_eq!(output_stem("Color Cycling"), "color_cycling");
        insta::assert_snapshot!(output_stem("Getting Started!"), @"getting_started_");
    }

    #[test]
    fn test_output_stem_keeps_digits_and_hyphens() {
        assert_eq!(output_stem("3D Mode"), "3d_mode");
        assert_eq!(output_stem("read-me"), "read-me");
    }

    #[test]
    fn test_output_stem_collapses_punctuation_runs() {
        insta::assert_snapshot!(output_stem("What?! (Why)"), @"what_why_");
        assert_eq!(output_stem("__"), "_");
        assert_eq!(output_stem(""), "");
    }

    #[test]
    fn test_topic_output_stem_matches_free_function() {
        let topic = Topic::new("Bailout Test");
        assert_eq!(topic.output_stem(), output_stem("Bailout Test"));
    }
}
