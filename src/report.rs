//! Summaries of a parsed document for the reporting step.

use serde::Serialize;

use crate::document::HelpDocument;
use crate::output::plural;

/// Per-topic report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSummary {
    pub name: String,
    pub lines: usize,
    /// File stem a renderer would write the topic to.
    pub output_stem: String,
}

/// Counts and metadata enumerated from a finished document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub header_file: Option<String>,
    pub help_file: Option<String>,
    pub version: Option<String>,
    pub topic_count: usize,
    pub table_count: usize,
    pub data_count: usize,
    pub label_count: usize,
    pub toc_lines: usize,
    pub content_lines: usize,
    pub command_count: usize,
    pub topics: Vec<TopicSummary>,
}

impl Summary {
    /// Enumerate report data from a finished document.
    pub fn from_document(doc: &HelpDocument) -> Self {
        Self {
            header_file: doc.header_file.clone(),
            help_file: doc.help_file.clone(),
            version: doc.version.clone(),
            topic_count: doc.topic_count(),
            table_count: doc.table_count(),
            data_count: doc.data_count(),
            label_count: doc.label_count(),
            toc_lines: doc.toc().len(),
            content_lines: doc.content_count,
            command_count: doc.command_count,
            topics: doc
                .topics()
                .iter()
                .map(|topic| TopicSummary {
                    name: topic.name.clone(),
                    lines: topic.lines.len(),
                    output_stem: topic.output_stem(),
                })
                .collect(),
        }
    }

    /// Render the human-readable report text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if let Some(version) = &self.version {
            out.push_str(&format!("version {version}\n"));
        }
        if let Some(header_file) = &self.header_file {
            out.push_str(&format!("header file {header_file}\n"));
        }
        if let Some(help_file) = &self.help_file {
            out.push_str(&format!("help file {help_file}\n"));
        }

        out.push_str(&format!(
            "{}, {}, {}, {}\n",
            plural(self.topic_count, "topic", "topics"),
            plural(self.table_count, "table", "tables"),
            plural(self.data_count, "data block", "data blocks"),
            plural(self.label_count, "label", "labels"),
        ));
        out.push_str(&format!(
            "{}, {}, {}\n",
            plural(self.command_count, "command", "commands"),
            plural(self.content_lines, "content line", "content lines"),
            plural(self.toc_lines, "contents entry", "contents entries"),
        ));

        if !self.topics.is_empty() {
            out.push('\n');
            for topic in &self.topics {
                out.push_str(&format!(
                    "  {}: {} -> {}\n",
                    topic.name,
                    plural(topic.lines, "line", "lines"),
                    topic.output_stem,
                ));
            }
        }

        out
    }
}
