//! The stateful scanner: applies directives and routes content lines.

use crate::document::HelpDocument;
use crate::error::ParseError;

use super::directive::{classify, split_bodies, Directive, Flag, Keyed, Line};

/// Routing target for content lines. Payload is the index of the open
/// entry in the matching document collection, so a mode always points
/// at exactly one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    None,
    Toc,
    Topic(usize),
    Table(usize),
    Data(usize),
}

/// Line-by-line parser for help source text.
///
/// Feed raw lines in source order with [`Parser::feed_line`], then call
/// [`Parser::finish`] to take the accumulated [`HelpDocument`]. One
/// parser may span several sources (the driver does this so labels and
/// ordering carry across files) or be created fresh per source.
#[derive(Debug, Default)]
pub struct Parser {
    doc: HelpDocument,
    mode: Mode,
}

impl Parser {
    /// Create a parser with an empty document in the neutral mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw input line.
    pub fn feed_line(&mut self, raw: &str) -> Result<(), ParseError> {
        match classify(raw) {
            Line::Comment => Ok(()),
            Line::Directive(remainder) => {
                for body in split_bodies(remainder) {
                    self.apply(Directive::parse(body)?)?;
                }
                Ok(())
            }
            Line::Content(line) => self.route(line),
        }
    }

    /// Process a whole source, line by line.
    pub fn feed_str(&mut self, text: &str) -> Result<(), ParseError> {
        for line in text.lines() {
            self.feed_line(line)?;
        }
        Ok(())
    }

    /// Apply one already-parsed directive.
    ///
    /// [`Parser::feed_line`] splits multi-directive lines before calling
    /// this; callers driving the parser with their own directive stream
    /// pass one directive at a time.
    pub fn apply(&mut self, directive: Directive<'_>) -> Result<(), ParseError> {
        match directive {
            Directive::Keyed(command) => self.apply_keyed(command),
            Directive::Flag(flag) => {
                self.apply_flag(flag);
                Ok(())
            }
        }
    }

    /// The document accumulated so far.
    pub fn document(&self) -> &HelpDocument {
        &self.doc
    }

    /// Hand over the accumulated document.
    pub fn finish(self) -> HelpDocument {
        self.doc
    }

    fn apply_keyed(&mut self, command: Keyed<'_>) -> Result<(), ParseError> {
        match command {
            Keyed::HdrFile(value) => self.doc.header_file = Some(value.to_string()),
            Keyed::HlpFile(value) => self.doc.help_file = Some(value.to_string()),
            Keyed::Version(value) => self.doc.version = Some(value.to_string()),
            Keyed::FormatExclude(column) => match self.usable_topic_index() {
                Some(index) => {
                    if let Some(topic) = self.doc.topic_at_mut(index) {
                        topic.format_exclude = Some(column);
                    }
                }
                None => self.doc.global_format_exclude = Some(column),
            },
            Keyed::Label(label) => {
                let topic = self
                    .usable_topic_index()
                    .and_then(|index| self.doc.topic_at(index))
                    .map(|topic| topic.name.clone())
                    .ok_or_else(|| ParseError::LabelWithoutTopic(label.to_string()))?;
                self.doc.insert_label(label, &topic)?;
            }
            Keyed::Topic { name, label } => {
                let index = self.doc.insert_topic(name)?;
                self.mode = Mode::Topic(index);
                if let Some(label) = label {
                    if name.is_empty() {
                        return Err(ParseError::LabelWithoutTopic(label.to_string()));
                    }
                    self.doc.insert_label(label, name)?;
                }
            }
            Keyed::Table(name) => {
                let index = self.doc.insert_table(name)?;
                self.mode = Mode::Table(index);
            }
            Keyed::Data(name) => {
                let index = self.doc.insert_data(name)?;
                self.mode = Mode::Data(index);
            }
        }
        self.doc.command_count += 1;
        Ok(())
    }

    fn apply_flag(&mut self, flag: Flag<'_>) {
        match flag {
            Flag::Format(on) => self.doc.formatting = on,
            Flag::DocContents => {
                self.doc.reset_toc();
                self.mode = Mode::Toc;
            }
            Flag::Doc(on) => self.doc.doc = on,
            Flag::Online(on) => self.doc.online = on,
            Flag::CompressSpaces(on) => self.doc.compress_spaces = on,
            Flag::FormatExclude(on) => self.doc.format_exclude_enabled = on,
            Flag::EndTable => self.mode = Mode::None,
            // Page breaks and inclusion belong to a renderer; recognized
            // here so real sources parse cleanly.
            Flag::FormFeed | Flag::OnlineFormFeed | Flag::Include(_) => {}
        }
    }

    fn route(&mut self, line: &str) -> Result<(), ParseError> {
        match self.mode {
            Mode::None => return Err(ParseError::UnknownContentState(line.to_string())),
            Mode::Toc => self.doc.push_toc(line),
            Mode::Topic(index) => {
                let topic = self
                    .doc
                    .topic_at_mut(index)
                    .filter(|topic| !topic.name.is_empty())
                    .ok_or_else(|| ParseError::ContentWithoutTopic(line.to_string()))?;
                topic.lines.push(line.to_string());
            }
            Mode::Table(index) => {
                let table = self
                    .doc
                    .table_at_mut(index)
                    .ok_or_else(|| ParseError::UnknownContentState(line.to_string()))?;
                table.lines.push(line.to_string());
            }
            Mode::Data(index) => {
                let data = self
                    .doc
                    .data_at_mut(index)
                    .ok_or_else(|| ParseError::UnknownContentState(line.to_string()))?;
                data.lines.push(line.to_string());
            }
        }
        self.doc.content_count += 1;
        Ok(())
    }

    /// Index of the active topic, when its name is usable (non-empty).
    fn usable_topic_index(&self) -> Option<usize> {
        match self.mode {
            Mode::Topic(index) => self
                .doc
                .topic_at(index)
                .filter(|topic| !topic.name.is_empty())
                .map(|_| index),
            _ => None,
        }
    }
}

/// Parse a complete source in one call.
pub fn parse_str(text: &str) -> Result<HelpDocument, ParseError> {
    let mut parser = Parser::new();
    parser.feed_str(text)?;
    Ok(parser.finish())
}
