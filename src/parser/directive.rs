//! Directive grammar: line classification, body splitting and the
//! command forms.
//!
//! A directive line starts with `~` and carries one or more bodies
//! separated by unescaped commas. Each body is either a `Key=Value`
//! command or a bare flag; anything else is an error.

use crate::error::ParseError;

/// Classification of one raw input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `~` line; holds the remainder after the sentinel.
    Directive(&'a str),
    /// `;` line, discarded without side effects.
    Comment,
    /// Anything else, routed by the scanner's current mode.
    Content(&'a str),
}

/// Classify a raw line by its first character.
pub fn classify(raw: &str) -> Line<'_> {
    if let Some(remainder) = raw.strip_prefix('~') {
        Line::Directive(remainder)
    } else if raw.starts_with(';') {
        Line::Comment
    } else {
        Line::Content(raw)
    }
}

/// Split a directive-line remainder into independent bodies.
///
/// Splits at every comma not immediately preceded by a backslash and
/// consumes the run of spaces after each split point. Escaped commas
/// stay in the body verbatim, backslash included.
pub fn split_bodies(remainder: &str) -> Vec<&str> {
    let bytes = remainder.as_bytes();
    let mut bodies = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b',' && (i == 0 || bytes[i - 1] != b'\\') {
            bodies.push(&remainder[start..i]);
            i += 1;
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    bodies.push(&remainder[start..]);
    bodies
}

/// One parsed directive body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `Key=Value` command; counts toward the document's command total.
    Keyed(Keyed<'a>),
    /// Bare flag; toggles state without touching the command total.
    Flag(Flag<'a>),
}

impl<'a> Directive<'a> {
    /// Parse a single, already-split directive body.
    ///
    /// A body with an unescaped `=` is always a keyed command; only
    /// bodies without one are matched against the flag patterns.
    pub fn parse(body: &'a str) -> Result<Self, ParseError> {
        if let Some(eq) = find_unescaped(body, b'=') {
            let keyed = Keyed::parse(&body[..eq], &body[eq + 1..])?;
            return Ok(Directive::Keyed(keyed));
        }
        Flag::parse(body).map(Directive::Flag)
    }
}

/// `Key=Value` command forms, dispatched on the lower-cased key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyed<'a> {
    /// `HdrFile=`: name of the C header to generate.
    HdrFile(&'a str),
    /// `HlpFile=`: name of the compiled help file.
    HlpFile(&'a str),
    /// `Version=`: version string, kept verbatim.
    Version(&'a str),
    /// `FormatExclude=`: numeric exclusion column.
    FormatExclude(i64),
    /// `Label=`: link label for the active topic.
    Label(&'a str),
    /// `Topic=`: open a topic, optionally labelling it in the same body.
    Topic {
        name: &'a str,
        label: Option<&'a str>,
    },
    /// `Table=`: open a table.
    Table(&'a str),
    /// `Data=`: open a data block.
    Data(&'a str),
}

impl<'a> Keyed<'a> {
    fn parse(key: &'a str, value: &'a str) -> Result<Self, ParseError> {
        match key.to_ascii_lowercase().as_str() {
            "hdrfile" => Ok(Keyed::HdrFile(value)),
            "hlpfile" => Ok(Keyed::HlpFile(value)),
            "version" => Ok(Keyed::Version(value)),
            "formatexclude" => value
                .parse::<i64>()
                .map(Keyed::FormatExclude)
                .map_err(|_| ParseError::InvalidNumber(value.to_string())),
            "label" => Ok(Keyed::Label(value)),
            "topic" => Ok(parse_topic(value)),
            "table" => Ok(Keyed::Table(value)),
            "data" => Ok(Keyed::Data(value)),
            other => Err(ParseError::UnknownKeyedCommand(other.to_string())),
        }
    }
}

/// Recognize the combined `Topic=Name, Label=LabelName` value form.
///
/// Only reachable when the comma was escaped away from the line
/// splitter or the body arrives pre-split through the library API.
fn parse_topic(value: &str) -> Keyed<'_> {
    let bytes = value.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] != b',' || (i > 0 && bytes[i - 1] == b'\\') {
            continue;
        }
        let after = value[i + 1..].trim_start_matches(' ');
        if let Some(label) = strip_prefix_ci(after, "Label=") {
            return Keyed::Topic {
                name: &value[..i],
                label: Some(label),
            };
        }
    }
    Keyed::Topic { name: value, label: None }
}

/// Bare directive flags, matched by exact pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag<'a> {
    /// `Format+`/`Format-`/`Format`: formatting on or off.
    Format(bool),
    /// `DocContents`: switch to the table-of-contents section.
    DocContents,
    /// `Doc+`/`Doc-`.
    Doc(bool),
    /// `Online+`/`Online-`.
    Online(bool),
    /// `FF`: page break in the printed document.
    FormFeed,
    /// `OnlineFF` (any case): page break in the online help.
    OnlineFormFeed,
    /// `Include <file>`: recognized for compatibility, no effect here.
    Include(&'a str),
    /// `CompressSpaces+`/`CompressSpaces-`.
    CompressSpaces(bool),
    /// `EndTable`: close the current section.
    EndTable,
    /// `FormatExclude+`/`FormatExclude-`.
    FormatExclude(bool),
}

impl<'a> Flag<'a> {
    fn parse(body: &'a str) -> Result<Self, ParseError> {
        let flag = match body {
            "Format" | "Format-" => Flag::Format(false),
            "Format+" => Flag::Format(true),
            "DocContents" => Flag::DocContents,
            "Doc+" => Flag::Doc(true),
            "Doc-" => Flag::Doc(false),
            "Online+" => Flag::Online(true),
            "Online-" => Flag::Online(false),
            "FF" => Flag::FormFeed,
            "CompressSpaces+" => Flag::CompressSpaces(true),
            "CompressSpaces-" => Flag::CompressSpaces(false),
            "EndTable" => Flag::EndTable,
            "FormatExclude+" => Flag::FormatExclude(true),
            "FormatExclude-" => Flag::FormatExclude(false),
            _ if body.eq_ignore_ascii_case("OnlineFF") => Flag::OnlineFormFeed,
            _ => match body.strip_prefix("Include ") {
                Some(target) => Flag::Include(target),
                None => return Err(ParseError::UnknownDirective(body.to_string())),
            },
        };
        Ok(flag)
    }
}

/// Position of the first `needle` byte not preceded by a backslash.
fn find_unescaped(s: &str, needle: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    (0..bytes.len()).find(|&i| bytes[i] == needle && (i == 0 || bytes[i - 1] != b'\\'))
}

/// Case-insensitive ASCII prefix strip.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_by_first_character() {
        assert_eq!(classify("~Topic=Intro"), Line::Directive("Topic=Intro"));
        assert_eq!(classify("; remarks"), Line::Comment);
        assert_eq!(classify("plain text"), Line::Content("plain text"));
        assert_eq!(classify(""), Line::Content(""));
        assert_eq!(classify(" ~not a directive"), Line::Content(" ~not a directive"));
    }

    #[test]
    fn test_split_single_body() {
        assert_eq!(split_bodies("Topic=Intro"), vec!["Topic=Intro"]);
        assert_eq!(split_bodies(""), vec![""]);
    }

    #[test]
    fn test_split_consumes_spaces_after_comma() {
        assert_eq!(
            split_bodies("CompressSpaces+,   Format-"),
            vec!["CompressSpaces+", "Format-"]
        );
        assert_eq!(split_bodies("Doc+,Online-"), vec!["Doc+", "Online-"]);
    }

    #[test]
    fn test_split_keeps_escaped_commas() {
        assert_eq!(split_bodies("Version=1\\,2"), vec!["Version=1\\,2"]);
        assert_eq!(
            split_bodies("Version=1\\,2, Doc+"),
            vec!["Version=1\\,2", "Doc+"]
        );
    }

    #[test]
    fn test_split_trailing_comma_yields_empty_body() {
        assert_eq!(split_bodies("Doc+,"), vec!["Doc+", ""]);
    }

    #[test]
    fn test_keyed_commands_parse() {
        assert_eq!(
            Directive::parse("HdrFile=HELPDEFS.H").unwrap(),
            Directive::Keyed(Keyed::HdrFile("HELPDEFS.H"))
        );
        assert_eq!(
            Directive::parse("HlpFile=ID.HLP").unwrap(),
            Directive::Keyed(Keyed::HlpFile("ID.HLP"))
        );
        assert_eq!(
            Directive::parse("Version=100").unwrap(),
            Directive::Keyed(Keyed::Version("100"))
        );
        assert_eq!(
            Directive::parse("Label=HELP_MAIN").unwrap(),
            Directive::Keyed(Keyed::Label("HELP_MAIN"))
        );
        assert_eq!(
            Directive::parse("Table=Key Reference").unwrap(),
            Directive::Keyed(Keyed::Table("Key Reference"))
        );
        assert_eq!(
            Directive::parse("Data=palette.map").unwrap(),
            Directive::Keyed(Keyed::Data("palette.map"))
        );
    }

    #[test]
    fn test_keyed_key_is_case_insensitive() {
        assert_eq!(
            Directive::parse("TOPIC=Intro").unwrap(),
            Directive::Keyed(Keyed::Topic {
                name: "Intro",
                label: None
            })
        );
        assert_eq!(
            Directive::parse("hdrfile=a.h").unwrap(),
            Directive::Keyed(Keyed::HdrFile("a.h"))
        );
    }

    #[test]
    fn test_format_exclude_parses_numbers() {
        assert_eq!(
            Directive::parse("FormatExclude=8").unwrap(),
            Directive::Keyed(Keyed::FormatExclude(8))
        );
        assert_eq!(
            Directive::parse("FormatExclude=-1").unwrap(),
            Directive::Keyed(Keyed::FormatExclude(-1))
        );
        assert_eq!(
            Directive::parse("FormatExclude=wide").unwrap_err(),
            ParseError::InvalidNumber("wide".to_string())
        );
    }

    #[test]
    fn test_unknown_key_fails() {
        assert_eq!(
            Directive::parse("Frobnicate=now").unwrap_err(),
            ParseError::UnknownKeyedCommand("frobnicate".to_string())
        );
    }

    #[test]
    fn test_combined_topic_label_value() {
        assert_eq!(
            Keyed::parse("Topic", "Intro, Label=HELP_INTRO").unwrap(),
            Keyed::Topic {
                name: "Intro",
                label: Some("HELP_INTRO")
            }
        );
        assert_eq!(
            Keyed::parse("Topic", "A, B, Label=L").unwrap(),
            Keyed::Topic {
                name: "A, B",
                label: Some("L")
            }
        );
    }

    #[test]
    fn test_escaped_comma_never_starts_combined_form() {
        assert_eq!(
            Directive::parse("Topic=Intro\\, Label=HELP_INTRO").unwrap(),
            Directive::Keyed(Keyed::Topic {
                name: "Intro\\, Label=HELP_INTRO",
                label: None
            })
        );
    }

    #[test]
    fn test_value_keeps_escapes_verbatim() {
        assert_eq!(
            Directive::parse("Version=1\\,2").unwrap(),
            Directive::Keyed(Keyed::Version("1\\,2"))
        );
    }

    #[test]
    fn test_flags_parse() {
        assert_eq!(Directive::parse("Format").unwrap(), Directive::Flag(Flag::Format(false)));
        assert_eq!(Directive::parse("Format-").unwrap(), Directive::Flag(Flag::Format(false)));
        assert_eq!(Directive::parse("Format+").unwrap(), Directive::Flag(Flag::Format(true)));
        assert_eq!(Directive::parse("DocContents").unwrap(), Directive::Flag(Flag::DocContents));
        assert_eq!(Directive::parse("Doc-").unwrap(), Directive::Flag(Flag::Doc(false)));
        assert_eq!(Directive::parse("Online+").unwrap(), Directive::Flag(Flag::Online(true)));
        assert_eq!(Directive::parse("FF").unwrap(), Directive::Flag(Flag::FormFeed));
        assert_eq!(
            Directive::parse("CompressSpaces+").unwrap(),
            Directive::Flag(Flag::CompressSpaces(true))
        );
        assert_eq!(Directive::parse("EndTable").unwrap(), Directive::Flag(Flag::EndTable));
        assert_eq!(
            Directive::parse("FormatExclude-").unwrap(),
            Directive::Flag(Flag::FormatExclude(false))
        );
    }

    #[test]
    fn test_online_ff_any_case() {
        assert_eq!(Directive::parse("OnlineFF").unwrap(), Directive::Flag(Flag::OnlineFormFeed));
        assert_eq!(Directive::parse("ONLINEFF").unwrap(), Directive::Flag(Flag::OnlineFormFeed));
        assert_eq!(Directive::parse("onlineff").unwrap(), Directive::Flag(Flag::OnlineFormFeed));
    }

    #[test]
    fn test_other_flags_are_case_sensitive() {
        assert_eq!(
            Directive::parse("ff").unwrap_err(),
            ParseError::UnknownDirective("ff".to_string())
        );
        assert_eq!(
            Directive::parse("doc+").unwrap_err(),
            ParseError::UnknownDirective("doc+".to_string())
        );
    }

    #[test]
    fn test_include_recognized_with_target() {
        assert_eq!(
            Directive::parse("Include extra.src").unwrap(),
            Directive::Flag(Flag::Include("extra.src"))
        );
        assert_eq!(
            Directive::parse("Include").unwrap_err(),
            ParseError::UnknownDirective("Include".to_string())
        );
    }

    #[test]
    fn test_empty_body_is_unknown() {
        assert_eq!(
            Directive::parse("").unwrap_err(),
            ParseError::UnknownDirective(String::new())
        );
    }

    #[test]
    fn test_equals_always_selects_keyed_form() {
        assert_eq!(
            Directive::parse("Format+=yes").unwrap_err(),
            ParseError::UnknownKeyedCommand("format+".to_string())
        );
    }
}
