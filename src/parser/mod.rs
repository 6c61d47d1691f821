//! Parser modules for help source text.
//!
//! Help sources are line-oriented: `~` starts a directive line, `;` a
//! comment, and everything else is content routed to whichever topic,
//! table, data block or contents list the directives opened.
//!
//! # Usage
//!
//! ```ignore
//! use helpsrc::parser::parse_str;
//!
//! let source = std::fs::read_to_string("help.src")?;
//! let doc = parse_str(&source)?;
//!
//! for topic in doc.topics() {
//!     println!("{}: {} lines", topic.name, topic.lines.len());
//! }
//! ```

mod directive;
mod scan;

// Re-export main entry points
pub use directive::{classify, split_bodies, Directive, Flag, Keyed, Line};
pub use scan::{parse_str, Parser};
