use miette::Diagnostic;
use thiserror::Error;

/// Per-line failure kinds produced by the directive grammar and the
/// content router. Every variant is fatal: the scanner stops at the
/// first error and the driver attaches file and line context.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown directive: {0:?}")]
    #[diagnostic(code(helpsrc::parse::unknown_directive))]
    UnknownDirective(String),

    #[error("unknown keyed command: {0:?}")]
    #[diagnostic(
        code(helpsrc::parse::unknown_keyed_command),
        help("known keys are HdrFile, HlpFile, Version, FormatExclude, Label, Topic, Table and Data")
    )]
    UnknownKeyedCommand(String),

    #[error("invalid numeric argument: {0:?}")]
    #[diagnostic(code(helpsrc::parse::invalid_number))]
    InvalidNumber(String),

    #[error("label {0:?} declared outside any topic")]
    #[diagnostic(
        code(helpsrc::parse::label_without_topic),
        help("declare a ~Topic= first, or use the combined Topic=Name, Label=... form")
    )]
    LabelWithoutTopic(String),

    #[error("content line without a usable topic: {0:?}")]
    #[diagnostic(code(helpsrc::parse::content_without_topic))]
    ContentWithoutTopic(String),

    #[error("content line outside any section: {0:?}")]
    #[diagnostic(
        code(helpsrc::parse::unknown_content_state),
        help("start a ~Topic=, ~Table=, ~Data= or ~DocContents section first")
    )]
    UnknownContentState(String),

    #[error("duplicate {kind} name: {name:?}")]
    #[diagnostic(code(helpsrc::parse::duplicate_key))]
    DuplicateKey { kind: &'static str, name: String },
}

/// Main error type for helpsrc operations
#[derive(Error, Diagnostic, Debug)]
pub enum HelpError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(helpsrc::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("manifest error: {message}")]
    #[diagnostic(code(helpsrc::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{path}:{line}: {source}")]
    #[diagnostic(code(helpsrc::parse))]
    Parse {
        path: std::path::PathBuf,
        line: usize,
        source: ParseError,
    },

    #[error("report error: {message}")]
    #[diagnostic(code(helpsrc::report))]
    Report { message: String },
}

pub type Result<T> = std::result::Result<T, HelpError>;
