//! Segmenting and tokenizing of input lines.
//!
//! A line is split on `&` into independent segments. Each segment may carry a
//! single `>` redirection whose target must be exactly one token; the rest of
//! the segment is split on runs of spaces and tabs. There is no quoting and no
//! escaping, so every byte except the separators is literal.
use crate::error::ShellError;

mod command_parser;
mod redirection_parser;
mod tokenizer;

pub use command_parser::{parse_segment, split_line};
pub use tokenizer::{tokenize, trim_segment, truncate_chars};

/// One command of a line: argv plus an optional stdout/stderr target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Never empty; `args[0]` is the command name.
    args: Vec<String>,
    redirect: Option<String>,
}

impl CommandSpec {
    /// Returns `None` for an empty argument list.
    pub fn new(args: Vec<String>, redirect: Option<String>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }
        Some(Self { args, redirect })
    }

    pub fn name(&self) -> &str {
        &self.args[0]
    }

    /// Full argv, command name included.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn display(&self) -> String {
        match self.redirect {
            Some(ref target) => format!("{} > {target}", self.args.join(" ")),
            None => self.args.join(" "),
        }
    }
}

/// A segment that parsed cleanly, or the error to report in its place.
pub type Segment = Result<CommandSpec, ShellError>;

/// The segments of one input line, in dispatch order.
#[derive(Debug, Default)]
pub struct CommandLine {
    segments: Vec<Segment>,
}

impl CommandLine {
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Only the segments that parsed cleanly.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.segments.iter().filter_map(|segment| segment.as_ref().ok())
    }
}

impl IntoIterator for CommandLine {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Optional caps on input size. Exceeding a cap truncates; it is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Characters of a line that are kept.
    pub max_line_len: Option<usize>,
    /// Non-empty `&` segments that are kept.
    pub max_segments: Option<usize>,
    /// Argument tokens kept per segment.
    pub max_args: Option<usize>,
}

impl Limits {
    pub const fn unbounded() -> Self {
        Self {
            max_line_len: None,
            max_segments: None,
            max_args: None,
        }
    }

    /// The fixed buffer sizes of the reference wish implementation.
    pub const fn compatible() -> Self {
        Self {
            max_line_len: Some(4095),
            max_segments: Some(100),
            max_args: Some(99),
        }
    }
}
