//! wish: a line-oriented command interpreter.
//!
//! Parsing is always available so fuzz targets and unit tests can link it
//! without the interactive dependencies. The `shell` feature adds command
//! resolution, builtins, process launching and the read-execute session.

mod error;
mod parse;

#[cfg(feature = "shell")]
pub mod builtins;
#[cfg(feature = "shell")]
pub mod config;
#[cfg(feature = "shell")]
pub mod execution;
#[cfg(feature = "shell")]
pub mod io_helpers;
#[cfg(feature = "shell")]
pub mod repl;
#[cfg(feature = "shell")]
pub mod search_path;

pub use error::{report_error, RedirectionFault, ShellError, ShellResult};
pub use parse::{
    parse_segment, split_line, tokenize, trim_segment, truncate_chars, CommandLine, CommandSpec,
    Limits, Segment,
};

/// Segment a line with no size caps.
pub fn parse_line(input: &str) -> CommandLine {
    parse::split_line(input, &Limits::unbounded())
}

/// Fuzz helper for parser-only targets.
pub fn fuzz_parse_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let _ = parse::split_line(&input, &Limits::unbounded());
    let _ = parse::split_line(&input, &Limits::compatible());
}
