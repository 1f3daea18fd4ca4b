//! Error types and reporting for the shell.
//!
//! Every failure the interpreter can hit maps to one `ShellError` variant, and
//! the `Display` output of each variant is the exact line written to stderr.
//! Detail that the user never sees (the underlying `io::Error`, which kind of
//! redirection fault) is kept on the value so it can reach the debug log.

use std::io;

use thiserror::Error;

/// What exactly was wrong with a `>` redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectionFault {
    /// More than one `>` in the segment.
    MultipleOperators,
    /// Nothing after `>`.
    MissingTarget,
    /// More than one token after `>`.
    ExtraTargets,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("An error has occurred")]
    Os(#[source] io::Error),

    #[error("An error has occurred")]
    Startup(String),

    #[error("wish: command not found")]
    CommandNotFound(String),

    #[error("wish: cd requires one argument")]
    CdArity,

    #[error("wish: exit takes no arguments")]
    ExitArity,

    #[error("wish: redirection error")]
    Redirection(RedirectionFault),
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Os(err)
    }
}

/// Convenience type alias for Results with ShellError
pub type ShellResult<T> = Result<T, ShellError>;

/// Write the user-facing message for `err` to stderr.
pub fn report_error(err: &ShellError) {
    eprintln!("{err}");
}
