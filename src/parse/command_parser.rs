use crate::error::ShellError;
use crate::parse::redirection_parser::split_redirection;
use crate::parse::tokenizer::{tokenize, trim_segment, truncate_chars};
use crate::parse::{CommandLine, CommandSpec, Limits};

/// Split a raw line on `&` and parse every non-empty segment.
///
/// Rejected segments stay in the result as errors so the caller can report
/// them in order; segments with no command tokens are dropped silently.
pub fn split_line(input: &str, limits: &Limits) -> CommandLine {
    let line = truncate_chars(input, limits.max_line_len);
    let mut segments = Vec::new();
    let mut kept = 0usize;

    for piece in line.split('&') {
        let piece = trim_segment(piece);
        if piece.is_empty() {
            continue;
        }
        if limits.max_segments.is_some_and(|max| kept >= max) {
            break;
        }
        kept += 1;
        match parse_segment(piece, limits) {
            Ok(Some(spec)) => segments.push(Ok(spec)),
            Ok(None) => {}
            Err(err) => segments.push(Err(err)),
        }
    }

    CommandLine::from_segments(segments)
}

/// Parse one trimmed segment. `Ok(None)` means it held no command tokens.
pub fn parse_segment(segment: &str, limits: &Limits) -> Result<Option<CommandSpec>, ShellError> {
    let (command, redirect) = split_redirection(segment).map_err(ShellError::Redirection)?;
    let args = tokenize(command, limits.max_args);
    Ok(CommandSpec::new(args, redirect))
}
