use crate::error::RedirectionFault;
use crate::parse::tokenizer::{tokenize, trim_segment};

/// Split a trimmed segment into its command text and optional target.
pub(crate) fn split_redirection(segment: &str) -> Result<(&str, Option<String>), RedirectionFault> {
    if segment.matches('>').count() > 1 {
        return Err(RedirectionFault::MultipleOperators);
    }
    let Some((command, target)) = segment.split_once('>') else {
        return Ok((segment, None));
    };
    let mut targets = tokenize(trim_segment(target), None);
    match targets.len() {
        0 => Err(RedirectionFault::MissingTarget),
        1 => Ok((command, targets.pop())),
        _ => Err(RedirectionFault::ExtraTargets),
    }
}
