//! Whitespace handling shared by the segmenter and the redirection parser.

const FIELD_SEPARATORS: &[char] = &[' ', '\t'];
// The trailing trim also drops line terminators left by the reader.
const TRAILING_BLANKS: &[char] = &[' ', '\t', '\n', '\r'];

/// Strip leading spaces/tabs and trailing spaces/tabs/newlines.
pub fn trim_segment(input: &str) -> &str {
    input
        .trim_start_matches(FIELD_SEPARATORS)
        .trim_end_matches(TRAILING_BLANKS)
}

/// Split on runs of spaces and tabs, keeping at most `max` tokens.
pub fn tokenize(input: &str, max: Option<usize>) -> Vec<String> {
    let tokens = input
        .split(FIELD_SEPARATORS)
        .filter(|token| !token.is_empty())
        .map(str::to_string);
    match max {
        Some(max) => tokens.take(max).collect(),
        None => tokens.collect(),
    }
}

/// Keep at most `max` characters of `input`.
pub fn truncate_chars(input: &str, max: Option<usize>) -> &str {
    let Some(max) = max else {
        return input;
    };
    match input.char_indices().nth(max) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}
