/// Collapse all runs of whitespace (including newlines) into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clip a string to at most `max` characters, appending an ellipsis when cut
///
/// `max == 0` means no limit.
pub fn clip(text: &str, max: usize) -> String {
    if max == 0 || text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push('…');
    clipped
}

/// Replace newlines with a literal `\n` so a value fits on one line
pub fn escape_newlines(text: &str) -> String {
    text.replace("\r\n", "\\n").replace('\n', "\\n")
}
