use super::wrap::wrap_text;
use agentlog_types::{ContentBlock, Event, block_kind};

/// Block kinds printed with a `[kind]` label; message text of any other kind
/// (`text`, `input_text`, `output_text`, `json`, ...) prints as-is
const LABELED_KINDS: &[&str] = &[
    block_kind::FUNCTION_NAME,
    block_kind::FUNCTION_ARGUMENTS,
    block_kind::FUNCTION_OUTPUT,
    block_kind::TOOL_USE,
    block_kind::TOOL_INPUT,
    block_kind::TOOL_RESULT,
    block_kind::REASONING,
    block_kind::THINKING,
];

/// Body lines of an event, each block wrapped to `width` (0 = no wrapping)
///
/// Blocks are separated by an empty line. Labeled kinds carry their kind on
/// the first line (`[function_name] shell`). Returns no lines when every block
/// is empty.
pub fn event_lines(event: &Event, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for block in event.content.iter().filter(|b| !b.text.trim().is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(wrap_text(&block_text(block), width));
    }
    lines
}

fn block_text(block: &ContentBlock) -> String {
    let text = block.text.trim_end();
    if LABELED_KINDS.contains(&block.kind.as_str()) {
        format!("[{}] {}", block.kind, text)
    } else {
        text.to_string()
    }
}
