use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Greedy word wrap at `width` columns
///
/// Explicit newlines are kept (an empty line stays empty). Words wider than
/// `width` are split at character boundaries. `width == 0` only splits on
/// newlines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        if width == 0 {
            lines.push(paragraph.to_string());
        } else {
            wrap_paragraph(paragraph, width, &mut lines);
        }
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    if paragraph.trim().is_empty() {
        lines.push(String::new());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
        let word_width = display_width(word);

        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }

        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
}
