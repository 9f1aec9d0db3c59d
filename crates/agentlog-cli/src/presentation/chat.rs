use super::blocks::event_lines;
use super::style::{Palette, role_label};
use super::wrap::display_width;
use agentlog_types::{Event, Role};

/// Columns kept free on the side a bubble does not hug
const BUBBLE_MARGIN: usize = 3;
/// Left indent of assistant bubbles
const ASSISTANT_INDENT: usize = 2;
/// Border plus inner padding: `│ ` and ` │`
const BOX_CHROME: usize = 4;

/// Speech-bubble transcript layout
///
/// User messages are right-aligned, assistant messages indented by two
/// columns, every other role is printed as a plain block.
#[derive(Debug, Clone, Copy)]
pub struct ChatRenderer {
    width: usize,
    palette: Palette,
}

impl ChatRenderer {
    pub fn new(width: usize, palette: Palette) -> Self {
        Self { width, palette }
    }

    /// Lay out `events` into display lines, a blank line between events
    pub fn render(&self, events: &[Event]) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, event) in events.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            match event.role {
                Role::User | Role::Assistant => self.render_bubble(event, &mut lines),
                _ => self.render_plain(event, &mut lines),
            }
        }
        lines
    }

    fn max_inner_width(&self, role: Role) -> usize {
        let indent = if role == Role::Assistant { ASSISTANT_INDENT } else { 0 };
        self.width
            .saturating_sub(indent + BUBBLE_MARGIN + BOX_CHROME)
            .max(1)
    }

    fn render_bubble(&self, event: &Event, lines: &mut Vec<String>) {
        let role = event.role;

        // Wrap first; the box is sized from the wrapped lines
        let mut body = event_lines(event, self.max_inner_width(role));
        if body.is_empty() {
            body.push("(no content)".to_string());
        }
        let inner = body.iter().map(|l| display_width(l)).max().unwrap_or(0);
        let box_width = inner + BOX_CHROME;

        let lead = match role {
            Role::User => " ".repeat(self.width.saturating_sub(box_width)),
            _ => " ".repeat(ASSISTANT_INDENT),
        };

        let label = self.label(event);
        let label_pad = match role {
            Role::User => self.width.saturating_sub(display_width(&label)),
            _ => ASSISTANT_INDENT,
        };
        lines.push(format!(
            "{}{}",
            " ".repeat(label_pad),
            self.palette.role(role, &label)
        ));

        let rule = "─".repeat(inner + 2);
        let border = |text: &str| self.palette.role(role, text);

        lines.push(format!("{}{}", lead, border(&format!("╭{}╮", rule))));
        for line in &body {
            let pad = " ".repeat(inner - display_width(line));
            lines.push(format!(
                "{}{} {}{} {}",
                lead,
                border("│"),
                line,
                pad,
                border("│")
            ));
        }
        lines.push(format!("{}{}", lead, border(&format!("╰{}╯", rule))));
    }

    fn render_plain(&self, event: &Event, lines: &mut Vec<String>) {
        lines.push(self.palette.role(event.role, &self.label(event)));

        let body = event_lines(event, self.width);
        if body.is_empty() {
            lines.push("(no content)".to_string());
        } else {
            lines.extend(body);
        }
    }

    fn label(&self, event: &Event) -> String {
        let role = role_label(event.role);
        match event.timestamp {
            Some(ts) => format!("{} · {}", role, ts.format("%H:%M:%S")),
            None => role.to_string(),
        }
    }
}
