use super::blocks::event_lines;
use super::style::{Palette, role_label};
use super::wrap::display_width;
use agentlog_types::Event;
use chrono::SecondsFormat;
use std::io::{self, Write};

/// Header-and-margin transcript renderer
///
/// ```text
/// [#001] user | 2025-10-01T12:00:05Z
/// ----------------------------------
/// | Add a --limit flag to the list command
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    wrap: usize,
    palette: Palette,
}

impl TextRenderer {
    /// `wrap == 0` disables wrapping
    pub fn new(wrap: usize, palette: Palette) -> Self {
        Self { wrap, palette }
    }

    /// Write one event at 1-based display `index`
    pub fn write_event(&self, out: &mut dyn Write, event: &Event, index: usize) -> io::Result<()> {
        let role = role_label(event.role);
        let timestamp = event
            .timestamp
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "-".to_string());

        let plain_header = format!("[#{:03}] {} | {}", index, role, timestamp);
        writeln!(
            out,
            "[{}] {} {} {}",
            self.palette.index(&format!("#{:03}", index)),
            self.palette.role(event.role, role),
            self.palette.separator("|"),
            self.palette.timestamp(&timestamp)
        )?;
        writeln!(out, "{}", "-".repeat(display_width(&plain_header)))?;

        let bar = self.palette.separator("|");
        let lines = event_lines(event, self.wrap);
        if lines.is_empty() {
            return writeln!(out, "{} (no content)", bar);
        }

        for line in lines {
            if line.is_empty() {
                writeln!(out, "{}", bar)?;
            } else {
                writeln!(out, "{} {}", bar, line)?;
            }
        }
        Ok(())
    }

    /// Write events numbered from 1, separated by a blank line
    pub fn write_all<'a, I>(&self, out: &mut dyn Write, events: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        for (i, event) in events.into_iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            self.write_event(out, event, i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentlog_types::{ContentBlock, Role};
    use chrono::{TimeZone, Utc};

    fn render(renderer: TextRenderer, events: &[Event]) -> String {
        let mut out = Vec::new();
        renderer.write_all(&mut out, events).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn user_event(text: &str) -> Event {
        let mut event = Event::new("response_item", "");
        event.role = Role::User;
        event.timestamp = Some(Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 5).unwrap());
        event.content = vec![ContentBlock::text(text)];
        event
    }

    #[test]
    fn test_header_rule_and_margin() {
        let output = render(
            TextRenderer::new(0, Palette::new(false)),
            &[user_event("first line\n\nsecond line")],
        );
        assert_eq!(
            output,
            "[#001] user | 2025-10-01T12:00:05Z\n\
             ----------------------------------\n\
             | first line\n\
             |\n\
             | second line\n"
        );
    }

    #[test]
    fn test_unknown_role_without_timestamp_or_content() {
        let output = render(
            TextRenderer::new(0, Palette::new(false)),
            &[user_event("hi"), Event::new("compacted", "{}")],
        );
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "[#002] event | -");
        assert_eq!(lines[5], "----------------");
        assert_eq!(lines[6], "| (no content)");
    }

    #[test]
    fn test_wraps_body() {
        let output = render(
            TextRenderer::new(10, Palette::new(false)),
            &[user_event("the quick brown fox")],
        );
        assert!(output.ends_with("| the quick\n| brown fox\n"));
    }

    #[test]
    fn test_color_does_not_change_rule_width() {
        let plain = render(TextRenderer::new(0, Palette::new(false)), &[user_event("hi")]);
        let colored = render(TextRenderer::new(0, Palette::new(true)), &[user_event("hi")]);

        let plain_rule = plain.lines().nth(1).unwrap();
        let colored_rule = colored.lines().nth(1).unwrap();
        assert_eq!(plain_rule, colored_rule);
        assert!(colored.lines().next().unwrap().contains("\u{1b}["));
    }
}
