use agentlog_types::Role;
use owo_colors::OwoColorize;

/// ANSI styling for rendered transcripts; a disabled palette returns text untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    enable_color: bool,
}

impl Palette {
    pub fn new(enable_color: bool) -> Self {
        Self { enable_color }
    }

    pub fn index(&self, text: &str) -> String {
        if self.enable_color {
            format!("{}", text.bright_white().bold())
        } else {
            text.to_string()
        }
    }

    pub fn timestamp(&self, text: &str) -> String {
        if self.enable_color {
            format!("{}", text.bright_black())
        } else {
            text.to_string()
        }
    }

    pub fn separator(&self, text: &str) -> String {
        if self.enable_color {
            format!("{}", text.dimmed())
        } else {
            text.to_string()
        }
    }

    pub fn role(&self, role: Role, text: &str) -> String {
        if !self.enable_color {
            return text.to_string();
        }
        match role {
            Role::User => format!("{}", text.yellow()),
            Role::Assistant => format!("{}", text.cyan()),
            Role::Tool | Role::System => format!("{}", text.magenta()),
            Role::Unknown => text.to_string(),
        }
    }
}

/// Header label for an event: its role, or `event` when the role is unknown
pub fn role_label(role: Role) -> &'static str {
    if role.is_unknown() {
        "event"
    } else {
        role.as_str()
    }
}
