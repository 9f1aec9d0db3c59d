use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Which decoder reads the session file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum AgentChoice {
    /// Probe the file's first records
    #[default]
    Auto,
    Codex,
    Claude,
}

impl AgentChoice {
    /// Provider name for the registry; `None` means detect
    pub fn provider_name(&self) -> Option<&'static str> {
        match self {
            AgentChoice::Auto => None,
            AgentChoice::Codex => Some("codex"),
            AgentChoice::Claude => Some("claude_code"),
        }
    }
}

impl fmt::Display for AgentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentChoice::Auto => write!(f, "auto"),
            AgentChoice::Codex => write!(f, "codex"),
            AgentChoice::Claude => write!(f, "claude"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorChoice::Auto => write!(f, "auto"),
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ListFormat {
    #[default]
    Tsv,
    Plain,
    Json,
    Jsonl,
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFormat::Tsv => write!(f, "tsv"),
            ListFormat::Plain => write!(f, "plain"),
            ListFormat::Json => write!(f, "json"),
            ListFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum InfoFormat {
    #[default]
    Json,
    Text,
}

impl fmt::Display for InfoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoFormat::Json => write!(f, "json"),
            InfoFormat::Text => write!(f, "text"),
        }
    }
}

/// Provider family whose session directory is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProviderName {
    #[default]
    Codex,
    Claude,
}

impl ProviderName {
    pub fn provider_name(&self) -> &'static str {
        match self {
            ProviderName::Codex => "codex",
            ProviderName::Claude => "claude_code",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::Codex => write!(f, "codex"),
            ProviderName::Claude => write!(f, "claude"),
        }
    }
}
