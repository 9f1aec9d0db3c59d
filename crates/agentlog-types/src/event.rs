use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block kinds emitted by the decoders
pub mod block_kind {
    pub const TEXT: &str = "text";
    pub const JSON: &str = "json";
    pub const ID: &str = "id";
    pub const FUNCTION_NAME: &str = "function_name";
    pub const FUNCTION_ARGUMENTS: &str = "function_arguments";
    pub const FUNCTION_OUTPUT: &str = "function_output";
    pub const REASONING: &str = "reasoning";
    pub const THINKING: &str = "thinking";
    pub const TOOL_USE: &str = "tool_use";
    pub const TOOL_INPUT: &str = "tool_input";
    pub const TOOL_RESULT: &str = "tool_result";
    pub const IMAGE: &str = "image";
    pub const SUMMARY: &str = "summary";
}

/// One unit of message content (plain text, a function name, arguments, a JSON dump)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub kind: String,
    pub text: String,
}

impl ContentBlock {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(block_kind::TEXT, text)
    }

    pub fn json(text: impl Into<String>) -> Self {
        Self::new(block_kind::JSON, text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Normalized speaker of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    Tool,
    System,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl Role {
    /// Map a producer role string onto the normalized set.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" | "human" => Role::User,
            "assistant" | "model" => Role::Assistant,
            "tool" | "function" => Role::Tool,
            "system" | "developer" => Role::System,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::System => "system",
            Role::Unknown => "",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Role::Unknown)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, producer-agnostic transcript event
///
/// `raw` holds the source line verbatim; it is never rebuilt from the other fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// `None` when the record carried no (parseable) timestamp
    pub timestamp: Option<DateTime<Utc>>,
    /// Original record discriminator (`response_item`, `event_msg`, `user`, ...)
    pub kind: String,
    pub role: Role,
    /// Producer-specific sub-kind (`message`, `function_call`, `token_count`, ...)
    pub payload_type: String,
    /// Ordered content; the first block is the primary one
    pub content: Vec<ContentBlock>,
    #[serde(skip)]
    pub raw: String,
}

impl Event {
    pub fn new(kind: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            kind: kind.into(),
            role: Role::Unknown,
            payload_type: String::new(),
            content: Vec::new(),
            raw: raw.into(),
        }
    }

    /// True for user and assistant messages; false for metadata, tool, status
    /// and context records.
    pub fn is_conversation(&self) -> bool {
        matches!(self.role, Role::User | Role::Assistant)
    }
}
