use agentlog_types::Event;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid level {0:?}: must be 'conversation' or 'all'")]
pub struct InvalidLevel(pub String);

/// Which decoded events reach the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    /// User and assistant messages only
    #[default]
    Conversation,
    /// Every decoded record
    All,
}

impl Level {
    pub fn accepts(&self, event: &Event) -> bool {
        match self {
            Level::Conversation => event.is_conversation(),
            Level::All => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Conversation => "conversation",
            Level::All => "all",
        }
    }
}

impl FromStr for Level {
    type Err = InvalidLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "conversation" => Ok(Level::Conversation),
            "all" => Ok(Level::All),
            other => Err(InvalidLevel(other.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
