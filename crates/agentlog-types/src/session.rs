use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Session metadata taken from the first metadata-bearing record of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMeta {
    pub id: String,
    pub path: PathBuf,
    pub cwd: String,
    pub originator: String,
    pub cli_version: String,
    pub started_at: DateTime<Utc>,
}

impl SessionMeta {
    /// Equality on the semantic fields, ignoring where the file lives
    pub fn same_session(&self, other: &SessionMeta) -> bool {
        self.id == other.id
            && self.cwd == other.cwd
            && self.originator == other.originator
            && self.cli_version == other.cli_version
            && self.started_at == other.started_at
    }
}

/// Session metadata plus the results of a full summarizing pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub path: PathBuf,
    pub cwd: String,
    pub originator: String,
    pub cli_version: String,
    pub started_at: DateTime<Utc>,
    /// First user message, whitespace-collapsed and clipped
    pub summary: String,
    /// Number of conversation-bearing records
    pub message_count: usize,
    pub last_timestamp: Option<DateTime<Utc>>,
    pub duration_seconds: u64,
}

impl SessionSummary {
    pub fn from_meta(
        meta: SessionMeta,
        summary: String,
        message_count: usize,
        last_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let duration_seconds = match last_timestamp {
            Some(last) if last > meta.started_at => {
                (last - meta.started_at).num_seconds().max(0) as u64
            }
            _ => 0,
        };

        Self {
            id: meta.id,
            path: meta.path,
            cwd: meta.cwd,
            originator: meta.originator,
            cli_version: meta.cli_version,
            started_at: meta.started_at,
            summary,
            message_count,
            last_timestamp,
            duration_seconds,
        }
    }
}
