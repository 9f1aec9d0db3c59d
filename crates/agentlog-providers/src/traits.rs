use crate::error::{DecodeError, Result};
use agentlog_types::{Event, SessionMeta, SessionSummary};
use std::path::Path;

/// Decoding contract shared by every producer family
///
/// Implementations are pure line decoders. File access, line splitting and
/// error context live in [`crate::reader`]; the provided methods route through
/// it so callers only ever hold a `dyn SessionParser`.
pub trait SessionParser: Send + Sync {
    /// Unique provider ID (e.g., "codex", "claude_code")
    fn id(&self) -> &'static str;

    /// How confident this provider is that `line` belongs to one of its files
    fn probe_record(&self, line: &str) -> ProbeResult;

    /// Classify a line as metadata.
    ///
    /// `Ok(None)` means "not a metadata record"; scanning continues.
    fn decode_meta(&self, line: &str) -> std::result::Result<Option<SessionMeta>, DecodeError>;

    /// Decode one line into exactly one event
    fn decode_event(&self, line: &str) -> std::result::Result<Event, DecodeError>;

    /// Whether a user message is injected context rather than something the user typed
    fn is_preamble(&self, _text: &str) -> bool {
        false
    }

    /// Metadata from the first metadata-bearing record of `path`
    fn read_session_meta(&self, path: &Path) -> Result<SessionMeta> {
        crate::reader::read_session_meta(self, path)
    }

    /// Decode every line of `path` in order, handing each event to `on_event`
    fn iterate_events(
        &self,
        path: &Path,
        on_event: &mut dyn FnMut(Event) -> anyhow::Result<()>,
    ) -> Result<()> {
        crate::reader::iterate_events(self, path, on_event)
    }

    /// Metadata plus first user message, message count and duration
    fn summarize(&self, path: &Path) -> Result<SessionSummary> {
        crate::reader::summarize(self, path)
    }
}

// --- Helper types ---

/// Probe result with confidence score
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeResult {
    /// Provider can handle this record with given confidence (0.0 - 1.0)
    Confidence(f32),
    /// Provider cannot handle this record
    NoMatch,
}

impl ProbeResult {
    /// Create high confidence match (1.0)
    pub fn match_high() -> Self {
        ProbeResult::Confidence(1.0)
    }

    /// Create medium confidence match (0.5)
    pub fn match_medium() -> Self {
        ProbeResult::Confidence(0.5)
    }

    /// Get confidence score (0.0 if NoMatch)
    pub fn confidence(&self) -> f32 {
        match self {
            ProbeResult::Confidence(c) => *c,
            ProbeResult::NoMatch => 0.0,
        }
    }
}
