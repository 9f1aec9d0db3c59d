mod parser;
pub(crate) mod schema;

use crate::error::DecodeError;
use crate::traits::{ProbeResult, SessionParser};
use agentlog_types::{Event, SessionMeta};

use self::schema::{ASSISTANT, AUXILIARY_KINDS, ClaudeEnvelope, SYSTEM, USER};

/// Claude Code session decoder (`~/.claude/projects/<project>/<session>.jsonl`)
pub struct ClaudeParser;

impl SessionParser for ClaudeParser {
    fn id(&self) -> &'static str {
        "claude_code"
    }

    fn probe_record(&self, line: &str) -> ProbeResult {
        let Ok(envelope) = serde_json::from_str::<ClaudeEnvelope>(line) else {
            return ProbeResult::NoMatch;
        };
        let Some(kind) = envelope.kind() else {
            return ProbeResult::NoMatch;
        };

        let has_session = envelope.session_id().is_some();
        if has_session && [USER, ASSISTANT, SYSTEM].contains(&kind.as_str()) {
            ProbeResult::match_high()
        } else if AUXILIARY_KINDS.contains(&kind.as_str()) {
            ProbeResult::match_medium()
        } else {
            ProbeResult::NoMatch
        }
    }

    fn decode_meta(&self, line: &str) -> Result<Option<SessionMeta>, DecodeError> {
        parser::decode_claude_meta(line)
    }

    fn decode_event(&self, line: &str) -> Result<Event, DecodeError> {
        parser::decode_claude_event(line)
    }

    fn is_preamble(&self, text: &str) -> bool {
        let text = text.trim_start();
        text.starts_with("<command-") || text.starts_with("<local-command-")
    }
}
