mod parser;
pub(crate) mod schema;

use crate::error::DecodeError;
use crate::traits::{ProbeResult, SessionParser};
use agentlog_types::{Event, SessionMeta};

use self::schema::{CodexEnvelope, LEGACY_RESPONSE_KINDS, TAGGED_KINDS};

/// Prefixes of user messages the Codex CLI injects before the real prompt
const PREAMBLE_PREFIXES: &[&str] = &["<environment_context>", "<user_instructions>", "# AGENTS.md"];

/// Codex CLI session decoder (tagged `payload` schema and the older top-level one)
pub struct CodexParser;

impl SessionParser for CodexParser {
    fn id(&self) -> &'static str {
        "codex"
    }

    fn probe_record(&self, line: &str) -> ProbeResult {
        let Ok(envelope) = serde_json::from_str::<CodexEnvelope>(line) else {
            return ProbeResult::NoMatch;
        };

        match envelope.kind.as_deref() {
            Some(kind) if TAGGED_KINDS.contains(&kind) && envelope.payload.is_some() => {
                ProbeResult::match_high()
            }
            Some(kind) if LEGACY_RESPONSE_KINDS.contains(&kind) => ProbeResult::match_medium(),
            None if parser::decode_codex_meta(line).is_ok_and(|meta| meta.is_some()) => {
                ProbeResult::match_medium()
            }
            _ => ProbeResult::NoMatch,
        }
    }

    fn decode_meta(&self, line: &str) -> Result<Option<SessionMeta>, DecodeError> {
        parser::decode_codex_meta(line)
    }

    fn decode_event(&self, line: &str) -> Result<Event, DecodeError> {
        parser::decode_codex_event(line)
    }

    fn is_preamble(&self, text: &str) -> bool {
        let text = text.trim_start();
        PREAMBLE_PREFIXES
            .iter()
            .any(|prefix| text.starts_with(prefix))
    }
}
