use crate::content::raw_to_text;
use crate::error::DecodeError;
use crate::timestamp::{parse_required_timestamp, parse_timestamp};
use agentlog_types::{ContentBlock, Event, Role, SessionMeta, block_kind};
use serde_json::value::RawValue;
use std::path::PathBuf;

use super::schema::{
    ASSISTANT, ClaudeBlock, ClaudeEnvelope, ClaudeMessage, MessageRecord, SUMMARY, SYSTEM,
    SummaryRecord, SystemRecord, TextPart, USER, lenient_string,
};

const DEFAULT_ORIGINATOR: &str = "claude_code";

/// Any well-formed JSON line yields an envelope; only malformed JSON fails
fn read_envelope(line: &str) -> Result<ClaudeEnvelope<'_>, DecodeError> {
    match serde_json::from_str(line) {
        Ok(envelope) => Ok(envelope),
        Err(_) => serde_json::from_str::<&RawValue>(line)
            .map(|_| ClaudeEnvelope::default())
            .map_err(DecodeError::Json),
    }
}

fn read_record<'a, T: serde::Deserialize<'a>>(line: &'a str, kind: &str) -> Result<T, DecodeError> {
    serde_json::from_str(line).map_err(|err| DecodeError::payload(kind, err))
}

pub(crate) fn decode_claude_event(line: &str) -> Result<Event, DecodeError> {
    let envelope = read_envelope(line)?;
    let kind = envelope.kind().unwrap_or_default();

    let mut event = Event::new(kind.as_str(), line);
    event.timestamp = envelope.timestamp().as_deref().and_then(parse_timestamp);

    match kind.as_str() {
        USER | ASSISTANT => {
            let record: MessageRecord = read_record(line, &kind)?;
            let raw = record
                .message
                .ok_or_else(|| DecodeError::missing_payload(&kind))?;
            let message: ClaudeMessage = serde_json::from_str(raw.get())
                .map_err(|err| DecodeError::payload(&kind, err))?;

            event.content = decode_message_content(message.content);
            event.payload_type = event
                .content
                .first()
                .map(|block| block.kind.clone())
                .unwrap_or_default();
            event.role = if kind == ASSISTANT {
                Role::Assistant
            } else if record.is_meta.unwrap_or(false) {
                Role::System
            } else if !event.content.is_empty()
                && event
                    .content
                    .iter()
                    .all(|block| block.kind == block_kind::TOOL_RESULT)
            {
                Role::Tool
            } else {
                Role::User
            };
        }
        SYSTEM => {
            let record: SystemRecord = read_record(line, &kind)?;
            event.role = Role::System;
            event.payload_type = record.subtype.unwrap_or_default();
            event.content = match record.content {
                Some(content) => vec![ContentBlock::text(raw_to_text(content))],
                None => Vec::new(),
            };
        }
        SUMMARY => {
            let record: SummaryRecord = read_record(line, &kind)?;
            event.role = Role::System;
            event.payload_type = SUMMARY.to_string();
            event.content = record
                .summary
                .map(|text| ContentBlock::new(block_kind::SUMMARY, text))
                .into_iter()
                .collect();
        }
        other => {
            tracing::trace!(kind = other, "passing through unknown claude record");
            event.content = vec![ContentBlock::json(line)];
        }
    }

    Ok(event)
}

/// `message.content`: a bare string, or an array of typed blocks
fn decode_message_content(raw: Option<&RawValue>) -> Vec<ContentBlock> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    if let Ok(text) = serde_json::from_str::<String>(raw.get()) {
        return vec![ContentBlock::text(text)];
    }

    let Ok(elements) = serde_json::from_str::<Vec<&RawValue>>(raw.get()) else {
        return vec![ContentBlock::json(raw.get())];
    };

    let mut blocks = Vec::with_capacity(elements.len());
    for element in elements {
        match serde_json::from_str::<ClaudeBlock>(element.get()) {
            Ok(block) => push_block(&mut blocks, block, element),
            Err(_) => blocks.push(ContentBlock::json(element.get())),
        }
    }
    blocks
}

fn push_block(blocks: &mut Vec<ContentBlock>, block: ClaudeBlock<'_>, element: &RawValue) {
    match block.block_type.as_str() {
        "text" => blocks.push(ContentBlock::text(block.text.unwrap_or_default())),
        "thinking" => blocks.push(ContentBlock::new(
            block_kind::THINKING,
            block.thinking.unwrap_or_default(),
        )),
        "tool_use" => {
            blocks.push(ContentBlock::new(
                block_kind::TOOL_USE,
                block.name.unwrap_or_default(),
            ));
            blocks.push(ContentBlock::new(
                block_kind::TOOL_INPUT,
                block.input.map(|input| input.get().to_string()).unwrap_or_default(),
            ));
        }
        "tool_result" => blocks.push(ContentBlock::new(
            block_kind::TOOL_RESULT,
            block.content.map(tool_result_text).unwrap_or_default(),
        )),
        "image" => blocks.push(ContentBlock::new(block_kind::IMAGE, "[image]")),
        _ => blocks.push(ContentBlock::json(element.get())),
    }
}

/// String content as-is; an array of parts joined by their `text` fields
fn tool_result_text(raw: &RawValue) -> String {
    if let Ok(parts) = serde_json::from_str::<Vec<TextPart>>(raw.get()) {
        return parts
            .into_iter()
            .filter(|part| part.part_type.as_deref().is_none_or(|t| t == "text"))
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n");
    }
    raw_to_text(raw)
}

/// The first record carrying a `sessionId` describes the session
pub(crate) fn decode_claude_meta(line: &str) -> Result<Option<SessionMeta>, DecodeError> {
    let envelope = read_envelope(line)?;

    let Some(id) = envelope.session_id() else {
        return Ok(None);
    };

    let started_at = parse_required_timestamp(envelope.timestamp().as_deref().unwrap_or_default())?;
    Ok(Some(SessionMeta {
        id,
        path: PathBuf::new(),
        cwd: lenient_string(envelope.cwd).unwrap_or_default(),
        originator: lenient_string(envelope.entrypoint)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ORIGINATOR.to_string()),
        cli_version: lenient_string(envelope.version).unwrap_or_default(),
        started_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_string_content() {
        let line = r#"{"parentUuid":null,"isSidechain":false,"userType":"external","cwd":"/work/app","sessionId":"abc","version":"2.0.14","type":"user","message":{"role":"user","content":"rename the module"},"uuid":"u1","timestamp":"2025-10-12T08:00:01.000Z"}"#;
        let event = decode_claude_event(line).unwrap();
        assert_eq!(event.kind, "user");
        assert_eq!(event.role, Role::User);
        assert_eq!(event.payload_type, "text");
        assert_eq!(event.content, vec![ContentBlock::text("rename the module")]);
        assert!(event.is_conversation());
    }

    #[test]
    fn test_assistant_blocks() {
        let line = r#"{"type":"assistant","sessionId":"abc","timestamp":"2025-10-12T08:00:02Z","message":{"role":"assistant","model":"claude-sonnet-4-5","content":[{"type":"thinking","thinking":"look first","signature":"x"},{"type":"text","text":"Checking."},{"type":"tool_use","id":"toolu_1","name":"Bash","input":{"command":"ls"}}]}}"#;
        let event = decode_claude_event(line).unwrap();
        assert_eq!(event.role, Role::Assistant);
        assert_eq!(event.payload_type, "thinking");
        assert_eq!(
            event.content,
            vec![
                ContentBlock::new(block_kind::THINKING, "look first"),
                ContentBlock::text("Checking."),
                ContentBlock::new(block_kind::TOOL_USE, "Bash"),
                ContentBlock::new(block_kind::TOOL_INPUT, r#"{"command":"ls"}"#),
            ]
        );
    }

    #[test]
    fn test_tool_result_record_is_tool_role() {
        let line = r#"{"type":"user","sessionId":"abc","timestamp":"2025-10-12T08:00:03Z","message":{"role":"user","content":[{"tool_use_id":"toolu_1","type":"tool_result","content":"src\nCargo.toml","is_error":false}]}}"#;
        let event = decode_claude_event(line).unwrap();
        assert_eq!(event.role, Role::Tool);
        assert!(!event.is_conversation());
        assert_eq!(
            event.content,
            vec![ContentBlock::new(block_kind::TOOL_RESULT, "src\nCargo.toml")]
        );
    }

    #[test]
    fn test_tool_result_array_content_joined() {
        let line = r#"{"type":"user","sessionId":"abc","timestamp":"2025-10-12T08:00:03Z","message":{"role":"user","content":[{"type":"tool_result","tool_use_id":"t","content":[{"type":"text","text":"one"},{"type":"text","text":"two"}]}]}}"#;
        let event = decode_claude_event(line).unwrap();
        assert_eq!(event.content[0].text, "one\ntwo");
    }

    #[test]
    fn test_meta_user_record_is_system() {
        let line = r#"{"type":"user","isMeta":true,"sessionId":"abc","timestamp":"2025-10-12T08:00:00Z","message":{"role":"user","content":"<command-name>/clear</command-name>"}}"#;
        let event = decode_claude_event(line).unwrap();
        assert_eq!(event.role, Role::System);
    }

    #[test]
    fn test_image_and_unknown_blocks() {
        let line = r#"{"type":"user","sessionId":"abc","timestamp":"2025-10-12T08:00:00Z","message":{"role":"user","content":[{"type":"image","source":{"type":"base64","data":"AAAA"}},{"type":"document","title":"spec"},{"type":"text","text":"what is this?"}]}}"#;
        let event = decode_claude_event(line).unwrap();
        assert_eq!(event.role, Role::User);
        assert_eq!(
            event.content,
            vec![
                ContentBlock::new(block_kind::IMAGE, "[image]"),
                ContentBlock::json(r#"{"type":"document","title":"spec"}"#),
                ContentBlock::text("what is this?"),
            ]
        );
    }

    #[test]
    fn test_system_and_summary_records() {
        let system = r#"{"type":"system","subtype":"compact_boundary","content":"Conversation compacted","sessionId":"abc","timestamp":"2025-10-12T09:00:00Z","level":"info"}"#;
        let event = decode_claude_event(system).unwrap();
        assert_eq!(event.role, Role::System);
        assert_eq!(event.payload_type, "compact_boundary");
        assert_eq!(event.content, vec![ContentBlock::text("Conversation compacted")]);

        let summary = r#"{"type":"summary","summary":"Renaming modules","leafUuid":"l1"}"#;
        let event = decode_claude_event(summary).unwrap();
        assert_eq!(event.role, Role::System);
        assert!(event.timestamp.is_none());
        assert_eq!(
            event.content,
            vec![ContentBlock::new(block_kind::SUMMARY, "Renaming modules")]
        );
    }

    #[test]
    fn test_unknown_record_kept_whole() {
        let line = r#"{"type":"file-history-snapshot","messageId":"m1","snapshot":{"files":[]}}"#;
        let event = decode_claude_event(line).unwrap();
        assert_eq!(event.role, Role::Unknown);
        assert_eq!(event.content, vec![ContentBlock::json(line)]);
    }

    #[test]
    fn test_unknown_record_fields_of_any_type() {
        for line in [
            r#"{"type":"progress","summary":{"steps":3}}"#,
            r#"{"type":"queue-operation","isMeta":null,"cwd":7,"version":[2]}"#,
            r#"{"type":"x-new","timestamp":1728720000,"subtype":{"a":1},"content":null}"#,
            r#"{"type":{"nested":true},"sessionId":false}"#,
            r#"[1,2,3]"#,
        ] {
            let event = decode_claude_event(line).unwrap();
            assert_eq!(event.role, Role::Unknown, "{}", line);
            assert!(event.timestamp.is_none());
            assert_eq!(event.content, vec![ContentBlock::json(line)]);
            assert_eq!(event.raw, line);
            assert!(decode_claude_meta(line).unwrap().is_none());
        }
    }

    #[test]
    fn test_null_is_meta_on_user_record() {
        let line = r#"{"type":"user","isMeta":null,"sessionId":"abc","timestamp":"2025-10-12T08:00:00Z","message":{"role":"user","content":"hi"}}"#;
        assert_eq!(decode_claude_event(line).unwrap().role, Role::User);
    }

    #[test]
    fn test_message_errors() {
        assert!(matches!(
            decode_claude_event(r#"{"type":"user","sessionId":"abc"}"#),
            Err(DecodeError::MissingPayload { .. })
        ));
        assert!(matches!(
            decode_claude_event(r#"{"type":"assistant","message":"nope"}"#),
            Err(DecodeError::Payload { .. })
        ));
        assert!(matches!(
            decode_claude_event("{\"type\":"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_meta_from_first_session_record() {
        let line = r#"{"type":"user","cwd":"/work/app","sessionId":"abc","version":"2.0.14","timestamp":"2025-10-12T08:00:01.000Z","message":{"role":"user","content":"hi"}}"#;
        let meta = decode_claude_meta(line).unwrap().unwrap();
        assert_eq!(meta.id, "abc");
        assert_eq!(meta.cwd, "/work/app");
        assert_eq!(meta.cli_version, "2.0.14");
        assert_eq!(meta.originator, "claude_code");

        let with_entrypoint = r#"{"type":"user","sessionId":"abc","entrypoint":"cli","timestamp":"2025-10-12T08:00:01Z","message":{"content":"hi"}}"#;
        assert_eq!(
            decode_claude_meta(with_entrypoint).unwrap().unwrap().originator,
            "cli"
        );
    }

    #[test]
    fn test_meta_skips_and_errors() {
        let summary = r#"{"type":"summary","summary":"x","leafUuid":"l1"}"#;
        assert!(decode_claude_meta(summary).unwrap().is_none());

        let untimed = r#"{"type":"user","sessionId":"abc","message":{"content":"hi"}}"#;
        assert!(matches!(
            decode_claude_meta(untimed),
            Err(DecodeError::MissingTimestamp)
        ));
    }
}
