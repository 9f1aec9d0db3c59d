use crate::content::{decode_content_blocks, parse_payload, raw_to_text};
use crate::error::DecodeError;
use crate::timestamp::{parse_required_timestamp, parse_timestamp};
use agentlog_types::{ContentBlock, Event, Role, SessionMeta, block_kind};
use serde_json::value::RawValue;
use std::path::PathBuf;

use super::schema::{
    CodexEnvelope, EVENT_MSG, EventMsgPayload, LEGACY_RESPONSE_KINDS, LegacyMeta, RESPONSE_ITEM,
    ResponseItemPayload, SESSION_META, SessionMetaPayload, TAGGED_KINDS, TURN_CONTEXT,
    TurnContextPayload,
};

fn read_envelope(line: &str) -> Result<CodexEnvelope<'_>, DecodeError> {
    serde_json::from_str(line).map_err(DecodeError::Json)
}

fn is_recognized_kind(kind: &str) -> bool {
    TAGGED_KINDS.contains(&kind) || LEGACY_RESPONSE_KINDS.contains(&kind)
}

/// Decode one Codex JSONL line into an event
///
/// Unknown kinds never fail: their payload (or, with no payload, the whole
/// record) is kept as a `json` block.
pub(crate) fn decode_codex_event(line: &str) -> Result<Event, DecodeError> {
    let envelope = read_envelope(line)?;
    let kind = envelope.kind.clone().unwrap_or_default();

    let mut event = Event::new(kind.as_str(), line);
    event.timestamp = envelope.timestamp.as_deref().and_then(parse_timestamp);

    match kind.as_str() {
        SESSION_META => {
            let payload: SessionMetaPayload = parse_payload(SESSION_META, envelope.payload)?;
            event.payload_type = payload.originator;
            event.content = vec![ContentBlock::new(block_kind::ID, payload.id)];
        }
        RESPONSE_ITEM => {
            let payload = envelope
                .payload
                .ok_or_else(|| DecodeError::missing_payload(RESPONSE_ITEM))?;
            decode_response_item(&mut event, RESPONSE_ITEM, payload)?;
        }
        EVENT_MSG => {
            let payload = envelope
                .payload
                .ok_or_else(|| DecodeError::missing_payload(EVENT_MSG))?;
            decode_event_msg(&mut event, payload)?;
        }
        TURN_CONTEXT => {
            let payload: TurnContextPayload = parse_payload(TURN_CONTEXT, envelope.payload)?;
            event.payload_type = TURN_CONTEXT.to_string();
            event.content = vec![ContentBlock::text(format!(
                "Turn: {} - {}",
                payload.turn_id.unwrap_or_default(),
                payload.context.unwrap_or_default()
            ))];
        }
        legacy if LEGACY_RESPONSE_KINDS.contains(&legacy) && envelope.payload.is_none() => {
            let whole: &RawValue = serde_json::from_str(line).map_err(DecodeError::Json)?;
            decode_response_item(&mut event, legacy, whole)?;
        }
        other => {
            tracing::trace!(kind = other, "passing through unknown codex record");
            event.content = match envelope.payload {
                Some(payload) => decode_content_blocks(Some(payload)),
                None => vec![ContentBlock::json(line)],
            };
        }
    }

    Ok(event)
}

fn decode_response_item(
    event: &mut Event,
    kind: &str,
    payload: &RawValue,
) -> Result<(), DecodeError> {
    let item: ResponseItemPayload = serde_json::from_str(payload.get())
        .map_err(|err| DecodeError::payload(kind, err))?;

    let payload_type = item.payload_type.clone().unwrap_or_default();
    event.role = Role::normalize(item.role.as_deref().unwrap_or_default());
    event.payload_type = payload_type.clone();

    match payload_type.as_str() {
        "function_call" | "custom_tool_call" => {
            let name = item.name.clone().unwrap_or_default();
            if name.is_empty() {
                event.content = decode_content_blocks(item.content);
                return Ok(());
            }
            let arguments = item
                .arguments
                .or(item.input)
                .map(raw_to_text)
                .unwrap_or_default();
            event.role = Role::Tool;
            event.content = vec![
                ContentBlock::new(block_kind::FUNCTION_NAME, name),
                ContentBlock::new(block_kind::FUNCTION_ARGUMENTS, arguments),
            ];
        }
        "function_call_output" | "custom_tool_call_output" => {
            event.role = Role::Tool;
            event.content = match item.output {
                Some(output) => vec![ContentBlock::new(
                    block_kind::FUNCTION_OUTPUT,
                    raw_to_text(output),
                )],
                None => decode_content_blocks(item.content),
            };
        }
        "reasoning" => {
            let summaries: Vec<ContentBlock> = item
                .summary
                .unwrap_or_default()
                .into_iter()
                .filter_map(|part| part.text)
                .filter(|text| !text.is_empty())
                .map(|text| ContentBlock::new(block_kind::REASONING, text))
                .collect();
            event.content = if summaries.is_empty() {
                decode_content_blocks(item.content)
            } else {
                summaries
            };
        }
        _ => {
            event.content = decode_content_blocks(item.content);
        }
    }

    Ok(())
}

fn decode_event_msg(event: &mut Event, payload: &RawValue) -> Result<(), DecodeError> {
    let msg: EventMsgPayload = serde_json::from_str(payload.get())
        .map_err(|err| DecodeError::payload(EVENT_MSG, err))?;

    let payload_type = msg.payload_type.clone().unwrap_or_default();
    event.payload_type = payload_type.clone();

    let non_empty = |text: Option<String>| text.filter(|t| !t.is_empty());

    event.content = match payload_type.as_str() {
        "user_message" | "agent_message" => non_empty(msg.content)
            .or_else(|| non_empty(msg.message))
            .map(ContentBlock::text)
            .into_iter()
            .collect(),
        "token_count" => {
            let (input, output) = match msg.info.and_then(|info| info.last_token_usage) {
                Some(usage) => (usage.input_tokens, usage.output_tokens),
                None => (
                    msg.input_tokens.unwrap_or_default(),
                    msg.output_tokens.unwrap_or_default(),
                ),
            };
            vec![ContentBlock::text(format!(
                "Tokens: {} in / {} out",
                input, output
            ))]
        }
        "agent_reasoning" => non_empty(msg.reasoning)
            .or_else(|| non_empty(msg.text))
            .map(ContentBlock::text)
            .into_iter()
            .collect(),
        "turn_aborted" => vec![ContentBlock::text("Turn aborted")],
        _ => decode_content_blocks(Some(payload)),
    };

    Ok(())
}

/// Metadata from a Codex line: tagged `session_meta` first, then the legacy
/// top-level header. `Ok(None)` when the line is neither.
pub(crate) fn decode_codex_meta(line: &str) -> Result<Option<SessionMeta>, DecodeError> {
    let envelope = read_envelope(line)?;
    let kind = envelope.kind.as_deref().unwrap_or_default();

    if kind == SESSION_META {
        let payload: SessionMetaPayload = parse_payload(SESSION_META, envelope.payload)?;
        let ts = if payload.timestamp.is_empty() {
            envelope.timestamp.clone().unwrap_or_default()
        } else {
            payload.timestamp.clone()
        };
        return Ok(Some(SessionMeta {
            id: payload.id,
            path: PathBuf::new(),
            cwd: payload.cwd,
            originator: payload.originator,
            cli_version: payload.cli_version,
            started_at: parse_required_timestamp(&ts)?,
        }));
    }

    if is_recognized_kind(kind) {
        return Ok(None);
    }

    match serde_json::from_str::<LegacyMeta>(line) {
        Ok(legacy) if !legacy.id.is_empty() => Ok(Some(SessionMeta {
            started_at: parse_required_timestamp(&legacy.timestamp)?,
            id: legacy.id,
            path: PathBuf::new(),
            cwd: legacy.cwd,
            originator: legacy.originator,
            cli_version: legacy.cli_version,
        })),
        _ => Ok(None),
    }
}
