use serde::Deserialize;
use serde_json::value::RawValue;

pub(crate) const SESSION_META: &str = "session_meta";
pub(crate) const RESPONSE_ITEM: &str = "response_item";
pub(crate) const EVENT_MSG: &str = "event_msg";
pub(crate) const TURN_CONTEXT: &str = "turn_context";

/// Top-level kinds of the tagged (payload-wrapped) schema
pub(crate) const TAGGED_KINDS: &[&str] = &[SESSION_META, RESPONSE_ITEM, EVENT_MSG, TURN_CONTEXT];

/// Response items written at the top level, before records were wrapped in `payload`
pub(crate) const LEGACY_RESPONSE_KINDS: &[&str] = &[
    "message",
    "function_call",
    "function_call_output",
    "custom_tool_call",
    "custom_tool_call_output",
    "reasoning",
];

/// Envelope read before anything else: discriminator, timestamp, opaque payload
#[derive(Debug, Deserialize)]
pub(crate) struct CodexEnvelope<'a> {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, borrow)]
    pub payload: Option<&'a RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SessionMetaPayload {
    pub id: String,
    pub timestamp: String,
    pub cwd: String,
    pub originator: String,
    pub cli_version: String,
}

/// Pre-`session_meta` header: the same fields at the top level, no `type`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LegacyMeta {
    pub id: String,
    pub timestamp: String,
    pub cwd: String,
    pub originator: String,
    pub cli_version: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseItemPayload<'a> {
    #[serde(default, rename = "type")]
    pub payload_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, borrow)]
    pub arguments: Option<&'a RawValue>,
    /// Custom tool calls carry their input here instead of `arguments`
    #[serde(default, borrow)]
    pub input: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub output: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub content: Option<&'a RawValue>,
    #[serde(default)]
    pub summary: Option<Vec<SummaryText>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EventMsgPayload {
    #[serde(rename = "type")]
    pub payload_type: Option<String>,
    pub content: Option<String>,
    pub message: Option<String>,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub reasoning: Option<String>,
    pub text: Option<String>,
    pub info: Option<TokenInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TokenInfo {
    pub last_token_usage: Option<TokenUsage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TurnContextPayload {
    pub turn_id: Option<String>,
    pub context: Option<String>,
}
