use serde::Deserialize;
use serde_json::value::RawValue;

pub(crate) const USER: &str = "user";
pub(crate) const ASSISTANT: &str = "assistant";
pub(crate) const SYSTEM: &str = "system";
pub(crate) const SUMMARY: &str = "summary";

/// Record kinds that only Claude Code writes, with or without a session id
pub(crate) const AUXILIARY_KINDS: &[&str] = &[SUMMARY, "file-history-snapshot", "queue-operation"];

/// Fields read from every Claude Code record, kept raw
///
/// Unknown record kinds may reuse any of these names with another JSON type;
/// reading the envelope never fails on that. Typed fields live in the
/// per-kind records below.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClaudeEnvelope<'a> {
    #[serde(default, rename = "type", borrow)]
    pub kind: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub timestamp: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub session_id: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub cwd: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub version: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub entrypoint: Option<&'a RawValue>,
}

impl ClaudeEnvelope<'_> {
    pub fn kind(&self) -> Option<String> {
        lenient_string(self.kind)
    }

    pub fn timestamp(&self) -> Option<String> {
        lenient_string(self.timestamp)
    }

    pub fn session_id(&self) -> Option<String> {
        lenient_string(self.session_id).filter(|id| !id.is_empty())
    }
}

/// The string held by `raw`; `None` when absent or any other JSON type
pub(crate) fn lenient_string(raw: Option<&RawValue>) -> Option<String> {
    raw.and_then(|raw| serde_json::from_str::<String>(raw.get()).ok())
}

/// `user` and `assistant` records
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageRecord<'a> {
    #[serde(default, borrow)]
    pub message: Option<&'a RawValue>,
    #[serde(default)]
    pub is_meta: Option<bool>,
}

/// `system` records keep their text at the top level
#[derive(Debug, Deserialize)]
pub(crate) struct SystemRecord<'a> {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default, borrow)]
    pub content: Option<&'a RawValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryRecord {
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClaudeMessage<'a> {
    #[serde(default, borrow)]
    pub content: Option<&'a RawValue>,
}

/// One element of `message.content`; fields are optional so any block type parses
#[derive(Debug, Deserialize)]
pub(crate) struct ClaudeBlock<'a> {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thinking: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, borrow)]
    pub input: Option<&'a RawValue>,
    #[serde(default, borrow)]
    pub content: Option<&'a RawValue>,
}

/// Text part inside an array-shaped `tool_result` content
#[derive(Debug, Deserialize)]
pub(crate) struct TextPart {
    #[serde(default, rename = "type")]
    pub part_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}
