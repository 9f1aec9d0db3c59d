use crate::error::DecodeError;
use agentlog_types::ContentBlock;
use serde::Deserialize;
use serde_json::value::RawValue;

#[derive(Deserialize)]
struct BlockShape {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Generic content decoding: an array of `{type, text}` blocks wins, a bare
/// string is the fallback, anything else becomes one `json` block holding the
/// payload verbatim.
pub(crate) fn decode_content_blocks(raw: Option<&RawValue>) -> Vec<ContentBlock> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    if let Ok(array) = serde_json::from_str::<Vec<BlockShape>>(raw.get()) {
        return array
            .into_iter()
            .map(|block| {
                ContentBlock::new(block.kind.unwrap_or_default(), block.text.unwrap_or_default())
            })
            .collect();
    }

    if let Ok(text) = serde_json::from_str::<String>(raw.get()) {
        return vec![ContentBlock::text(text)];
    }

    vec![ContentBlock::json(raw.get())]
}

/// A JSON string as its decoded text, any other value as its raw JSON
pub(crate) fn raw_to_text(raw: &RawValue) -> String {
    serde_json::from_str::<String>(raw.get()).unwrap_or_else(|_| raw.get().to_string())
}

/// Deserialize the payload of a recognized record kind
pub(crate) fn parse_payload<'a, T: Deserialize<'a>>(
    kind: &str,
    payload: Option<&'a RawValue>,
) -> Result<T, DecodeError> {
    let payload = payload.ok_or_else(|| DecodeError::missing_payload(kind))?;
    serde_json::from_str(payload.get()).map_err(|err| DecodeError::payload(kind, err))
}
