use std::path::PathBuf;
use thiserror::Error;

/// Result type for agentlog-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to decode a single line
///
/// Only malformed JSON or a payload of the wrong shape for a *recognized*
/// record kind end up here. Unknown kinds always decode.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed JSON record: {0}")]
    Json(#[source] serde_json::Error),

    #[error("line is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{kind} record has no payload")]
    MissingPayload { kind: String },

    #[error("unexpected {kind} payload: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata record has no timestamp")]
    MissingTimestamp,

    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),
}

impl DecodeError {
    pub(crate) fn payload(kind: &str, source: serde_json::Error) -> Self {
        DecodeError::Payload {
            kind: kind.to_string(),
            source,
        }
    }

    pub(crate) fn missing_payload(kind: &str) -> Self {
        DecodeError::MissingPayload {
            kind: kind.to_string(),
        }
    }
}

/// Error types that can occur in the providers layer
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be decoded; the scan of this file stopped here
    #[error("{}:{line} (byte offset {offset}): {source}", .path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        offset: u64,
        #[source]
        source: DecodeError,
    },

    /// The whole file was scanned without finding a metadata record
    #[error("no session metadata found in {}", .0.display())]
    MetaNotFound(PathBuf),

    /// The per-event callback asked to stop
    #[error(transparent)]
    Callback(anyhow::Error),

    #[error("session id {id} not found under {}", .root.display())]
    SessionNotFound { id: String, root: PathBuf },

    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

impl Error {
    /// True when the scan stopped because the caller's callback returned an error
    pub fn is_callback(&self) -> bool {
        matches!(self, Error::Callback(_))
    }

    pub fn is_meta_not_found(&self) -> bool {
        matches!(self, Error::MetaNotFound(_))
    }

    /// Recover the caller's own error from a callback stop
    pub fn into_callback(self) -> std::result::Result<anyhow::Error, Self> {
        match self {
            Error::Callback(err) => Ok(err),
            other => Err(other),
        }
    }
}
