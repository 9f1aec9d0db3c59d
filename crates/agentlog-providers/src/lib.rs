// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Provider implementations
pub mod claude;
pub mod codex;

// Line scanning and the reader operations shared by every provider
pub mod reader;

// Provider registry
pub mod registry;

// Walking session directories
pub mod discovery;

mod content;
mod timestamp;

// Traits
pub use traits::{ProbeResult, SessionParser};

// Reader
pub use reader::{
    LineScanner, RawLine, SessionReader, iterate_events, read_session_meta, summarize,
};

// Registry
pub use registry::{
    ProviderMetadata, all_parsers, create_parser, default_log_path, detect_parser,
    expand_home_path, get_provider_metadata, get_provider_names,
};

// Discovery
pub use discovery::{ListOptions, ListResult, find_session_files, find_session_path, list_sessions};

pub use claude::ClaudeParser;
pub use codex::CodexParser;

// Error types
pub use error::{DecodeError, Error, Result};
