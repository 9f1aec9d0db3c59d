use crate::claude::ClaudeParser;
use crate::codex::CodexParser;
use crate::error::{Error, Result};
use crate::reader::LineScanner;
use crate::traits::SessionParser;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Non-blank lines inspected by [`detect_parser`]
pub const PROBE_LINES: usize = 20;

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub default_log_path: &'static str,
}

const PROVIDERS: &[ProviderMetadata] = &[
    ProviderMetadata {
        name: "codex",
        aliases: &[],
        default_log_path: "~/.codex/sessions",
    },
    ProviderMetadata {
        name: "claude_code",
        aliases: &["claude"],
        default_log_path: "~/.claude/projects",
    },
];

pub fn get_provider_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}

/// Look a provider up by canonical name or alias
pub fn get_provider_metadata(name: &str) -> Option<&'static ProviderMetadata> {
    PROVIDERS
        .iter()
        .find(|p| p.name == name || p.aliases.contains(&name))
}

pub fn expand_home_path(path: &str) -> Option<PathBuf> {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Some(home.join(stripped));
    }
    None
}

/// Default session directory of a provider, `~` expanded
pub fn default_log_path(name: &str) -> Option<PathBuf> {
    get_provider_metadata(name).and_then(|p| expand_home_path(p.default_log_path))
}

/// Create a parser by provider name (`codex`, `claude`, `claude_code`)
pub fn create_parser(name: &str) -> Result<Box<dyn SessionParser>> {
    match get_provider_metadata(name).map(|p| p.name) {
        Some("codex") => Ok(Box::new(CodexParser)),
        Some("claude_code") => Ok(Box::new(ClaudeParser)),
        _ => Err(Error::UnknownProvider(name.to_string())),
    }
}

pub fn all_parsers() -> Vec<Box<dyn SessionParser>> {
    vec![Box::new(CodexParser), Box::new(ClaudeParser)]
}

/// Pick the parser for a file by probing its first records
///
/// Confidence is summed over up to [`PROBE_LINES`] lines; the Codex parser
/// wins ties and files nobody recognizes.
pub fn detect_parser(path: &Path) -> Result<Box<dyn SessionParser>> {
    let parsers = all_parsers();
    let mut scores = vec![0.0_f32; parsers.len()];

    let lines = LineScanner::new(BufReader::new(File::open(path)?));
    for line in lines.take(PROBE_LINES) {
        let line = line?;
        let Ok(text) = std::str::from_utf8(&line.bytes) else {
            continue;
        };
        for (score, parser) in scores.iter_mut().zip(&parsers) {
            *score += parser.probe_record(text).confidence();
        }
    }

    let mut best = 0;
    for (index, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = index;
        }
    }

    let parser = parsers
        .into_iter()
        .nth(best)
        .ok_or_else(|| Error::UnknownProvider(path.display().to_string()))?;
    tracing::debug!(path = %path.display(), provider = parser.id(), ?scores, "detected provider");
    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_create_parser_names() {
        assert_eq!(create_parser("codex").unwrap().id(), "codex");
        assert_eq!(create_parser("claude").unwrap().id(), "claude_code");
        assert_eq!(create_parser("claude_code").unwrap().id(), "claude_code");
        assert!(matches!(
            create_parser("gemini"),
            Err(Error::UnknownProvider(name)) if name == "gemini"
        ));
    }

    #[test]
    fn test_provider_names_and_paths() {
        assert_eq!(get_provider_names(), vec!["codex", "claude_code"]);
        assert!(default_log_path("unknown").is_none());
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                default_log_path("claude"),
                Some(home.join(".claude/projects"))
            );
        }
        assert!(expand_home_path("/abs/path").is_none());
    }

    #[test]
    fn test_detect_codex() {
        let file = file_with(&[
            r#"{"timestamp":"2025-10-01T12:00:00Z","type":"session_meta","payload":{"id":"s","timestamp":"2025-10-01T12:00:00Z"}}"#,
            r#"{"timestamp":"2025-10-01T12:00:01Z","type":"response_item","payload":{"type":"message","role":"user","content":"hi"}}"#,
        ]);
        assert_eq!(detect_parser(file.path()).unwrap().id(), "codex");
    }

    #[test]
    fn test_detect_claude() {
        let file = file_with(&[
            r#"{"type":"summary","summary":"x","leafUuid":"l"}"#,
            r#"{"type":"user","sessionId":"abc","timestamp":"2025-10-12T08:00:01Z","message":{"role":"user","content":"hi"}}"#,
        ]);
        assert_eq!(detect_parser(file.path()).unwrap().id(), "claude_code");
    }

    #[test]
    fn test_detect_falls_back_to_codex() {
        let file = file_with(&["{}", "not json"]);
        assert_eq!(detect_parser(file.path()).unwrap().id(), "codex");

        let empty = file_with(&[]);
        assert_eq!(detect_parser(empty.path()).unwrap().id(), "codex");
    }

    #[test]
    fn test_detect_missing_file() {
        assert!(matches!(
            detect_parser(Path::new("/nonexistent/agentlog/session.jsonl")),
            Err(Error::Io(_))
        ));
    }
}
