use crate::types::ColorChoice;
use agentlog_providers::default_log_path;
use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "AGENTLOG_CONFIG";
pub const CODEX_DIR_ENV: &str = "AGENTLOG_CODEX_DIR";
pub const CLAUDE_DIR_ENV: &str = "AGENTLOG_CLAUDE_DIR";

/// Chat width when neither a flag, the terminal nor `COLUMNS` says otherwise
pub const FALLBACK_WIDTH: usize = 80;

/// Optional user configuration (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Codex CLI session root; defaults to `~/.codex/sessions`
    pub codex_sessions_dir: Option<PathBuf>,
    /// Claude Code projects root; defaults to `~/.claude/projects`
    pub claude_projects_dir: Option<PathBuf>,
    /// Pager command run through `sh -c`, preferred over `$PAGER`
    pub pager: Option<String>,
    /// Default wrap column for `view`
    pub wrap: Option<usize>,
}

impl Config {
    /// Load from `$AGENTLOG_CONFIG` or the platform config dir, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific path; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("agentlog").join("config.toml"))
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(CODEX_DIR_ENV).filter(|d| !d.is_empty()) {
            self.codex_sessions_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = var(CLAUDE_DIR_ENV).filter(|d| !d.is_empty()) {
            self.claude_projects_dir = Some(PathBuf::from(dir));
        }
    }

    /// Session root for a provider (`codex` or `claude_code`)
    pub fn sessions_dir(&self, provider: &str) -> Option<PathBuf> {
        let configured = match provider {
            "codex" => self.codex_sessions_dir.clone(),
            "claude_code" => self.claude_projects_dir.clone(),
            _ => None,
        };
        configured.or_else(|| default_log_path(provider))
    }
}

/// Terminal-related environment, captured once per invocation
///
/// Renderers and the output sink only ever look at this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalEnv {
    pub pager: Option<String>,
    pub no_color: bool,
    /// Parsed `COLUMNS`
    pub columns: Option<usize>,
    /// Column count reported for stdout
    pub terminal_width: Option<usize>,
    pub stdout_is_terminal: bool,
}

impl TerminalEnv {
    pub fn capture() -> Self {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        Self {
            pager: env("PAGER"),
            no_color: env("NO_COLOR").is_some(),
            columns: env("COLUMNS").and_then(|v| v.trim().parse().ok()),
            terminal_width: terminal_size::terminal_size()
                .map(|(terminal_size::Width(w), _)| w as usize),
            stdout_is_terminal: std::io::stdout().is_terminal(),
        }
    }

    /// A non-interactive environment, for tests and piping
    pub fn plain() -> Self {
        Self::default()
    }

    /// Chat width: explicit wrap, then the terminal, then `COLUMNS`, then 80
    pub fn resolve_width(&self, wrap: Option<usize>) -> usize {
        [wrap, self.terminal_width, self.columns]
            .into_iter()
            .flatten()
            .find(|w| *w > 0)
            .unwrap_or(FALLBACK_WIDTH)
    }

    pub fn use_color(&self, choice: ColorChoice) -> bool {
        match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => !self.no_color && self.stdout_is_terminal,
        }
    }
}
