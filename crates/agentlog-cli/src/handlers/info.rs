use crate::config::Config;
use crate::session_loader::SessionLoader;
use crate::types::{AgentChoice, InfoFormat};
use agentlog_providers::SessionParser;
use anyhow::{Context, Result};
use chrono::SecondsFormat;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Metadata plus summary, as printed by `info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub jsonl_path: String,
    pub started_at: String,
    pub cwd: String,
    pub originator: String,
    pub cli_version: String,
    pub message_count: usize,
    pub duration_seconds: u64,
    pub summary: String,
}

impl SessionInfo {
    pub fn load(parser: &dyn SessionParser, path: &Path) -> Result<Self> {
        let summary = parser
            .summarize(path)
            .with_context(|| format!("summarizing {}", path.display()))?;

        Ok(Self {
            session_id: summary.id,
            jsonl_path: path.display().to_string(),
            started_at: summary.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            cwd: summary.cwd,
            originator: summary.originator,
            cli_version: summary.cli_version,
            message_count: summary.message_count,
            duration_seconds: summary.duration_seconds,
            summary: summary.summary,
        })
    }

    pub fn write(&self, out: &mut dyn Write, format: InfoFormat) -> Result<()> {
        match format {
            InfoFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
            InfoFormat::Text => {
                writeln!(out, "Session ID: {}", self.session_id)?;
                writeln!(out, "JSONL Path: {}", self.jsonl_path)?;
                writeln!(out, "Started At: {}", self.started_at)?;
                writeln!(out, "CWD: {}", self.cwd)?;
                writeln!(out, "Originator: {}", self.originator)?;
                writeln!(out, "CLI Version: {}", self.cli_version)?;
                writeln!(out, "Message Count: {}", self.message_count)?;
                writeln!(out, "Duration: {}", format_duration(self.duration_seconds))?;
                writeln!(out, "Summary: {}", self.summary)?;
            }
        }
        Ok(())
    }
}

pub fn handle(
    session: &str,
    format: InfoFormat,
    agent: AgentChoice,
    sessions_dir: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let loaded = SessionLoader::new(config, agent, sessions_dir.as_deref()).load(session)?;
    let info = SessionInfo::load(loaded.parser.as_ref(), &loaded.path)?;

    let stdout = io::stdout();
    info.write(&mut stdout.lock(), format)
}

/// `HH:MM:SS`; hours grow past two digits instead of wrapping
pub fn format_duration(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
