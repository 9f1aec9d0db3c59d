use crate::types::{AgentChoice, ColorChoice, InfoFormat, ListFormat, LogLevel, ProviderName};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agentlog")]
#[command(about = "Browse Codex CLI and Claude Code session transcripts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Render a session transcript")]
    View {
        /// Session id, a path to a .jsonl file, or a path relative to the sessions directory
        session: String,

        #[arg(long, default_value = "text", help = "Output format: text, raw or chat")]
        format: String,

        #[arg(
            long,
            default_value = "conversation",
            help = "Events to show: conversation (user/assistant only) or all"
        )]
        level: String,

        #[arg(long, default_value = "0", help = "Show only the most recent N events (0 = all)")]
        max_events: usize,

        #[arg(long, help = "Wrap message bodies at this column width")]
        wrap: Option<usize>,

        #[arg(long, default_value = "auto")]
        color: ColorChoice,

        #[arg(long, help = "Copy the file byte-for-byte without decoding")]
        raw_file: bool,

        #[arg(long, default_value = "auto")]
        agent: AgentChoice,

        #[arg(long, help = "Override the sessions directory")]
        sessions_dir: Option<PathBuf>,
    },

    #[command(about = "Show session metadata and summary")]
    Info {
        session: String,

        #[arg(long, default_value = "json")]
        format: InfoFormat,

        #[arg(long, default_value = "auto")]
        agent: AgentChoice,

        #[arg(long, help = "Override the sessions directory")]
        sessions_dir: Option<PathBuf>,
    },

    #[command(about = "List sessions, newest first")]
    List {
        #[arg(long, default_value = "codex")]
        agent: ProviderName,

        #[arg(long, help = "Directory to scan instead of the provider default")]
        dir: Option<PathBuf>,

        #[arg(long, help = "Only sessions whose cwd equals this path (default: current directory)")]
        cwd: Option<String>,

        #[arg(long, conflicts_with = "cwd", help = "Include sessions from every directory")]
        all: bool,

        #[arg(long, help = "Sessions starting at or after this RFC 3339 timestamp")]
        after: Option<String>,

        #[arg(long, help = "Sessions starting at or before this RFC 3339 timestamp")]
        before: Option<String>,

        #[arg(long, default_value = "0", help = "Maximum sessions to print (0 = no limit)")]
        limit: usize,

        #[arg(long, default_value = "tsv")]
        format: ListFormat,

        #[arg(long, help = "Omit the header row")]
        no_header: bool,

        #[arg(long, default_value = "160", help = "Maximum characters of the summary column")]
        summary_width: usize,
    },
}
