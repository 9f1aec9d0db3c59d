use crate::config::{Config, TerminalEnv};
use crate::error::CliError;
use crate::output::{PagerCommand, page_lines, write_lines};
use crate::presentation::{ChatRenderer, Palette, TextRenderer};
use crate::session_loader::SessionLoader;
use crate::types::{AgentChoice, ColorChoice};
use agentlog_engine::{Level, select_events};
use agentlog_providers::{SessionParser, SessionReader};
use agentlog_types::Event;
use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFormat {
    Text,
    Raw,
    Chat,
}

impl FromStr for ViewFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ViewFormat::Text),
            "raw" => Ok(ViewFormat::Raw),
            "chat" => Ok(ViewFormat::Chat),
            _ => Err(CliError::usage(format!("unsupported format: {}", s))),
        }
    }
}

impl fmt::Display for ViewFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewFormat::Text => write!(f, "text"),
            ViewFormat::Raw => write!(f, "raw"),
            ViewFormat::Chat => write!(f, "chat"),
        }
    }
}

/// `view` arguments as given on the command line
#[derive(Debug, Clone)]
pub struct ViewArgs {
    pub session: String,
    pub format: String,
    pub level: String,
    pub max_events: usize,
    pub wrap: Option<usize>,
    pub color: ColorChoice,
    pub raw_file: bool,
    pub agent: AgentChoice,
    pub sessions_dir: Option<PathBuf>,
}

/// Validated rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub format: ViewFormat,
    pub level: Level,
    /// 0 keeps every event
    pub max_events: usize,
    pub wrap: Option<usize>,
    pub color: bool,
}

impl ViewOptions {
    /// Check level then format; nothing is read from disk here
    pub fn parse(format: &str, level: &str) -> Result<(ViewFormat, Level), CliError> {
        let level = level
            .to_ascii_lowercase()
            .parse::<Level>()
            .map_err(|e| CliError::usage(e.to_string()))?;
        let format = format.parse::<ViewFormat>()?;
        Ok((format, level))
    }
}

pub fn handle(args: ViewArgs, config: &Config, env: &TerminalEnv) -> Result<()> {
    let (format, level) = ViewOptions::parse(&args.format, &args.level)?;

    let loader = SessionLoader::new(config, args.agent, args.sessions_dir.as_deref());
    let session = loader.load(&args.session)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.raw_file {
        return copy_file(&mut out, &session.path);
    }

    let options = ViewOptions {
        format,
        level,
        max_events: args.max_events,
        wrap: args.wrap.or(config.wrap),
        color: env.use_color(args.color),
    };

    if options.format == ViewFormat::Chat && env.stdout_is_terminal {
        let lines = chat_lines(session.parser.as_ref(), &session.path, &options, env)?;
        if lines.is_empty() {
            return Ok(());
        }
        drop(out);
        return page_or_write(&lines, config, env, options.color);
    }
    render(session.parser.as_ref(), &session.path, &options, env, &mut out)
}

/// Copy the file byte for byte; nothing is decoded
pub fn copy_file(out: &mut dyn Write, path: &Path) -> Result<()> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    io::copy(&mut file, out).map_err(CliError::from)?;
    out.flush().map_err(CliError::from)?;
    Ok(())
}

/// Render a session to `out` without paging
///
/// Without a bound, `text` and `raw` events stream straight to `out`; with
/// one, only the most recent `max_events` are kept and written once the scan
/// completes. `chat` always needs the whole window for its layout.
pub fn render(
    parser: &dyn SessionParser,
    path: &Path,
    options: &ViewOptions,
    env: &TerminalEnv,
    out: &mut dyn Write,
) -> Result<()> {
    match options.format {
        ViewFormat::Text => {
            require_meta(parser, path)?;
            let renderer = TextRenderer::new(options.wrap.unwrap_or(0), Palette::new(options.color));
            if options.max_events == 0 {
                let mut index = 0;
                scan(parser, path, options.level, |event| {
                    if index > 0 {
                        writeln!(out)?;
                    }
                    index += 1;
                    renderer.write_event(out, &event, index)?;
                    Ok(())
                })?;
            } else {
                let events = collect(parser, path, options)?;
                renderer.write_all(out, &events).map_err(CliError::from)?;
            }
        }
        ViewFormat::Raw => {
            require_meta(parser, path)?;
            if options.max_events == 0 {
                scan(parser, path, options.level, |event| {
                    writeln!(out, "{}", event.raw)?;
                    Ok(())
                })?;
            } else {
                for event in collect(parser, path, options)? {
                    writeln!(out, "{}", event.raw).map_err(CliError::from)?;
                }
            }
        }
        ViewFormat::Chat => {
            let lines = chat_lines(parser, path, options, env)?;
            write_lines(out, &lines).map_err(CliError::from)?;
        }
    }

    out.flush().map_err(CliError::from)?;
    Ok(())
}

/// Chat transcript lines at the width resolved from `env`
pub fn chat_lines(
    parser: &dyn SessionParser,
    path: &Path,
    options: &ViewOptions,
    env: &TerminalEnv,
) -> Result<Vec<String>> {
    require_meta(parser, path)?;

    let events = collect(parser, path, options)?;
    let width = env.resolve_width(options.wrap);
    Ok(ChatRenderer::new(width, Palette::new(options.color)).render(&events))
}

fn require_meta(parser: &dyn SessionParser, path: &Path) -> Result<()> {
    parser
        .read_session_meta(path)
        .with_context(|| format!("reading session metadata from {}", path.display()))?;
    Ok(())
}

fn page_or_write(lines: &[String], config: &Config, env: &TerminalEnv, color: bool) -> Result<()> {
    let pager = PagerCommand::resolve(config.pager.as_deref(), env, color);
    match pager.spawn() {
        Ok(child) => {
            tracing::debug!(pager = %pager.display(), "paging chat output");
            page_lines(&pager, child, lines)?;
        }
        Err(err) => {
            tracing::warn!(pager = %pager.display(), error = %err, "pager unavailable, writing directly");
            let stdout = io::stdout();
            write_lines(&mut stdout.lock(), lines).map_err(CliError::from)?;
        }
    }
    Ok(())
}

/// Events accepted by the level, bounded to the most recent `max_events`
fn collect(parser: &dyn SessionParser, path: &Path, options: &ViewOptions) -> Result<Vec<Event>> {
    SessionReader::open(parser, path)
        .and_then(|reader| select_events(reader, options.level, options.max_events))
        .with_context(|| format!("reading {}", path.display()))
}

/// Iterate the events `level` accepts; the callback's own error comes back as-is
fn scan<F>(parser: &dyn SessionParser, path: &Path, level: Level, mut on_event: F) -> Result<()>
where
    F: FnMut(Event) -> Result<()>,
{
    let result = parser.iterate_events(path, &mut |event| {
        if level.accepts(&event) {
            on_event(event)
        } else {
            Ok(())
        }
    });

    match result {
        Ok(()) => Ok(()),
        Err(err) => match err.into_callback() {
            Ok(callback_err) => Err(callback_err),
            Err(scan_err) => {
                Err(anyhow::Error::new(scan_err).context(format!("reading {}", path.display())))
            }
        },
    }
}
