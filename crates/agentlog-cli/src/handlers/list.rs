use crate::config::Config;
use crate::error::CliError;
use crate::output::write_summaries;
use crate::types::{ListFormat, ProviderName};
use agentlog_providers::{ListOptions, create_parser, list_sessions};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::path::PathBuf;

/// `list` arguments as given on the command line
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub agent: ProviderName,
    pub dir: Option<PathBuf>,
    pub cwd: Option<String>,
    pub all: bool,
    pub after: Option<String>,
    pub before: Option<String>,
    pub limit: usize,
    pub format: ListFormat,
    pub no_header: bool,
    pub summary_width: usize,
}

pub fn handle(args: ListArgs, config: &Config) -> Result<()> {
    let options = list_options(&args)?;

    let provider = args.agent.provider_name();
    let root = match args.dir.clone().or_else(|| config.sessions_dir(provider)) {
        Some(root) => root,
        None => anyhow::bail!("no sessions directory for {}; pass --dir", args.agent),
    };

    let parser = create_parser(provider)?;
    let result = list_sessions(parser.as_ref(), &root, &options)
        .with_context(|| format!("listing sessions under {}", root.display()))?;

    let stderr = io::stderr();
    let mut errs = stderr.lock();
    for warning in &result.warnings {
        tracing::warn!(error = %warning, "skipping session file");
        writeln!(errs, "warning: {}", warning).map_err(CliError::from)?;
    }

    let stdout = io::stdout();
    write_summaries(
        &mut stdout.lock(),
        &result.summaries,
        args.format,
        !args.no_header,
    )
}

/// Filters for the provider listing; `cwd` defaults to the current directory
/// unless `--all` is set
pub fn list_options(args: &ListArgs) -> Result<ListOptions> {
    if args.all && args.cwd.is_some() {
        return Err(CliError::usage("--cwd cannot be used with --all").into());
    }

    let after = parse_bound("--after", args.after.as_deref())?;
    let before = parse_bound("--before", args.before.as_deref())?;

    let cwd = if args.all {
        None
    } else {
        match &args.cwd {
            Some(cwd) => Some(cwd.clone()),
            None => Some(
                std::env::current_dir()
                    .context("determining current directory")?
                    .display()
                    .to_string(),
            ),
        }
    };

    Ok(ListOptions {
        cwd,
        after,
        before,
        limit: args.limit,
        summary_width: args.summary_width,
    })
}

fn parse_bound(flag: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, CliError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|e| CliError::usage(format!("invalid {} value {:?}: {}", flag, value, e))),
    }
}
