use crate::types::ListFormat;
use agentlog_types::{SessionSummary, escape_newlines};
use anyhow::Result;
use chrono::SecondsFormat;
use std::io::Write;

const TSV_HEADER: [&str; 4] = ["timestamp", "session_id", "cwd", "summary"];
const PLAIN_HEADER: [&str; 5] = ["timestamp", "session_id", "message_count", "cwd", "summary"];

/// Write session summaries in the requested list format
pub fn write_summaries(
    out: &mut dyn Write,
    summaries: &[SessionSummary],
    format: ListFormat,
    include_header: bool,
) -> Result<()> {
    match format {
        ListFormat::Tsv => write_delimited(out, summaries, include_header, false),
        ListFormat::Plain => write_delimited(out, summaries, include_header, true),
        ListFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summaries)?;
            writeln!(out)?;
            Ok(())
        }
        ListFormat::Jsonl => {
            for summary in summaries {
                serde_json::to_writer(&mut *out, summary)?;
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn write_delimited(
    out: &mut dyn Write,
    summaries: &[SessionSummary],
    include_header: bool,
    with_count: bool,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .has_headers(false)
        .from_writer(out);

    if include_header {
        if with_count {
            writer.write_record(PLAIN_HEADER)?;
        } else {
            writer.write_record(TSV_HEADER)?;
        }
    }

    for summary in summaries {
        let started = summary.started_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let cwd = escape_newlines(&summary.cwd);
        let text = escape_newlines(&summary.summary);
        if with_count {
            let count = summary.message_count.to_string();
            writer.write_record([
                started.as_str(),
                summary.id.as_str(),
                count.as_str(),
                cwd.as_str(),
                text.as_str(),
            ])?;
        } else {
            writer.write_record([
                started.as_str(),
                summary.id.as_str(),
                cwd.as_str(),
                text.as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
