use crate::error::{Error, Result};
use crate::traits::SessionParser;
use agentlog_types::{SessionSummary, clip};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filters for [`list_sessions`]
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Keep only sessions whose working directory equals this path
    pub cwd: Option<String>,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    /// 0 means no limit
    pub limit: usize,
    /// Summary clip width in characters, 0 keeps the full summary
    pub summary_width: usize,
}

/// Summaries plus the files that could not be read
#[derive(Debug, Default)]
pub struct ListResult {
    pub summaries: Vec<SessionSummary>,
    pub warnings: Vec<Error>,
}

/// Every `*.jsonl` file under `root`, in walk order (sorted by file name)
///
/// Unreadable directory entries are skipped.
pub fn find_session_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "jsonl"))
        .collect()
}

/// Summarize the sessions under `root`, newest first
///
/// Files that fail to decode do not abort the listing; they are returned in
/// [`ListResult::warnings`].
pub fn list_sessions(
    parser: &dyn SessionParser,
    root: &Path,
    options: &ListOptions,
) -> Result<ListResult> {
    if !root.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("session directory {} does not exist", root.display()),
        )));
    }

    let mut result = ListResult::default();

    for path in find_session_files(root) {
        let meta = match parser.read_session_meta(&path) {
            Ok(meta) => meta,
            Err(err) => {
                result.warnings.push(err);
                continue;
            }
        };

        if let Some(cwd) = &options.cwd
            && meta.cwd != *cwd
        {
            continue;
        }
        if options.after.is_some_and(|after| meta.started_at < after) {
            continue;
        }
        if options.before.is_some_and(|before| meta.started_at > before) {
            continue;
        }

        match parser.summarize(&path) {
            Ok(mut summary) => {
                summary.summary = clip(&summary.summary, options.summary_width);
                result.summaries.push(summary);
            }
            Err(err) => result.warnings.push(err),
        }
    }

    result
        .summaries
        .sort_by(|a, b| b.started_at.cmp(&a.started_at));
    if options.limit > 0 {
        result.summaries.truncate(options.limit);
    }

    Ok(result)
}

/// First file under `root` whose metadata id is `id`
pub fn find_session_path(parser: &dyn SessionParser, root: &Path, id: &str) -> Result<PathBuf> {
    for path in find_session_files(root) {
        match parser.read_session_meta(&path) {
            Ok(meta) if meta.id == id => return Ok(path),
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skipping unreadable session");
            }
        }
    }

    Err(Error::SessionNotFound {
        id: id.to_string(),
        root: root.to_path_buf(),
    })
}
