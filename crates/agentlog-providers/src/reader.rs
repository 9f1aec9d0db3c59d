use crate::error::{DecodeError, Error, Result};
use crate::traits::SessionParser;
use agentlog_types::{ContentBlock, Event, Role, SessionMeta, SessionSummary, clip, collapse_whitespace};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Maximum characters kept from the first user message in a summary
pub const SUMMARY_MAX_CHARS: usize = 160;

/// One non-blank line of a JSONL file, terminator stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number in the file
    pub number: usize,
    /// Byte offset of the first byte of the line
    pub offset: u64,
    pub bytes: Vec<u8>,
}

impl RawLine {
    fn into_text(self, path: &Path) -> Result<String> {
        let (number, offset) = (self.number, self.offset);
        String::from_utf8(self.bytes)
            .map_err(|err| decode_error(path, number, offset, DecodeError::Utf8(err)))
    }
}

/// Splits a reader into lines without any length cap
///
/// `\n` terminates a line and a `\r` right before it is dropped.
/// Whitespace-only lines are skipped but still counted.
pub struct LineScanner<R> {
    reader: R,
    number: usize,
    offset: u64,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            number: 0,
            offset: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = std::io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.offset;
            let mut bytes = Vec::new();
            match self.reader.read_until(b'\n', &mut bytes) {
                Ok(0) => return None,
                Ok(read) => {
                    self.offset += read as u64;
                    self.number += 1;

                    if bytes.last() == Some(&b'\n') {
                        bytes.pop();
                        if bytes.last() == Some(&b'\r') {
                            bytes.pop();
                        }
                    }
                    if bytes.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }

                    return Some(Ok(RawLine {
                        number: self.number,
                        offset: start,
                        bytes,
                    }));
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

fn open_lines(path: &Path) -> Result<LineScanner<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(LineScanner::new(BufReader::new(file)))
}

fn decode_error(path: &Path, line: usize, offset: u64, source: DecodeError) -> Error {
    Error::Decode {
        path: path.to_path_buf(),
        line,
        offset,
        source,
    }
}

/// Lazy, single-pass sequence of decoded events
///
/// The first error (I/O or decode) is yielded once and ends the sequence.
pub struct SessionReader<'p, P: SessionParser + ?Sized> {
    parser: &'p P,
    path: PathBuf,
    lines: LineScanner<BufReader<File>>,
    finished: bool,
}

impl<'p, P: SessionParser + ?Sized> SessionReader<'p, P> {
    pub fn open(parser: &'p P, path: &Path) -> Result<Self> {
        tracing::debug!(provider = parser.id(), path = %path.display(), "opening session");
        Ok(Self {
            parser,
            path: path.to_path_buf(),
            lines: open_lines(path)?,
            finished: false,
        })
    }

    fn decode(&self, line: RawLine) -> Result<Event> {
        let (number, offset) = (line.number, line.offset);
        let text = line.into_text(&self.path)?;
        self.parser
            .decode_event(&text)
            .map_err(|source| decode_error(&self.path, number, offset, source))
    }
}

impl<P: SessionParser + ?Sized> Iterator for SessionReader<'_, P> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = match self.lines.next()? {
            Ok(line) => self.decode(line),
            Err(err) => Err(Error::Io(err)),
        };
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

/// Metadata from the first metadata-bearing record
///
/// Stops at the first match. A decode error aborts the scan; a file with no
/// metadata at all is [`Error::MetaNotFound`].
pub fn read_session_meta<P: SessionParser + ?Sized>(parser: &P, path: &Path) -> Result<SessionMeta> {
    for line in open_lines(path)? {
        let line = line?;
        let (number, offset) = (line.number, line.offset);
        let text = line.into_text(path)?;

        match parser.decode_meta(&text) {
            Ok(Some(mut meta)) => {
                meta.path = path.to_path_buf();
                return Ok(meta);
            }
            Ok(None) => continue,
            Err(source) => return Err(decode_error(path, number, offset, source)),
        }
    }

    Err(Error::MetaNotFound(path.to_path_buf()))
}

/// Walk every event of `path` in file order
///
/// An error from `on_event` stops the scan immediately and comes back as
/// [`Error::Callback`].
pub fn iterate_events<P: SessionParser + ?Sized>(
    parser: &P,
    path: &Path,
    on_event: &mut dyn FnMut(Event) -> anyhow::Result<()>,
) -> Result<()> {
    for event in SessionReader::open(parser, path)? {
        on_event(event?).map_err(Error::Callback)?;
    }
    Ok(())
}

/// Summarizing pass: metadata, first user message, message count, duration
pub fn summarize<P: SessionParser + ?Sized>(parser: &P, path: &Path) -> Result<SessionSummary> {
    let meta = read_session_meta(parser, path)?;

    let mut summary = String::new();
    let mut message_count = 0;
    let mut last_timestamp: Option<DateTime<Utc>> = None;

    for event in SessionReader::open(parser, path)? {
        let event = event?;

        // Out-of-order records are common; the latest timestamp wins, not the last line.
        if let Some(ts) = event.timestamp
            && last_timestamp.is_none_or(|last| ts > last)
        {
            last_timestamp = Some(ts);
        }

        if !event.is_conversation() {
            continue;
        }
        message_count += 1;

        if summary.is_empty() && event.role == Role::User {
            let text = build_summary_text(&event.content);
            if !text.is_empty() && !parser.is_preamble(&text) {
                summary = text;
            }
        }
    }

    Ok(SessionSummary::from_meta(
        meta,
        summary,
        message_count,
        last_timestamp,
    ))
}

fn build_summary_text(blocks: &[ContentBlock]) -> String {
    let mut joined = String::new();
    for block in blocks {
        let text = block.text.trim();
        if text.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(text);
        if joined.len() >= SUMMARY_MAX_CHARS {
            break;
        }
    }
    clip(&collapse_whitespace(&joined), SUMMARY_MAX_CHARS)
}
