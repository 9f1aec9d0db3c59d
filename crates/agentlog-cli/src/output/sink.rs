use crate::config::TerminalEnv;
use crate::error::CliError;
use std::io::{self, Write};
use std::process::{Child, Command, Stdio};
use std::thread;

/// External pager that rendered lines are piped through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerCommand {
    program: String,
    args: Vec<String>,
}

impl PagerCommand {
    /// Configured pager, else `$PAGER` (both run via `sh -c`), else `less`
    /// (`less -R` when colors are on)
    pub fn resolve(configured: Option<&str>, env: &TerminalEnv, color: bool) -> Self {
        let custom = configured
            .filter(|c| !c.trim().is_empty())
            .or(env.pager.as_deref());

        match custom {
            Some(command) => Self {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), command.to_string()],
            },
            None => Self {
                program: "less".to_string(),
                args: if color { vec!["-R".to_string()] } else { Vec::new() },
            },
        }
    }

    /// Human readable command line, for errors and logs
    pub fn display(&self) -> String {
        match self.args.as_slice() {
            [flag, command] if self.program == "sh" && flag == "-c" => command.clone(),
            args => std::iter::once(self.program.as_str())
                .chain(args.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn spawn(&self) -> io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
    }
}

/// Write `lines`, each terminated by a newline
pub fn write_lines(out: &mut dyn Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Feed `lines` to a running pager and wait for it to exit
///
/// Input is written from a separate thread that always closes the pipe, so the
/// pager sees end-of-input even when a write fails. A pager that quits early
/// (broken pipe) is not an error; a non-zero exit status is.
pub fn page_lines(pager: &PagerCommand, mut child: Child, lines: &[String]) -> Result<(), CliError> {
    let sink_error = |reason: String| CliError::Sink {
        command: pager.display(),
        reason,
    };

    let mut text = lines.join("\n");
    if !text.ends_with('\n') {
        text.push('\n');
    }

    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| sink_error("stdin was not captured".to_string()))?;

    let writer = thread::spawn(move || {
        let mut stdin = stdin;
        let result = stdin.write_all(text.as_bytes()).and_then(|_| stdin.flush());
        drop(stdin);
        result
    });

    let status = child.wait().map_err(|e| sink_error(e.to_string()))?;

    match writer.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("pager closed its input early");
        }
        Ok(Err(e)) => return Err(sink_error(e.to_string())),
        Err(_) => return Err(sink_error("writer thread panicked".to_string())),
    }

    if !status.success() {
        return Err(sink_error(status.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_config_then_env() {
        let env = TerminalEnv {
            pager: Some("more".to_string()),
            ..TerminalEnv::plain()
        };

        let pager = PagerCommand::resolve(Some("bat --paging=always"), &env, false);
        assert_eq!(pager.display(), "bat --paging=always");

        let pager = PagerCommand::resolve(None, &env, true);
        assert_eq!(pager.display(), "more");

        let pager = PagerCommand::resolve(Some("  "), &TerminalEnv::plain(), true);
        assert_eq!(pager.display(), "less -R");

        let pager = PagerCommand::resolve(None, &TerminalEnv::plain(), false);
        assert_eq!(pager.display(), "less");
    }

    #[test]
    fn test_write_lines() {
        let mut out = Vec::new();
        write_lines(&mut out, &["a".to_string(), String::new(), "b".to_string()]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\n\nb\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_page_lines_through_shell_pager() {
        let env = TerminalEnv {
            pager: Some("cat > /dev/null".to_string()),
            ..TerminalEnv::plain()
        };
        let pager = PagerCommand::resolve(None, &env, false);
        let child = pager.spawn().unwrap();
        page_lines(&pager, child, &["hello".to_string()]).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_pager_is_sink_error() {
        let env = TerminalEnv {
            pager: Some("cat > /dev/null; exit 3".to_string()),
            ..TerminalEnv::plain()
        };
        let pager = PagerCommand::resolve(None, &env, false);
        let child = pager.spawn().unwrap();
        let err = page_lines(&pager, child, &["hello".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::Sink { .. }));
        assert!(err.to_string().contains("cat > /dev/null; exit 3"));
    }
}
