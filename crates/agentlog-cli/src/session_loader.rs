use crate::config::Config;
use crate::error::CliError;
use crate::types::AgentChoice;
use agentlog_providers::{
    Error as ProviderError, SessionParser, create_parser, detect_parser, find_session_path,
    get_provider_names,
};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A session file together with the parser that reads it
pub struct LoadedSession {
    pub path: PathBuf,
    pub parser: Box<dyn SessionParser>,
}

impl std::fmt::Debug for LoadedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedSession")
            .field("path", &self.path)
            .field("parser", &self.parser.id())
            .finish()
    }
}

/// Resolves a `view`/`info` session argument to a file
///
/// Tried in order: an existing file path, a path relative to a sessions
/// directory, then the first file under a sessions directory whose metadata
/// id matches.
pub struct SessionLoader<'a> {
    config: &'a Config,
    agent: AgentChoice,
    sessions_dir: Option<&'a Path>,
}

impl<'a> SessionLoader<'a> {
    pub fn new(config: &'a Config, agent: AgentChoice, sessions_dir: Option<&'a Path>) -> Self {
        Self {
            config,
            agent,
            sessions_dir,
        }
    }

    pub fn load(&self, arg: &str) -> Result<LoadedSession> {
        if arg.trim().is_empty() {
            return Err(CliError::usage("session identifier is empty").into());
        }

        let direct = Path::new(arg);
        if direct.is_file() {
            return self.with_parser(direct.to_path_buf());
        }

        let roots = self.search_roots();
        for (_, root) in &roots {
            let candidate = root.join(arg);
            if candidate.is_file() {
                return self.with_parser(candidate);
            }
        }

        for (provider, root) in &roots {
            if !root.is_dir() {
                continue;
            }
            let parser = create_parser(provider)?;
            match find_session_path(parser.as_ref(), root, arg) {
                Ok(path) => {
                    tracing::debug!(path = %path.display(), provider, "resolved session id");
                    return Ok(LoadedSession { path, parser });
                }
                Err(ProviderError::SessionNotFound { .. }) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        let searched: Vec<String> = roots
            .iter()
            .map(|(_, root)| root.display().to_string())
            .collect();
        anyhow::bail!(
            "session {:?} not found (searched: {})",
            arg,
            if searched.is_empty() {
                "no sessions directory".to_string()
            } else {
                searched.join(", ")
            }
        )
    }

    /// `(provider, directory)` pairs to search, in provider order
    fn search_roots(&self) -> Vec<(&'static str, PathBuf)> {
        let providers = match self.agent.provider_name() {
            Some(name) => vec![name],
            None => get_provider_names(),
        };

        let mut roots = Vec::new();
        for provider in providers {
            let root = match self.sessions_dir {
                Some(dir) => Some(dir.to_path_buf()),
                None => self.config.sessions_dir(provider),
            };
            if let Some(root) = root {
                roots.push((provider, root));
            }
        }
        roots
    }

    fn with_parser(&self, path: PathBuf) -> Result<LoadedSession> {
        let parser = match self.agent.provider_name() {
            Some(name) => create_parser(name)?,
            None => detect_parser(&path)?,
        };
        Ok(LoadedSession { path, parser })
    }
}
