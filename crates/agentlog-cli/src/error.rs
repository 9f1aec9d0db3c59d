use std::io;
use thiserror::Error;

/// Failures owned by the command layer
#[derive(Error, Debug)]
pub enum CliError {
    /// Bad mode, level or flag combination; reported before any file is read
    #[error("{0}")]
    Usage(String),

    /// The pager could not be run to completion
    #[error("pager `{command}` failed: {reason}")]
    Sink { command: String, reason: String },

    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Sink { .. } | CliError::Write(_) => 1,
        }
    }
}

/// Process exit code for an error returned by [`crate::run`]
///
/// Usage errors exit 2, a file without session metadata exits 3, anything
/// else exits 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(provider) = cause.downcast_ref::<agentlog_providers::Error>()
            && provider.is_meta_not_found()
        {
            return 3;
        }
    }
    1
}
