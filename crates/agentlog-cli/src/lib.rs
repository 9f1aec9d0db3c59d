mod args;
mod commands;
pub mod config;
pub mod error;
mod handlers;
pub mod logging;
pub mod output;
pub mod presentation;
pub mod session_loader;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
pub use error::{CliError, exit_code};
