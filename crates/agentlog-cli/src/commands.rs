use super::args::{Cli, Commands};
use super::handlers;
use crate::config::{Config, TerminalEnv};
use crate::handlers::list::ListArgs;
use crate::handlers::view::ViewArgs;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::View {
            session,
            format,
            level,
            max_events,
            wrap,
            color,
            raw_file,
            agent,
            sessions_dir,
        } => {
            let env = TerminalEnv::capture();
            handlers::view::handle(
                ViewArgs {
                    session,
                    format,
                    level,
                    max_events,
                    wrap,
                    color,
                    raw_file,
                    agent,
                    sessions_dir,
                },
                &config,
                &env,
            )
        }

        Commands::Info {
            session,
            format,
            agent,
            sessions_dir,
        } => handlers::info::handle(&session, format, agent, sessions_dir, &config),

        Commands::List {
            agent,
            dir,
            cwd,
            all,
            after,
            before,
            limit,
            format,
            no_header,
            summary_width,
        } => handlers::list::handle(
            ListArgs {
                agent,
                dir,
                cwd,
                all,
                after,
                before,
                limit,
                format,
                no_header,
                summary_width,
            },
            &config,
        ),
    }
}
