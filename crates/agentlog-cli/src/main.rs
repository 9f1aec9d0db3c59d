use agentlog::{Cli, exit_code, logging, run};
use clap::Parser;

fn main() {
    // Default SIGPIPE so `agentlog view ... | head` exits quietly
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();
    logging::init(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
