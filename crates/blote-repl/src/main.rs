//! blote CLI entry point.
//!
//! Usage:
//!   blote                      # Start the terminal
//!   blote --debug              # ...with the debug command and verbose logs
//!   blote --data-dir=<path>    # ...reading world data from <path>

use std::env;
use std::process::ExitCode;

use blote_repl::{HELP_TEXT, Invocation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let invocation = blote_repl::parse_args(env::args().skip(1));

    let config = match invocation {
        Invocation::Help => {
            print!("{HELP_TEXT}");
            return ExitCode::SUCCESS;
        }
        Invocation::Version => {
            println!("blote {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Invocation::Run(config) => config,
    };

    // RUST_LOG wins; otherwise --debug decides. Logs go to stderr so they
    // never interleave with terminal output on stdout.
    let default_level = if config.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match blote_repl::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
