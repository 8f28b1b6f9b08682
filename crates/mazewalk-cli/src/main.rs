//! mazewalk: watch DFS, BFS and A* explore random mazes.

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("warning: failed to initialize logging: {e}");
    }
    tracing::debug!(?cli, "parsed arguments");

    let result = match &cli.command {
        Command::Run(args) => commands::run(args),
        Command::Compare(args) => commands::compare_all(args),
        Command::Trials(args) => commands::trials(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
