//! `fencecall` - Right-of-way referee for foil and sabre phrases

use clap::Parser;

use fencecall::cli::args::{Cli, Commands};
use fencecall::cli::commands;
use fencecall::error::ExitCode;
use fencecall::observability::{LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        let events_on_stderr = matches!(&cli.command, Commands::Call(args) if args.events);
        init_logging(
            LogFormat::for_stderr(events_on_stderr),
            cli.verbose,
            cli.color,
        );
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
