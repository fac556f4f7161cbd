//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod call;
pub mod check;
pub mod completions;
pub mod diagram;
pub mod list;
pub mod replay;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::FenceCallError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), FenceCallError> {
    match cli.command {
        Commands::Call(args) => call::run(&args),
        Commands::Replay(args) => replay::run(&args),
        Commands::Check(args) => check::run(&args),
        Commands::List(args) => list::run(&args),
        Commands::Diagram(args) => diagram::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
