//! Built-in phrase listing

use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::FenceCallError;
use crate::library::list_phrases;

/// Prints the built-in phrases.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn run(args: &ListArgs) -> Result<(), FenceCallError> {
    let phrases = list_phrases();
    match args.format {
        OutputFormat::Human => {
            for phrase in phrases {
                println!("{phrase}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(phrases)?);
        }
    }
    Ok(())
}
