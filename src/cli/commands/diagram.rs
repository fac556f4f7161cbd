//! Protocol diagram output

use crate::cli::args::DiagramArgs;
use crate::diagram::render_state_diagram;
use crate::error::FenceCallError;

/// Prints the Mermaid diagram, or writes it to `--output`.
///
/// # Errors
///
/// Returns an I/O error if the output file cannot be written.
pub fn run(args: &DiagramArgs) -> Result<(), FenceCallError> {
    let diagram = render_state_diagram();
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{diagram}\n"))?;
            tracing::info!(path = %path.display(), "diagram written");
        }
        None => println!("{diagram}"),
    }
    Ok(())
}
