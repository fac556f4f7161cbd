//! Non-interactive phrase replay
//!
//! Drives one phrase from a list of choice ids or a built-in phrase name
//! and prints the resulting call.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ReplayArgs};
use crate::error::FenceCallError;
use crate::library::{find_phrase, suggest_phrase};
use crate::phrase::{Action, Fencer, Verdict};
use crate::protocol::{EngineState, PhraseEngine};

/// JSON view of a replayed phrase.
#[derive(Debug, Serialize)]
pub struct ReplayReport<'a> {
    /// Built-in phrase name, when replaying one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase: Option<&'a str>,
    /// Choice ids applied.
    pub choices: Vec<&'a str>,
    /// Rendered call.
    pub call: String,
    /// Whether the phrase completed.
    pub done: bool,
    /// Final engine state.
    pub state: EngineState,
    /// Right-of-way holder at the end.
    pub priority: Option<Fencer>,
    /// Verdict, once complete.
    pub result: Option<Verdict>,
    /// Recorded actions.
    pub actions: &'a [Action],
}

/// Replays a phrase and prints the call.
///
/// # Errors
///
/// Returns [`FenceCallError::Usage`] for an unknown built-in name and
/// [`FenceCallError::Phrase`] if a choice is rejected or the phrase is
/// malformed.
pub fn run(args: &ReplayArgs) -> Result<(), FenceCallError> {
    let (name, choices): (Option<&str>, Vec<&str>) = match &args.phrase {
        Some(name) => {
            let builtin = find_phrase(name).ok_or_else(|| {
                let hint = suggest_phrase(name)
                    .map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"));
                FenceCallError::Usage(format!("unknown phrase '{name}'{hint}"))
            })?;
            (Some(builtin.name), builtin.choices.to_vec())
        }
        None => (None, args.choices.iter().map(String::as_str).collect()),
    };

    let mut engine = PhraseEngine::new();
    for id in &choices {
        engine.submit_choice(id)?;
    }
    tracing::debug!(choices = choices.len(), state = %engine.state(), "phrase replayed");

    match args.format {
        OutputFormat::Human => {
            println!("{}", engine.rendered_call());
            if !engine.is_done() {
                println!("(incomplete: {})", engine.current_prompt());
            }
        }
        OutputFormat::Json => {
            let report = ReplayReport {
                phrase: name,
                choices,
                call: engine.rendered_call(),
                done: engine.is_done(),
                state: engine.state(),
                priority: engine.priority(),
                result: engine.phrase().result(),
                actions: engine.phrase().actions(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
