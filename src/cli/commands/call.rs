//! Interactive refereeing session
//!
//! Reads one choice per line, numbered or by id, and prints the running
//! call after each. A completed phrase is announced and a fresh one is
//! opened; a malformed phrase must be reset.

use std::io::{BufRead, Write};

use chrono::Utc;

use crate::cli::args::CallArgs;
use crate::error::{FenceCallError, PhraseError};
use crate::observability::{Event, EventEmitter};
use crate::phrase::Verdict;
use crate::protocol::PhraseEngine;

/// Runs the interactive session on stdin/stdout.
///
/// # Errors
///
/// Returns an I/O error if stdin or stdout fails.
pub fn run(args: &CallArgs) -> Result<(), FenceCallError> {
    let emitter = if args.events {
        EventEmitter::stderr()
    } else {
        EventEmitter::noop()
    };
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_session(stdin.lock(), &mut stdout, &emitter)
}

/// Drives a session over arbitrary input and output streams.
///
/// Ends on `quit` or end of input.
///
/// # Errors
///
/// Returns an I/O error if reading `input` or writing `output` fails.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    emitter: &EventEmitter,
) -> Result<(), FenceCallError> {
    let mut engine = PhraseEngine::new();
    let mut phrase_no = 1;
    emitter.emit(Event::PhraseStarted {
        timestamp: Utc::now(),
        phrase: phrase_no,
    });
    print_prompt(output, &engine)?;

    for line in input.lines() {
        let line = line?;
        let entry = line.trim();
        match entry {
            "" => {}
            "quit" | "q" => break,
            "reset" => {
                engine.reset();
                phrase_no += 1;
                emitter.emit(Event::PhraseStarted {
                    timestamp: Utc::now(),
                    phrase: phrase_no,
                });
            }
            _ => {
                let outcome = match resolve_entry(&engine, entry) {
                    Some(id) => engine.submit_choice(id),
                    None => engine.submit_choice(entry),
                };
                match outcome {
                    Ok(transition) => {
                        emitter.emit(Event::submitted(&transition));
                        if transition.done {
                            writeln!(output, "Call: {}", transition.call)?;
                            emitter.emit(Event::PhraseCompleted {
                                timestamp: Utc::now(),
                                call: transition.call,
                                touch: engine.phrase().result().and_then(Verdict::fencer),
                            });
                            engine.reset();
                            phrase_no += 1;
                            emitter.emit(Event::PhraseStarted {
                                timestamp: Utc::now(),
                                phrase: phrase_no,
                            });
                        } else {
                            writeln!(output, "  {}", transition.call)?;
                        }
                    }
                    Err(err) => {
                        writeln!(output, "error: {err}")?;
                        match err {
                            PhraseError::MalformedPhrase { call } => {
                                emitter.emit(Event::PhraseMalformed {
                                    timestamp: Utc::now(),
                                    call,
                                });
                            }
                            PhraseError::InvalidChoice {
                                choice,
                                state,
                                suggestion,
                            } => {
                                emitter.emit(Event::ChoiceRejected {
                                    timestamp: Utc::now(),
                                    choice,
                                    state,
                                    suggestion: suggestion.map(str::to_string),
                                });
                            }
                            PhraseError::PriorityUnset { .. } => {}
                        }
                    }
                }
            }
        }
        print_prompt(output, &engine)?;
    }

    output.flush()?;
    Ok(())
}

/// Maps a one-based menu number to the matching legal choice id.
fn resolve_entry(engine: &PhraseEngine, entry: &str) -> Option<&'static str> {
    let n: usize = entry.parse().ok()?;
    engine
        .legal_choices()
        .get(n.checked_sub(1)?)
        .map(|choice| choice.id())
}

fn print_prompt<W: Write>(output: &mut W, engine: &PhraseEngine) -> std::io::Result<()> {
    writeln!(output, "{}", engine.current_prompt())?;
    for (i, choice) in engine.legal_choices().iter().enumerate() {
        writeln!(output, "  {}) {:<22} [{}]", i + 1, choice.label(), choice.id())?;
    }
    write!(output, "> ")?;
    output.flush()
}
