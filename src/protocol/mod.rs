//! Phrase protocol
//!
//! The right-of-way state machine that turns a stream of user choices into
//! a refereed phrase.
//!
//! # Architecture
//!
//! - [`Choice`] - Every input id the engine understands, with its label
//! - [`EngineState`] - Pending prompt, legal choices and structural successors
//! - [`Priority`] - Right-of-way holder for the phrase in progress
//! - [`PhraseEngine`] - Applies choices, mutates the phrase, reports transitions

pub mod choice;
pub mod engine;
pub mod state;

#[cfg(test)]
mod proptests;

pub use choice::{Choice, suggest_choice};
pub use engine::PhraseEngine;
pub use state::{EngineState, Priority, Transition};
