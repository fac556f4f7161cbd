//! Phrase model
//!
//! Actions recorded during one right-of-way exchange and the aggregate
//! that turns them into a referee call.
//!
//! - [`Action`] - one event, tagged with its fencer and outcome
//! - [`Phrase`] - ordered actions plus the final [`Verdict`]

pub mod action;
pub mod call;

pub use action::{Action, ActionKind, Fencer, Offensive, Outcome};
pub use call::{Phrase, Verdict};
