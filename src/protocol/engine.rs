//! Phrase engine
//!
//! The `PhraseEngine` owns one phrase in progress and its right-of-way
//! tracker. It accepts one choice at a time, appends or resolves actions,
//! hands priority between fencers and decides when the phrase is over.

use tracing::{debug, info, warn};

use crate::error::PhraseError;
use crate::phrase::{Action, Fencer, Offensive, Outcome, Phrase, Verdict};

use super::choice::{Choice, suggest_choice};
use super::state::{EngineState, Priority, Transition};

/// Right-of-way state machine for a single phrase.
///
/// Purely reactive: each accepted choice produces exactly one transition.
/// A rejected choice leaves the phrase, the priority and the state
/// untouched. A malformed phrase parks the engine in
/// [`EngineState::Invalid`] until [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct PhraseEngine {
    phrase: Phrase,
    priority: Priority,
    state: EngineState,
}

impl PhraseEngine {
    /// Creates an engine at [`EngineState::Start`] with an empty phrase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pending-prompt state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Returns the phrase recorded so far.
    #[must_use]
    pub const fn phrase(&self) -> &Phrase {
        &self.phrase
    }

    /// Returns the current right-of-way holder.
    #[must_use]
    pub const fn priority(&self) -> Option<Fencer> {
        self.priority.holder()
    }

    /// Returns the question currently being asked.
    #[must_use]
    pub fn current_prompt(&self) -> String {
        self.state.prompt(self.priority.holder())
    }

    /// Returns the choices accepted right now, in display order.
    #[must_use]
    pub const fn legal_choices(&self) -> &'static [Choice] {
        self.state.legal_choices()
    }

    /// Whether the phrase is complete.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == EngineState::Done
    }

    /// Whether the phrase was found to be malformed.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.state == EngineState::Invalid
    }

    /// Returns the referee call for the phrase so far.
    #[must_use]
    pub fn rendered_call(&self) -> String {
        self.phrase.render()
    }

    /// Discards the phrase and priority and returns to the start.
    pub fn reset(&mut self) {
        debug!(from = %self.state, "phrase reset");
        *self = Self::default();
    }

    /// Submits a choice by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PhraseError::InvalidChoice`] if `id` is not one of
    /// [`legal_choices`](Self::legal_choices); engine state is unchanged.
    /// Returns [`PhraseError::MalformedPhrase`] if a `no-continuation`
    /// leaves a phrase that cannot be called; the engine moves to
    /// [`EngineState::Invalid`].
    pub fn submit_choice(&mut self, id: &str) -> Result<Transition, PhraseError> {
        let Some(choice) = Choice::from_id(id) else {
            return Err(self.reject(id));
        };
        self.apply(choice)
    }

    /// Submits a typed choice.
    ///
    /// # Errors
    ///
    /// Same as [`submit_choice`](Self::submit_choice).
    pub fn apply(&mut self, choice: Choice) -> Result<Transition, PhraseError> {
        let from = self.state;
        let Some(next) = from.successor(choice) else {
            return Err(self.reject(choice.id()));
        };

        match (from, choice) {
            (EngineState::Start, Choice::AttackLeft | Choice::AttackRight) => {
                let side = Self::side_of(choice, from)?;
                self.priority.claim(side);
                self.phrase
                    .add_action(Action::offensive(Offensive::Attack, side));
            }
            (EngineState::Start, Choice::PointInLineLeft | Choice::PointInLineRight) => {
                let side = Self::side_of(choice, from)?;
                self.phrase.add_action(Action::PointInLine(side));
                self.priority.claim(side);
                self.phrase.set_result(Verdict::Touch(side));
            }
            (EngineState::Start, Choice::Simultaneous) => {
                self.phrase.add_action(Action::Simultaneous);
                self.phrase.set_result(Verdict::NoTouch);
            }
            (EngineState::AwaitingOutcome(_), Choice::Arrives) => {
                let holder = self.holder()?;
                self.phrase.resolve_last(Outcome::Arrives);
                self.phrase.set_result(Verdict::Touch(holder));
            }
            (EngineState::AwaitingOutcome(_), Choice::OffTarget) => {
                self.phrase.resolve_last(Outcome::OffTarget);
                self.phrase.set_result(Verdict::NoTouch);
            }
            (EngineState::AwaitingOutcome(_), Choice::Misses | Choice::MissesSecond) => {
                self.phrase.resolve_last(Outcome::Missed);
                self.priority.flip();
            }
            (EngineState::AwaitingOutcome(_), Choice::Parried) => {
                self.phrase.resolve_last(Outcome::Parried);
                self.priority.flip();
            }
            (EngineState::AwaitingOutcome(_), Choice::Counterparried) => {
                self.phrase.resolve_last(Outcome::Counterparried);
                self.priority.flip();
            }
            (EngineState::AwaitingRiposteDecision, Choice::RiposteYes) => {
                let holder = self.holder()?;
                self.phrase
                    .add_action(Action::offensive(Offensive::Riposte, holder));
            }
            (EngineState::AwaitingRiposteDecision, Choice::RiposteNo) => {
                let holder = self.holder()?;
                self.phrase.add_action(Action::NoRiposte(holder));
                self.priority.flip();
            }
            (EngineState::AwaitingDefenderResponse, Choice::CounterattackYes) => {
                let holder = self.holder()?;
                self.phrase
                    .add_action(Action::offensive(Offensive::Counterattack, holder));
            }
            (EngineState::AwaitingDefenderResponse, Choice::CounterattackNo) => {
                self.priority.flip();
            }
            (EngineState::AwaitingContinuation, Choice::Remise) => {
                let holder = self.holder()?;
                self.phrase
                    .add_action(Action::offensive(Offensive::Remise, holder));
            }
            (EngineState::AwaitingContinuation, Choice::NoContinuation) => {
                // A refusal only stands when the last action belongs to the
                // fencer who does not hold right-of-way.
                let holder = self.holder()?;
                let stands = match self.phrase.last() {
                    Some(Action::NoRiposte(_)) | None => false,
                    Some(last) => last.fencer() != Some(holder),
                };
                if !stands {
                    return Err(self.malformed());
                }
                self.priority.flip();
            }
            _ => return Err(self.reject(choice.id())),
        }

        self.state = next;
        let transition = Transition {
            from,
            to: next,
            choice,
            priority: self.priority.holder(),
            call: self.phrase.render(),
            done: self.phrase.is_complete(),
        };

        debug!(
            from = %from,
            to = %next,
            choice = %choice,
            priority = ?transition.priority,
            "phrase transition"
        );

        if next == EngineState::Done {
            info!(
                call = %transition.call,
                verdict = ?self.phrase.result(),
                "phrase complete"
            );
        }

        Ok(transition)
    }

    /// Builds the rejection for an id not legal in the current state.
    fn reject(&self, id: &str) -> PhraseError {
        let suggestion = suggest_choice(id, self.state.legal_choices());
        debug!(choice = id, state = %self.state, "choice rejected");
        PhraseError::InvalidChoice {
            choice: id.to_string(),
            state: self.state,
            suggestion,
        }
    }

    /// Parks the engine in the invalid state.
    fn malformed(&mut self) -> PhraseError {
        self.state = EngineState::Invalid;
        let call = self.phrase.render();
        warn!(call = %call, "malformed phrase");
        PhraseError::MalformedPhrase { call }
    }

    fn holder(&self) -> Result<Fencer, PhraseError> {
        self.priority
            .holder()
            .ok_or(PhraseError::PriorityUnset { state: self.state })
    }

    fn side_of(choice: Choice, state: EngineState) -> Result<Fencer, PhraseError> {
        choice.side().ok_or(PhraseError::InvalidChoice {
            choice: choice.id().to_string(),
            state,
            suggestion: None,
        })
    }
}
