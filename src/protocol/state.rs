//! Engine state representation
//!
//! The pending-prompt states of the phrase protocol, the right-of-way
//! tracker, and the record produced by each transition.

use std::fmt;

use serde::Serialize;

use crate::phrase::{Fencer, Offensive};

use super::choice::Choice;

// ============================================================================
// Engine state
// ============================================================================

/// Which prompt the engine is waiting on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Nothing recorded yet.
    #[default]
    Start,
    /// An offensive action was declared and needs an outcome.
    AwaitingOutcome(Offensive),
    /// A parry landed; does the parrying fencer riposte?
    AwaitingRiposteDecision,
    /// The opening attack missed; does the defender counterattack?
    AwaitingDefenderResponse,
    /// Does the right-of-way holder renew the attack?
    AwaitingContinuation,
    /// The phrase is complete.
    Done,
    /// The phrase ended in a sequence that cannot be called.
    Invalid,
}

/// Outcomes offered for the opening attack.
const ATTACK_OUTCOMES: &[Choice] = &[
    Choice::Arrives,
    Choice::OffTarget,
    Choice::Misses,
    Choice::Parried,
];

/// Outcomes offered for a riposte.
const RIPOSTE_OUTCOMES: &[Choice] = &[
    Choice::Arrives,
    Choice::OffTarget,
    Choice::MissesSecond,
    Choice::Counterparried,
];

/// Outcomes offered for a counterattack or remise.
const RENEWAL_OUTCOMES: &[Choice] = &[
    Choice::Arrives,
    Choice::OffTarget,
    Choice::MissesSecond,
    Choice::Parried,
];

impl EngineState {
    /// Every state, in protocol order.
    pub const ALL: [Self; 10] = [
        Self::Start,
        Self::AwaitingOutcome(Offensive::Attack),
        Self::AwaitingOutcome(Offensive::Riposte),
        Self::AwaitingOutcome(Offensive::Counterattack),
        Self::AwaitingOutcome(Offensive::Remise),
        Self::AwaitingRiposteDecision,
        Self::AwaitingDefenderResponse,
        Self::AwaitingContinuation,
        Self::Done,
        Self::Invalid,
    ];

    /// Returns the choices accepted in this state, in display order.
    #[must_use]
    pub const fn legal_choices(self) -> &'static [Choice] {
        match self {
            Self::Start => &[
                Choice::AttackLeft,
                Choice::AttackRight,
                Choice::PointInLineLeft,
                Choice::PointInLineRight,
                Choice::Simultaneous,
            ],
            Self::AwaitingOutcome(Offensive::Attack) => ATTACK_OUTCOMES,
            Self::AwaitingOutcome(Offensive::Riposte) => RIPOSTE_OUTCOMES,
            Self::AwaitingOutcome(Offensive::Counterattack | Offensive::Remise) => {
                RENEWAL_OUTCOMES
            }
            Self::AwaitingRiposteDecision => &[Choice::RiposteYes, Choice::RiposteNo],
            Self::AwaitingDefenderResponse => {
                &[Choice::CounterattackYes, Choice::CounterattackNo]
            }
            Self::AwaitingContinuation => &[Choice::Remise, Choice::NoContinuation],
            Self::Done | Self::Invalid => &[],
        }
    }

    /// Whether `choice` is accepted in this state.
    #[must_use]
    pub fn accepts(self, choice: Choice) -> bool {
        self.legal_choices().contains(&choice)
    }

    /// Returns the state reached by `choice`, or `None` if the choice is
    /// not legal here.
    ///
    /// This is the structural successor. `no-continuation` leads back to
    /// [`EngineState::AwaitingContinuation`] here; whether the phrase is
    /// malformed instead depends on the recorded actions and is decided by
    /// the engine.
    #[must_use]
    pub fn successor(self, choice: Choice) -> Option<Self> {
        if !self.accepts(choice) {
            return None;
        }

        let next = match (self, choice) {
            (Self::Start, Choice::AttackLeft | Choice::AttackRight) => {
                Self::AwaitingOutcome(Offensive::Attack)
            }
            (Self::AwaitingOutcome(_), Choice::Arrives | Choice::OffTarget)
            | (
                Self::Start,
                Choice::PointInLineLeft | Choice::PointInLineRight | Choice::Simultaneous,
            ) => Self::Done,
            (Self::AwaitingOutcome(_), Choice::Misses) => Self::AwaitingDefenderResponse,
            (Self::AwaitingOutcome(_), Choice::Parried | Choice::Counterparried) => {
                Self::AwaitingRiposteDecision
            }
            (Self::AwaitingRiposteDecision, Choice::RiposteYes) => {
                Self::AwaitingOutcome(Offensive::Riposte)
            }
            (Self::AwaitingDefenderResponse, Choice::CounterattackYes) => {
                Self::AwaitingOutcome(Offensive::Counterattack)
            }
            (Self::AwaitingContinuation, Choice::Remise) => {
                Self::AwaitingOutcome(Offensive::Remise)
            }
            _ => Self::AwaitingContinuation,
        };
        Some(next)
    }

    /// Whether no further input is accepted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Invalid)
    }

    /// Returns the question asked in this state.
    ///
    /// `holder` is the current right-of-way holder, used to name who the
    /// question is about.
    #[must_use]
    pub fn prompt(self, holder: Option<Fencer>) -> String {
        let who = holder.map_or("the fencer", Fencer::as_str);
        match self {
            Self::Start => "How does the phrase begin?".to_string(),
            Self::AwaitingOutcome(kind) => format!("What happens to the {kind} from {who}?"),
            Self::AwaitingRiposteDecision => format!("Does {who} riposte?"),
            Self::AwaitingDefenderResponse => format!("Does {who} counterattack?"),
            Self::AwaitingContinuation => format!("Does {who} continue the attack?"),
            Self::Done => "The phrase is complete.".to_string(),
            Self::Invalid => "The phrase is malformed. Reset to start a new one.".to_string(),
        }
    }

    /// Returns a short machine-friendly name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::AwaitingOutcome(Offensive::Attack) => "attack-outcome",
            Self::AwaitingOutcome(Offensive::Riposte) => "riposte-outcome",
            Self::AwaitingOutcome(Offensive::Counterattack) => "counterattack-outcome",
            Self::AwaitingOutcome(Offensive::Remise) => "remise-outcome",
            Self::AwaitingRiposteDecision => "riposte-decision",
            Self::AwaitingDefenderResponse => "defender-response",
            Self::AwaitingContinuation => "continuation",
            Self::Done => "done",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EngineState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ============================================================================
// Priority
// ============================================================================

/// Right-of-way tracker for the phrase in progress.
///
/// Unset at the start of a phrase, claimed by the first attack or
/// point-in-line, then flipped each time right-of-way changes hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Priority(Option<Fencer>);

impl Priority {
    /// Creates an unset tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    /// Returns the current holder.
    #[must_use]
    pub const fn holder(self) -> Option<Fencer> {
        self.0
    }

    /// Gives right-of-way to `fencer`.
    pub const fn claim(&mut self, fencer: Fencer) {
        self.0 = Some(fencer);
    }

    /// Passes right-of-way to the other fencer. No-op while unset.
    pub fn flip(&mut self) {
        self.0 = self.0.map(Fencer::opponent);
    }

    /// Clears the holder.
    pub const fn reset(&mut self) {
        self.0 = None;
    }
}

// ============================================================================
// Transition record
// ============================================================================

/// Record of one accepted choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// State the choice was made in.
    pub from: EngineState,
    /// State reached.
    pub to: EngineState,
    /// The accepted choice.
    pub choice: Choice,
    /// Right-of-way holder after the transition.
    pub priority: Option<Fencer>,
    /// Rendered call after the transition.
    pub call: String,
    /// Whether the phrase is complete.
    pub done: bool,
}
