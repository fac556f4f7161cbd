//! Phrase aggregate
//!
//! An ordered, append-only list of [`Action`]s plus the verdict recorded
//! when the phrase ends. Renders the referee call.

use std::fmt;

use serde::Serialize;

use super::action::{Action, ActionKind, Fencer, Outcome};

/// Final result of a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The touch is awarded to the given fencer.
    Touch(Fencer),
    /// No touch is awarded.
    NoTouch,
}

impl Verdict {
    /// Maps an optional right-of-way holder to a verdict.
    #[must_use]
    pub const fn from_holder(holder: Option<Fencer>) -> Self {
        match holder {
            Some(fencer) => Self::Touch(fencer),
            None => Self::NoTouch,
        }
    }

    /// Returns the fencer awarded the touch, if any.
    #[must_use]
    pub const fn fencer(self) -> Option<Fencer> {
        match self {
            Self::Touch(fencer) => Some(fencer),
            Self::NoTouch => None,
        }
    }

    /// Returns the closing sentence of a call, without the leading `". "`.
    #[must_use]
    pub const fn as_call(self) -> &'static str {
        match self {
            Self::Touch(Fencer::Left) => "Touch left.",
            Self::Touch(Fencer::Right) => "Touch right.",
            Self::NoTouch => "No touch.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Touch(fencer) => write!(f, "{fencer}"),
            Self::NoTouch => f.write_str("none"),
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One right-of-way phrase.
///
/// Two phrases are equal when their action sequences are equal element by
/// element; the recorded verdict does not take part in the comparison.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Phrase {
    actions: Vec<Action>,
    result: Option<Verdict>,
}

impl Phrase {
    /// Creates an empty phrase.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
            result: None,
        }
    }

    /// Appends an action.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Resolves the most recent action with `outcome`.
    ///
    /// Returns `false` when the phrase is empty.
    pub fn resolve_last(&mut self, outcome: Outcome) -> bool {
        match self.actions.last_mut() {
            Some(last) => {
                *last = last.resolved(outcome);
                true
            }
            None => false,
        }
    }

    /// Records the final result. A later call overwrites an earlier one.
    pub const fn set_result(&mut self, verdict: Verdict) {
        self.result = Some(verdict);
    }

    /// Returns the recorded result, or `None` while unset.
    #[must_use]
    pub const fn result(&self) -> Option<Verdict> {
        self.result
    }

    /// Returns the recorded actions in order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Returns the most recent action.
    #[must_use]
    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    /// Whether no action has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether the phrase has ended.
    ///
    /// A phrase ends when it opens with a simultaneous call or a
    /// point-in-line, or when its last action arrived or landed off target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let (Some(first), Some(last)) = (self.actions.first(), self.actions.last()) else {
            return false;
        };
        matches!(
            first.kind(),
            ActionKind::Simultaneous | ActionKind::PointInLine
        ) || last.outcome().is_final()
    }

    /// Renders the referee call.
    ///
    /// Actions are joined with `", "` and the first letter capitalised.
    /// A complete phrase gets its verdict appended. An empty phrase
    /// renders as the empty string.
    #[must_use]
    pub fn render(&self) -> String {
        if self.actions.is_empty() {
            return String::new();
        }

        let joined = self
            .actions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut call = capitalize(&joined);
        if self.is_complete() {
            let verdict = self.result.unwrap_or(Verdict::NoTouch);
            call.push_str(". ");
            call.push_str(verdict.as_call());
        }
        call
    }
}

impl PartialEq for Phrase {
    fn eq(&self, other: &Self) -> bool {
        self.actions == other.actions
    }
}

impl Eq for Phrase {}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
