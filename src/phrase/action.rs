//! Action model
//!
//! One discrete event inside a right-of-way phrase. Per-kind constraints
//! (a simultaneous call has no fencer, a point-in-line always arrives, a
//! no-riposte has no outcome) are carried by the variant shape, so an
//! ill-formed action cannot be constructed.

use std::fmt;

use serde::Serialize;

// ============================================================================
// Fencer
// ============================================================================

/// A side of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fencer {
    /// The fencer on the referee's left.
    Left,
    /// The fencer on the referee's right.
    Right,
}

impl Fencer {
    /// Returns the other fencer.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the lowercase side name used in calls and choice ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Fencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Kinds and outcomes
// ============================================================================

/// Actions that are launched at the opponent and then resolved with an
/// [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Offensive {
    /// The opening attack of the phrase.
    Attack,
    /// An attack made after parrying.
    Riposte,
    /// An attack into the opponent's attack.
    Counterattack,
    /// A renewal of an attack that missed or was parried.
    Remise,
}

impl Offensive {
    /// Returns the name used when rendering a call.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Riposte => "riposte",
            Self::Counterattack => "counterattack",
            Self::Remise => "remise",
        }
    }
}

impl fmt::Display for Offensive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat classification of every action, including the ones that carry
/// no outcome vocabulary of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Opening attack.
    Attack,
    /// Attack after a parry.
    Riposte,
    /// Attack into an attack.
    Counterattack,
    /// Renewed attack.
    Remise,
    /// Arm extended before the opponent's attack.
    PointInLine,
    /// Both fencers attack at once.
    Simultaneous,
    /// The parrying fencer declines to riposte.
    NoRiposte,
}

impl ActionKind {
    /// Returns the name used when rendering a call.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Riposte => "riposte",
            Self::Counterattack => "counterattack",
            Self::Remise => "remise",
            Self::PointInLine => "point-in-line",
            Self::Simultaneous => "simultaneous",
            Self::NoRiposte => "no riposte",
        }
    }
}

impl From<Offensive> for ActionKind {
    fn from(kind: Offensive) -> Self {
        match kind {
            Offensive::Attack => Self::Attack,
            Offensive::Riposte => Self::Riposte,
            Offensive::Counterattack => Self::Counterattack,
            Offensive::Remise => Self::Remise,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an action resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The point landed on valid target.
    Arrives,
    /// The point landed off target.
    OffTarget,
    /// The action missed.
    Missed,
    /// The action was parried.
    Parried,
    /// The riposte was parried in turn.
    Counterparried,
    /// Not resolved (yet), or an action kind with no outcome.
    Pending,
}

impl Outcome {
    /// Returns the phrase used when rendering a call, or `None` for
    /// [`Outcome::Pending`].
    #[must_use]
    pub const fn as_call(self) -> Option<&'static str> {
        match self {
            Self::Arrives => Some("arrives"),
            Self::OffTarget => Some("is off target"),
            Self::Missed => Some("is no"),
            Self::Parried => Some("is parried"),
            Self::Counterparried => Some("is counterparried"),
            Self::Pending => None,
        }
    }

    /// Whether this outcome ends the phrase.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Arrives | Self::OffTarget)
    }
}

// ============================================================================
// Action
// ============================================================================

/// A single recorded action.
///
/// Equality is structural: two actions are equal when their kind, fencer
/// and outcome all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// An attack, riposte, counterattack or remise and its outcome so far.
    Offensive {
        /// Which offensive action.
        kind: Offensive,
        /// Who made it.
        fencer: Fencer,
        /// How it resolved.
        outcome: Outcome,
    },
    /// Point-in-line established by a fencer. Always arrives.
    PointInLine(Fencer),
    /// Simultaneous action. No fencer, no outcome.
    Simultaneous,
    /// The named fencer parried and declined to riposte.
    NoRiposte(Fencer),
}

impl Action {
    /// Creates an unresolved offensive action.
    #[must_use]
    pub const fn offensive(kind: Offensive, fencer: Fencer) -> Self {
        Self::Offensive {
            kind,
            fencer,
            outcome: Outcome::Pending,
        }
    }

    /// Returns a copy of this action resolved with `outcome`.
    ///
    /// Only offensive actions take an outcome; every other variant has a
    /// fixed one and is returned unchanged.
    #[must_use]
    pub const fn resolved(self, outcome: Outcome) -> Self {
        match self {
            Self::Offensive { kind, fencer, .. } => Self::Offensive {
                kind,
                fencer,
                outcome,
            },
            other => other,
        }
    }

    /// Returns the flat kind of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Offensive { kind, .. } => ActionKind::from(*kind),
            Self::PointInLine(_) => ActionKind::PointInLine,
            Self::Simultaneous => ActionKind::Simultaneous,
            Self::NoRiposte(_) => ActionKind::NoRiposte,
        }
    }

    /// Returns the fencer who performed the action, if any.
    #[must_use]
    pub const fn fencer(&self) -> Option<Fencer> {
        match self {
            Self::Offensive { fencer, .. } | Self::PointInLine(fencer) | Self::NoRiposte(fencer) => {
                Some(*fencer)
            }
            Self::Simultaneous => None,
        }
    }

    /// Returns the outcome of the action.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::Offensive { outcome, .. } => *outcome,
            Self::PointInLine(_) => Outcome::Arrives,
            Self::Simultaneous | Self::NoRiposte(_) => Outcome::Pending,
        }
    }
}

impl fmt::Display for Action {
    /// Renders `"<kind> <fencer> <outcome>"`. Simultaneous and no-riposte
    /// render as the bare kind; a pending outcome is omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simultaneous | Self::NoRiposte(_) => f.write_str(self.kind().as_str()),
            _ => {
                write!(f, "{}", self.kind())?;
                if let Some(fencer) = self.fencer() {
                    write!(f, " {fencer}")?;
                }
                if let Some(outcome) = self.outcome().as_call() {
                    write!(f, " {outcome}")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Action", 3)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("fencer", &self.fencer())?;
        state.serialize_field("outcome", &self.outcome())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_flips() {
        assert_eq!(Fencer::Left.opponent(), Fencer::Right);
        assert_eq!(Fencer::Right.opponent(), Fencer::Left);
    }

    #[test]
    fn point_in_line_always_arrives() {
        let action = Action::PointInLine(Fencer::Right);
        assert_eq!(action.outcome(), Outcome::Arrives);
        assert_eq!(action.resolved(Outcome::Missed), action);
        assert_eq!(action.to_string(), "point-in-line right arrives");
    }

    #[test]
    fn simultaneous_has_no_fencer_or_outcome() {
        let action = Action::Simultaneous;
        assert_eq!(action.fencer(), None);
        assert_eq!(action.outcome(), Outcome::Pending);
        assert_eq!(action.to_string(), "simultaneous");
    }

    #[test]
    fn no_riposte_renders_bare_kind() {
        let action = Action::NoRiposte(Fencer::Left);
        assert_eq!(action.fencer(), Some(Fencer::Left));
        assert_eq!(action.outcome(), Outcome::Pending);
        assert_eq!(action.to_string(), "no riposte");
    }

    #[test]
    fn pending_offensive_omits_outcome() {
        let action = Action::offensive(Offensive::Riposte, Fencer::Right);
        assert_eq!(action.to_string(), "riposte right");
    }

    #[test]
    fn resolved_offensive_renders_outcome() {
        let base = Action::offensive(Offensive::Attack, Fencer::Left);
        assert_eq!(base.resolved(Outcome::Arrives).to_string(), "attack left arrives");
        assert_eq!(
            base.resolved(Outcome::OffTarget).to_string(),
            "attack left is off target"
        );
        assert_eq!(base.resolved(Outcome::Missed).to_string(), "attack left is no");
        assert_eq!(
            base.resolved(Outcome::Parried).to_string(),
            "attack left is parried"
        );
    }

    #[test]
    fn equality_is_field_equality() {
        let a = Action::offensive(Offensive::Remise, Fencer::Left).resolved(Outcome::Arrives);
        let b = Action::offensive(Offensive::Remise, Fencer::Left).resolved(Outcome::Arrives);
        let c = Action::offensive(Offensive::Remise, Fencer::Right).resolved(Outcome::Arrives);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(Action::NoRiposte(Fencer::Left), Action::NoRiposte(Fencer::Right));
    }

    #[test]
    fn kind_matches_offensive_conversion() {
        for kind in [
            Offensive::Attack,
            Offensive::Riposte,
            Offensive::Counterattack,
            Offensive::Remise,
        ] {
            assert_eq!(
                Action::offensive(kind, Fencer::Left).kind(),
                ActionKind::from(kind)
            );
        }
    }

    #[test]
    fn serializes_record_view() {
        let json = serde_json::to_value(Action::Simultaneous).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "simultaneous", "fencer": null, "outcome": "pending"})
        );
    }

    #[test]
    fn no_riposte_reads_as_prose_but_serializes_kebab() {
        assert_eq!(ActionKind::NoRiposte.to_string(), "no riposte");
        assert_eq!(
            serde_json::to_value(ActionKind::NoRiposte).unwrap(),
            serde_json::json!("no-riposte")
        );
        assert_eq!(Action::NoRiposte(Fencer::Right).to_string(), "no riposte");
    }
}
