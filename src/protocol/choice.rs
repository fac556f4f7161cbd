//! Choice identifiers
//!
//! Every input the engine can accept, with the stable id the presentation
//! layer sends back and the label it shows.

use std::fmt;

use serde::Serialize;

use crate::phrase::Fencer;

/// A user choice offered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    /// Left fencer attacks.
    AttackLeft,
    /// Right fencer attacks.
    AttackRight,
    /// Left fencer has point-in-line.
    PointInLineLeft,
    /// Right fencer has point-in-line.
    PointInLineRight,
    /// Simultaneous action.
    Simultaneous,
    /// The pending action arrives.
    Arrives,
    /// The pending action lands off target.
    OffTarget,
    /// The opening attack misses.
    Misses,
    /// A riposte, counterattack or remise misses.
    MissesSecond,
    /// The pending action is parried.
    Parried,
    /// The riposte is parried.
    Counterparried,
    /// The parrying fencer ripostes.
    RiposteYes,
    /// The parrying fencer does not riposte.
    RiposteNo,
    /// The defender counterattacks.
    CounterattackYes,
    /// The defender does not counterattack.
    CounterattackNo,
    /// The right-of-way holder remises.
    Remise,
    /// Nobody continues.
    NoContinuation,
}

impl Choice {
    /// Every choice, in display order.
    pub const ALL: [Self; 17] = [
        Self::AttackLeft,
        Self::AttackRight,
        Self::PointInLineLeft,
        Self::PointInLineRight,
        Self::Simultaneous,
        Self::Arrives,
        Self::OffTarget,
        Self::Misses,
        Self::MissesSecond,
        Self::Parried,
        Self::Counterparried,
        Self::RiposteYes,
        Self::RiposteNo,
        Self::CounterattackYes,
        Self::CounterattackNo,
        Self::Remise,
        Self::NoContinuation,
    ];

    /// Returns the stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::AttackLeft => "attack-left",
            Self::AttackRight => "attack-right",
            Self::PointInLineLeft => "point-in-line-left",
            Self::PointInLineRight => "point-in-line-right",
            Self::Simultaneous => "simultaneous",
            Self::Arrives => "arrives",
            Self::OffTarget => "off-target",
            Self::Misses => "misses",
            Self::MissesSecond => "misses2nd",
            Self::Parried => "parried",
            Self::Counterparried => "counterparried",
            Self::RiposteYes => "riposte-yes",
            Self::RiposteNo => "riposte-no",
            Self::CounterattackYes => "counterattack-yes",
            Self::CounterattackNo => "counterattack-no",
            Self::Remise => "remise",
            Self::NoContinuation => "no-continuation",
        }
    }

    /// Returns the button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AttackLeft => "Attack from the left",
            Self::AttackRight => "Attack from the right",
            Self::PointInLineLeft => "Point-in-line left",
            Self::PointInLineRight => "Point-in-line right",
            Self::Simultaneous => "Simultaneous",
            Self::Arrives => "Arrives",
            Self::OffTarget => "Off target",
            Self::Misses | Self::MissesSecond => "Misses",
            Self::Parried => "Parried",
            Self::Counterparried => "Counterparried",
            Self::RiposteYes => "Riposte",
            Self::RiposteNo => "No riposte",
            Self::CounterattackYes => "Counterattack",
            Self::CounterattackNo => "No counterattack",
            Self::Remise => "Remise",
            Self::NoContinuation => "No continuation",
        }
    }

    /// Looks up a choice by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.id() == id)
    }

    /// Returns the side named by an opening choice.
    #[must_use]
    pub const fn side(self) -> Option<Fencer> {
        match self {
            Self::AttackLeft | Self::PointInLineLeft => Some(Fencer::Left),
            Self::AttackRight | Self::PointInLineRight => Some(Fencer::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for Choice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Choice", 2)?;
        state.serialize_field("id", self.id())?;
        state.serialize_field("label", self.label())?;
        state.end()
    }
}

/// Returns the closest known choice id to `input`, for typo hints.
///
/// Only ids within Damerau-Levenshtein distance 3 are suggested.
#[must_use]
pub fn suggest_choice<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a Choice>,
) -> Option<&'static str> {
    candidates
        .into_iter()
        .map(|choice| (choice.id(), strsim::damerau_levenshtein(input, choice.id())))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(id, _)| id)
}
