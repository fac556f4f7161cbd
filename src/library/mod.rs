//! Built-in reference phrases
//!
//! A catalogue of textbook right-of-way exchanges, each with the choices
//! that produce it and the call a referee would make. Usable as
//! `fencecall replay --phrase parry-riposte`.

use std::fmt;

use serde::Serialize;

use crate::error::PhraseError;
use crate::protocol::PhraseEngine;

// ============================================================================
// Types
// ============================================================================

/// A named reference phrase embedded in the binary.
#[derive(Debug, Serialize)]
pub struct BuiltinPhrase {
    /// Unique identifier (kebab-case, e.g., "parry-riposte").
    pub name: &'static str,

    /// Short human-readable description.
    pub description: &'static str,

    /// Choice ids, in order.
    pub choices: &'static [&'static str],

    /// The call the choices produce.
    pub expected_call: &'static str,
}

impl BuiltinPhrase {
    /// Replays the phrase on a fresh engine.
    ///
    /// # Errors
    ///
    /// Returns the first engine error encountered.
    pub fn replay(&self) -> Result<PhraseEngine, PhraseError> {
        let mut engine = PhraseEngine::new();
        for id in self.choices {
            engine.submit_choice(id)?;
        }
        Ok(engine)
    }
}

impl fmt::Display for BuiltinPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<28} {}", self.name, self.description)
    }
}

// ============================================================================
// Registry
// ============================================================================

static BUILTIN_PHRASES: &[BuiltinPhrase] = &[
    BuiltinPhrase {
        name: "attack-arrives",
        description: "Simple attack lands",
        choices: &["attack-left", "arrives"],
        expected_call: "Attack left arrives. Touch left.",
    },
    BuiltinPhrase {
        name: "attack-off-target",
        description: "Attack lands off target",
        choices: &["attack-left", "off-target"],
        expected_call: "Attack left is off target. No touch.",
    },
    BuiltinPhrase {
        name: "point-in-line",
        description: "Point-in-line established before the attack",
        choices: &["point-in-line-right"],
        expected_call: "Point-in-line right arrives. Touch right.",
    },
    BuiltinPhrase {
        name: "simultaneous",
        description: "Both fencers attack at once",
        choices: &["simultaneous"],
        expected_call: "Simultaneous. No touch.",
    },
    BuiltinPhrase {
        name: "parry-riposte",
        description: "Attack parried, riposte lands",
        choices: &["attack-left", "parried", "riposte-yes", "arrives"],
        expected_call: "Attack left is parried, riposte right arrives. Touch right.",
    },
    BuiltinPhrase {
        name: "counter-riposte",
        description: "Riposte parried, counter-riposte lands",
        choices: &[
            "attack-right",
            "parried",
            "riposte-yes",
            "counterparried",
            "riposte-yes",
            "arrives",
        ],
        expected_call: "Attack right is parried, riposte left is counterparried, \
                        riposte right arrives. Touch right.",
    },
    BuiltinPhrase {
        name: "counterattack",
        description: "Attack misses, counterattack lands",
        choices: &["attack-left", "misses", "counterattack-yes", "arrives"],
        expected_call: "Attack left is no, counterattack right arrives. Touch right.",
    },
    BuiltinPhrase {
        name: "remise-after-no-riposte",
        description: "Parry without riposte, attacker remises",
        choices: &["attack-left", "parried", "riposte-no", "remise", "arrives"],
        expected_call: "Attack left is parried, no riposte, remise left arrives. Touch left.",
    },
    BuiltinPhrase {
        name: "remise-after-miss",
        description: "Attack misses, defender holds, attacker remises",
        choices: &["attack-right", "misses", "counterattack-no", "remise", "arrives"],
        expected_call: "Attack right is no, remise right arrives. Touch right.",
    },
    BuiltinPhrase {
        name: "riposte-misses-remise",
        description: "Riposte misses, attacker renews",
        choices: &[
            "attack-left",
            "parried",
            "riposte-yes",
            "misses2nd",
            "remise",
            "arrives",
        ],
        expected_call: "Attack left is parried, riposte right is no, remise left arrives. \
                        Touch left.",
    },
];

/// Returns every built-in phrase in registry order.
#[must_use]
pub const fn list_phrases() -> &'static [BuiltinPhrase] {
    BUILTIN_PHRASES
}

/// Looks up a built-in phrase by name.
#[must_use]
pub fn find_phrase(name: &str) -> Option<&'static BuiltinPhrase> {
    BUILTIN_PHRASES.iter().find(|p| p.name == name)
}

/// Suggest a similar phrase name for typo correction.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
#[must_use]
pub fn suggest_phrase(input: &str) -> Option<&'static str> {
    BUILTIN_PHRASES
        .iter()
        .map(|p| (p.name, strsim::damerau_levenshtein(input, p.name)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name)
}

// ============================================================================
// Tests
// ============================================================================
