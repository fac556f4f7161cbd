//! Call-script checking
//!
//! Replays every scripted phrase on a fresh engine and compares the result
//! with its expectation.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::schema::{CallScript, ExpectedError, ScriptedPhrase};
use crate::error::PhraseError;
use crate::protocol::PhraseEngine;

/// Outcome of checking one phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The expectation held.
    Passed,
    /// The expectation did not hold, or replay failed unexpectedly.
    Failed,
    /// No expectation; the phrase was only replayed.
    Replayed,
}

/// Report for one scripted phrase.
#[derive(Debug, Clone, Serialize)]
pub struct PhraseReport {
    /// Phrase name.
    pub name: String,
    /// Call rendered after the last applied choice.
    pub call: String,
    /// Whether the phrase completed.
    pub done: bool,
    /// Check outcome.
    pub status: CheckStatus,
    /// Explanation when the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Checks every phrase in `script`.
#[must_use]
pub fn check_script(script: &CallScript) -> Vec<PhraseReport> {
    script.phrases.iter().map(check_phrase).collect()
}

/// Replays one phrase and compares it with its expectation.
#[must_use]
pub fn check_phrase(phrase: &ScriptedPhrase) -> PhraseReport {
    let mut engine = PhraseEngine::new();
    let mut raised = None;
    for id in &phrase.choices {
        if let Err(e) = engine.submit_choice(id) {
            raised = Some(e);
            break;
        }
    }

    let call = engine.rendered_call();
    let (status, detail) = match (&phrase.expect, phrase.expect_error, &raised) {
        (_, Some(expected), Some(err)) if matches_expected(expected, err) => {
            (CheckStatus::Passed, None)
        }
        (_, Some(expected), Some(err)) => (
            CheckStatus::Failed,
            Some(format!("expected {} error, got: {err}", expected_name(expected))),
        ),
        (_, Some(expected), None) => (
            CheckStatus::Failed,
            Some(format!(
                "expected {} error, phrase replayed to: {call}",
                expected_name(expected)
            )),
        ),
        (_, None, Some(err)) => (CheckStatus::Failed, Some(err.to_string())),
        (Some(expected), None, None) if *expected == call => (CheckStatus::Passed, None),
        (Some(expected), None, None) => (
            CheckStatus::Failed,
            Some(format!("expected \"{expected}\", got \"{call}\"")),
        ),
        (None, None, None) => (CheckStatus::Replayed, None),
    };

    match status {
        CheckStatus::Failed => {
            warn!(phrase = %phrase.name, detail = ?detail, "phrase check failed");
        }
        _ => debug!(phrase = %phrase.name, status = ?status, "phrase checked"),
    }

    PhraseReport {
        name: phrase.name.clone(),
        call,
        done: engine.is_done(),
        status,
        detail,
    }
}

const fn matches_expected(expected: ExpectedError, err: &PhraseError) -> bool {
    matches!(
        (expected, err),
        (ExpectedError::Malformed, PhraseError::MalformedPhrase { .. })
            | (ExpectedError::InvalidChoice, PhraseError::InvalidChoice { .. })
    )
}

const fn expected_name(expected: ExpectedError) -> &'static str {
    match expected {
        ExpectedError::Malformed => "malformed",
        ExpectedError::InvalidChoice => "invalid-choice",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(
        choices: &[&str],
        expect: Option<&str>,
        expect_error: Option<ExpectedError>,
    ) -> ScriptedPhrase {
        ScriptedPhrase {
            name: "test".to_string(),
            choices: choices.iter().map(ToString::to_string).collect(),
            expect: expect.map(ToString::to_string),
            expect_error,
        }
    }

    #[test]
    fn matching_call_passes() {
        let report = check_phrase(&scripted(
            &["attack-left", "arrives"],
            Some("Attack left arrives. Touch left."),
            None,
        ));
        assert_eq!(report.status, CheckStatus::Passed);
        assert!(report.done);
    }

    #[test]
    fn different_call_fails() {
        let report = check_phrase(&scripted(
            &["attack-left", "arrives"],
            Some("Attack right arrives. Touch right."),
            None,
        ));
        assert_eq!(report.status, CheckStatus::Failed);
        assert!(report.detail.unwrap().contains("Attack left arrives. Touch left."));
    }

    #[test]
    fn expected_malformed_passes() {
        let report = check_phrase(&scripted(
            &["attack-left", "parried", "riposte-no", "no-continuation"],
            None,
            Some(ExpectedError::Malformed),
        ));
        assert_eq!(report.status, CheckStatus::Passed);
        assert!(!report.done);
    }

    #[test]
    fn expected_invalid_choice_passes() {
        let report = check_phrase(&scripted(
            &["attack-left", "riposte-yes"],
            None,
            Some(ExpectedError::InvalidChoice),
        ));
        assert_eq!(report.status, CheckStatus::Passed);
    }

    #[test]
    fn wrong_error_kind_fails() {
        let report = check_phrase(&scripted(
            &["attack-left", "riposte-yes"],
            None,
            Some(ExpectedError::Malformed),
        ));
        assert_eq!(report.status, CheckStatus::Failed);
    }

    #[test]
    fn unexpected_error_fails() {
        let report = check_phrase(&scripted(&["simultaneous", "arrives"], None, None));
        assert_eq!(report.status, CheckStatus::Failed);
    }

    #[test]
    fn no_expectation_is_replayed() {
        let report = check_phrase(&scripted(&["attack-left", "parried"], None, None));
        assert_eq!(report.status, CheckStatus::Replayed);
        assert_eq!(report.call, "Attack left is parried");
        assert!(!report.done);
    }

    #[test]
    fn check_script_covers_all_phrases() {
        let script = CallScript {
            title: None,
            phrases: vec![
                scripted(&["simultaneous"], Some("Simultaneous. No touch."), None),
                scripted(
                    &["point-in-line-left"],
                    Some("Point-in-line left arrives. Touch left."),
                    None,
                ),
            ],
        };
        let reports = check_script(&script);
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.status == CheckStatus::Passed));
    }
}
