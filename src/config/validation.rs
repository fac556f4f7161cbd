//! Call-script validation
//!
//! Validation collects every issue instead of stopping at the first one,
//! so a script author sees all problems in one pass.

use std::collections::HashSet;

use crate::config::loader::ScriptLimits;
use crate::config::schema::{CallScript, ScriptedPhrase};
use crate::error::{Severity, ValidationIssue};
use crate::protocol::{Choice, suggest_choice};

// ============================================================================
// Public API
// ============================================================================

/// Result of script validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent checking).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Call-script validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a script and returns every issue found.
    pub fn validate(&mut self, script: &CallScript, limits: &ScriptLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        if script.phrases.is_empty() {
            self.add_error("phrases", "Script must contain at least one phrase");
        }

        if script.phrases.len() > limits.max_phrases {
            self.add_error(
                "phrases",
                format!(
                    "Script has {} phrases, limit is {}",
                    script.phrases.len(),
                    limits.max_phrases
                ),
            );
        }

        let mut seen = HashSet::new();
        for (i, phrase) in script.phrases.iter().enumerate() {
            let path = format!("phrases[{i}]");
            if !phrase.name.is_empty() && !seen.insert(phrase.name.as_str()) {
                self.add_error(
                    format!("{path}.name"),
                    format!("Duplicate phrase name '{}'", phrase.name),
                );
            }
            self.validate_phrase(phrase, &path);
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_phrase(&mut self, phrase: &ScriptedPhrase, path: &str) {
        if phrase.name.trim().is_empty() {
            self.add_error(format!("{path}.name"), "Phrase name cannot be empty");
        }

        if phrase.choices.is_empty() {
            self.add_error(format!("{path}.choices"), "Phrase must list at least one choice");
        }

        for (j, id) in phrase.choices.iter().enumerate() {
            if Choice::from_id(id).is_none() {
                let hint = suggest_choice(id, &Choice::ALL)
                    .map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"));
                self.add_error(
                    format!("{path}.choices[{j}]"),
                    format!("Unknown choice '{id}'{hint}"),
                );
            }
        }

        if phrase.expect.is_some() && phrase.expect_error.is_some() {
            self.add_error(
                path.to_string(),
                "'expect' and 'expect_error' are mutually exclusive",
            );
        }

        if phrase.expect.is_none() && phrase.expect_error.is_none() {
            self.add_warning(
                path.to_string(),
                "Phrase has no expectation; it will only be replayed",
            );
        }
    }

    fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ExpectedError;

    fn phrase(name: &str, choices: &[&str]) -> ScriptedPhrase {
        ScriptedPhrase {
            name: name.to_string(),
            choices: choices.iter().map(ToString::to_string).collect(),
            expect: Some("Simultaneous. No touch.".to_string()),
            expect_error: None,
        }
    }

    fn validate(script: &CallScript) -> ValidationResult {
        Validator::new().validate(script, &ScriptLimits::default())
    }

    #[test]
    fn valid_script_has_no_issues() {
        let script = CallScript {
            title: None,
            phrases: vec![phrase("simul", &["simultaneous"])],
        };
        let result = validate(&script);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn empty_script_is_an_error() {
        let script = CallScript {
            title: None,
            phrases: vec![],
        };
        assert!(!validate(&script).is_valid());
    }

    #[test]
    fn collects_all_errors() {
        let script = CallScript {
            title: None,
            phrases: vec![
                phrase("dup", &["simultaneous"]),
                phrase("dup", &["atack-left", "arrives"]),
                phrase("", &[]),
            ],
        };
        let result = validate(&script);
        let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"phrases[1].name"));
        assert!(paths.contains(&"phrases[1].choices[0]"));
        assert!(paths.contains(&"phrases[2].name"));
        assert!(paths.contains(&"phrases[2].choices"));
    }

    #[test]
    fn unknown_choice_gets_suggestion() {
        let script = CallScript {
            title: None,
            phrases: vec![phrase("typo", &["atack-left"])],
        };
        let result = validate(&script);
        assert_eq!(
            result.errors[0].message,
            "Unknown choice 'atack-left' (did you mean 'attack-left'?)"
        );
    }

    #[test]
    fn expectations_are_exclusive() {
        let mut p = phrase("both", &["simultaneous"]);
        p.expect_error = Some(ExpectedError::Malformed);
        let script = CallScript {
            title: None,
            phrases: vec![p],
        };
        assert!(!validate(&script).is_valid());
    }

    #[test]
    fn missing_expectation_is_a_warning() {
        let mut p = phrase("bare", &["simultaneous"]);
        p.expect = None;
        let script = CallScript {
            title: None,
            phrases: vec![p],
        };
        let result = validate(&script);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn phrase_limit_enforced() {
        let script = CallScript {
            title: None,
            phrases: vec![phrase("a", &["simultaneous"]), phrase("b", &["simultaneous"])],
        };
        let limits = ScriptLimits {
            max_phrases: 1,
            ..ScriptLimits::default()
        };
        let result = Validator::new().validate(&script, &limits);
        assert!(!result.is_valid());
    }
}
