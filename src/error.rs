//! Error types for `fencecall`
//!
//! The error hierarchy for the phrase engine, call-script loading and the
//! CLI, plus the exit codes each maps to.

use std::path::PathBuf;
use thiserror::Error;

use crate::protocol::EngineState;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `fencecall` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// Call-script error (invalid YAML, validation failure, failed expectation)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Phrase engine error (invalid choice, malformed phrase)
    pub const PHRASE_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `fencecall` operations.
///
/// Aggregates the domain errors and maps each to an exit code.
#[derive(Debug, Error)]
pub enum FenceCallError {
    /// Call-script loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Phrase engine error
    #[error(transparent)]
    Phrase(#[from] PhraseError),

    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FenceCallError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Phrase(_) => ExitCode::PHRASE_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Phrase Engine Errors
// ============================================================================

/// Phrase engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhraseError {
    /// The choice id is unknown or not offered in the current state.
    /// Engine state is left untouched.
    #[error(
        "invalid choice '{choice}' in state {state}{}",
        suggestion.map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"))
    )]
    InvalidChoice {
        /// The rejected id
        choice: String,
        /// State the engine was in
        state: EngineState,
        /// Closest legal id, if one is near
        suggestion: Option<&'static str>,
    },

    /// The recorded actions cannot end the way the last choice claims.
    /// The engine stays in the invalid state until reset.
    #[error("malformed phrase: {call}")]
    MalformedPhrase {
        /// Call rendered from the actions recorded so far
        call: String,
    },

    /// A transition needed a right-of-way holder and none was set.
    #[error("no right-of-way holder in state {state}")]
    PriorityUnset {
        /// State the engine was in
        state: EngineState,
    },
}

// ============================================================================
// Call-Script Errors
// ============================================================================

/// Call-script loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the script
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Script validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the script
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Script file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// One or more scripts failed validation or expectations.
    #[error("{count} script(s) failed")]
    ValidationFailed {
        /// Number of scripts that failed.
        count: usize,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single issue found while validating a call script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "phrases[2].choices[1]")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - the script cannot be checked
    Error,
    /// Warning - potential issue that does not block checking
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_per_variant() {
        let phrase = FenceCallError::Phrase(PhraseError::MalformedPhrase {
            call: "Attack left is parried, no riposte".to_string(),
        });
        assert_eq!(phrase.exit_code(), ExitCode::PHRASE_ERROR);

        let config = FenceCallError::Config(ConfigError::ValidationFailed { count: 1 });
        assert_eq!(config.exit_code(), ExitCode::CONFIG_ERROR);

        let io = FenceCallError::Io(std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), ExitCode::IO_ERROR);

        let usage = FenceCallError::Usage("missing choices".to_string());
        assert_eq!(usage.exit_code(), ExitCode::USAGE_ERROR);
    }

    #[test]
    fn invalid_choice_message_with_suggestion() {
        let err = PhraseError::InvalidChoice {
            choice: "arives".to_string(),
            state: EngineState::AwaitingOutcome(crate::phrase::Offensive::Attack),
            suggestion: Some("arrives"),
        };
        assert_eq!(
            err.to_string(),
            "invalid choice 'arives' in state attack-outcome (did you mean 'arrives'?)"
        );
    }

    #[test]
    fn invalid_choice_message_without_suggestion() {
        let err = PhraseError::InvalidChoice {
            choice: "lunge".to_string(),
            state: EngineState::Done,
            suggestion: None,
        };
        assert_eq!(err.to_string(), "invalid choice 'lunge' in state done");
    }

    #[test]
    fn parse_error_includes_line() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("bout.yaml"),
            line: Some(4),
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "parse error in bout.yaml (line 4): bad indent");
    }

    #[test]
    fn validation_issue_display() {
        let issue = ValidationIssue {
            path: "phrases[0].choices[1]".to_string(),
            message: "unknown choice 'lunge'".to_string(),
            severity: Severity::Error,
        };
        assert_eq!(
            issue.to_string(),
            "error: unknown choice 'lunge' at phrases[0].choices[1]"
        );
    }
}
