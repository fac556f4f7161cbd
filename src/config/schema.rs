//! Call-script schema
//!
//! A call script is a YAML list of independent phrases, each given as the
//! choice ids a presentation layer would submit, optionally with the call
//! or error it is expected to produce.

use serde::{Deserialize, Serialize};

/// Root of a call-script file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallScript {
    /// Optional human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Phrases to replay, each on a fresh engine.
    #[serde(default)]
    pub phrases: Vec<ScriptedPhrase>,
}

/// One phrase in a call script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedPhrase {
    /// Unique name within the script.
    pub name: String,

    /// Choice ids, in submission order.
    pub choices: Vec<String>,

    /// Expected rendered call once all choices are applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<String>,

    /// Expected engine error instead of a call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<ExpectedError>,
}

/// Engine error a scripted phrase is expected to raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpectedError {
    /// A choice is not legal where it is submitted.
    InvalidChoice,
    /// The phrase is malformed.
    Malformed,
}
