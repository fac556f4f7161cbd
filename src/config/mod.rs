//! Call scripts
//!
//! Loads, validates and checks YAML call scripts: lists of independent
//! phrases with the call each should produce.

pub mod check;
pub mod loader;
pub mod schema;
pub mod validation;

pub use check::{CheckStatus, PhraseReport, check_phrase, check_script};
pub use loader::{LoadResult, ScriptLimits, ScriptLoader, load_script};
pub use schema::{CallScript, ExpectedError, ScriptedPhrase};
pub use validation::{ValidationResult, Validator};
