//! Call-script checking
//!
//! Loads each script, replays every phrase and reports which expectations
//! held. Every script is processed even after a failure.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::{CheckStatus, PhraseReport, check_script, load_script};
use crate::error::{ConfigError, FenceCallError};

/// Result of checking one script file.
#[derive(Debug, Serialize)]
pub struct ScriptReport {
    /// Script path as given.
    pub script: String,
    /// Script title, if loaded and set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether the script loaded and every expectation held.
    pub ok: bool,
    /// Load or validation errors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Per-phrase results.
    pub phrases: Vec<PhraseReport>,
}

/// Checks every script given on the command line.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationFailed`] if any script fails to load
/// or any phrase fails its expectation.
pub fn run(args: &CheckArgs) -> Result<(), FenceCallError> {
    let reports: Vec<ScriptReport> = args.scripts.iter().map(|p| check_file(p)).collect();

    match args.format {
        OutputFormat::Human => {
            for report in &reports {
                print_human(report);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    let failed = reports.iter().filter(|r| !r.ok).count();
    if failed > 0 {
        return Err(ConfigError::ValidationFailed { count: failed }.into());
    }
    Ok(())
}

/// Loads and checks a single script file.
#[must_use]
pub fn check_file(path: &Path) -> ScriptReport {
    tracing::info!(file = %path.display(), "checking call script");
    let script = path.display().to_string();

    let loaded = match load_script(path) {
        Ok(loaded) => loaded,
        Err(err) => {
            let mut errors = vec![err.to_string()];
            if let ConfigError::ValidationError { errors: issues, .. } = &err {
                errors.extend(issues.iter().map(ToString::to_string));
            }
            return ScriptReport {
                script,
                title: None,
                ok: false,
                errors,
                phrases: Vec::new(),
            };
        }
    };

    for warning in &loaded.warnings {
        tracing::warn!(location = %warning.path, "{}", warning.message);
    }

    let phrases = check_script(&loaded.script);
    let ok = phrases.iter().all(|p| p.status != CheckStatus::Failed);
    ScriptReport {
        script,
        title: loaded.script.title,
        ok,
        errors: Vec::new(),
        phrases,
    }
}

fn print_human(report: &ScriptReport) {
    match &report.title {
        Some(title) => println!("{} ({title})", report.script),
        None => println!("{}", report.script),
    }
    for error in &report.errors {
        println!("  {error}");
    }
    for phrase in &report.phrases {
        let tag = match phrase.status {
            CheckStatus::Passed => "PASS",
            CheckStatus::Failed => "FAIL",
            CheckStatus::Replayed => "----",
        };
        println!("  {tag} {}: {}", phrase.name, phrase.call);
        if let Some(detail) = &phrase.detail {
            println!("       {detail}");
        }
    }
    let passed = report
        .phrases
        .iter()
        .filter(|p| p.status == CheckStatus::Passed)
        .count();
    println!(
        "  {} of {} phrase(s) passed{}",
        passed,
        report.phrases.len(),
        if report.ok { "" } else { ", script FAILED" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn script_file(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn passing_script_is_ok() {
        let file = script_file(
            "title: basics\nphrases:\n  - name: simul\n    choices: [simultaneous]\n    expect: Simultaneous. No touch.\n",
        );
        let report = check_file(file.path());
        assert!(report.ok);
        assert_eq!(report.title.as_deref(), Some("basics"));
        assert_eq!(report.phrases.len(), 1);
    }

    #[test]
    fn failing_expectation_marks_script() {
        let file = script_file(
            "phrases:\n  - name: wrong\n    choices: [attack-left, arrives]\n    expect: Attack right arrives. Touch right.\n",
        );
        let report = check_file(file.path());
        assert!(!report.ok);
        assert_eq!(report.phrases[0].status, CheckStatus::Failed);
    }

    #[test]
    fn invalid_script_lists_issues() {
        let file = script_file("phrases:\n  - name: typo\n    choices: [atack-left]\n");
        let report = check_file(file.path());
        assert!(!report.ok);
        assert!(report.phrases.is_empty());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[1].contains("did you mean 'attack-left'"));
    }

    #[test]
    fn missing_file_is_reported() {
        let report = check_file(Path::new("/nonexistent/fencecall.yaml"));
        assert!(!report.ok);
        assert!(report.errors[0].starts_with("file not found"));
    }
}
