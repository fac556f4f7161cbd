//! Logging initialization for `fencecall`.
//!
//! Log records go to stderr. The interactive `call` session shares stderr
//! with the JSONL event stream when `--events` is on, so in that case the
//! log records are written as JSON lines as well and the stream stays
//! machine-readable.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable that overrides `-v` with a full filter directive.
pub const LOG_LEVEL_ENV: &str = "FENCECALL_LOG_LEVEL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

impl LogFormat {
    /// Picks the format for stderr: JSON when events are written there too.
    #[must_use]
    pub const fn for_stderr(events_on_stderr: bool) -> Self {
        if events_on_stderr { Self::Json } else { Self::Human }
    }
}

/// Maps `-v` count to a default directive: warn, info, debug, then trace.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter from an optional override directive, falling back to
/// the verbosity default when the override is blank or does not parse.
fn build_filter(verbosity: u8, env_override: Option<String>) -> EnvFilter {
    env_override
        .filter(|directive| !directive.trim().is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(verbosity_to_directive(verbosity)))
}

/// Whether to emit ANSI escapes for the given color choice.
const fn ansi_enabled(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Auto => stderr_is_terminal && !no_color,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Initializes the global tracing subscriber on stderr.
///
/// `FENCECALL_LOG_LEVEL` takes precedence over `verbosity`. Uses
/// `try_init()`, so a second call is a no-op.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = build_filter(verbosity, std::env::var(LOG_LEVEL_ENV).ok());
    let show_target = verbosity >= 2;

    match format {
        LogFormat::Human => {
            let ansi = ansi_enabled(
                color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            );
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(ansi)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
