//! Call-script loader
//!
//! Loading pipeline:
//! 1. Size check against [`ScriptLimits`]
//! 2. Read, strip UTF-8 BOM
//! 3. YAML parsing into [`CallScript`]
//! 4. Validation (all issues collected)

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::CallScript;
use crate::config::validation::Validator;
use crate::error::{ConfigError, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Limits on call-script size.
#[derive(Debug, Clone)]
pub struct ScriptLimits {
    /// Maximum script file size in bytes.
    pub max_script_size: usize,

    /// Maximum number of phrases in one script.
    pub max_phrases: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_script_size: env_or("FENCECALL_MAX_SCRIPT_SIZE", 1024 * 1024),
            max_phrases: env_or("FENCECALL_MAX_PHRASES", 1000),
        }
    }
}

/// Result of loading a call script.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated script.
    pub script: CallScript,

    /// Non-fatal validation warnings.
    pub warnings: Vec<ValidationIssue>,
}

/// Call-script loader.
#[derive(Debug, Default)]
pub struct ScriptLoader {
    limits: ScriptLimits,
}

impl ScriptLoader {
    /// Creates a loader with the given limits.
    #[must_use]
    pub const fn new(limits: ScriptLimits) -> Self {
        Self { limits }
    }

    /// Loads and validates a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file cannot be read,
    /// [`ConfigError::InvalidValue`] if it exceeds the size limit,
    /// [`ConfigError::ParseError`] on malformed YAML and
    /// [`ConfigError::ValidationError`] if validation finds errors.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.limits.max_script_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.limits.max_script_size),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        debug!(path = %path.display(), bytes = file_size, "loading call script");
        self.load_from_str(&raw, path)
    }

    /// Parses and validates script text. `origin` is used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] on malformed YAML and
    /// [`ConfigError::ValidationError`] if validation finds errors.
    pub fn load_from_str(&self, yaml: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
        let yaml = yaml.strip_prefix('\u{feff}').unwrap_or(yaml);

        let script: CallScript =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
                path: origin.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        let result = Validator::new().validate(&script, &self.limits);
        if !result.is_valid() {
            return Err(ConfigError::ValidationError {
                path: origin.display().to_string(),
                errors: result.errors,
            });
        }

        Ok(LoadResult {
            script,
            warnings: result.warnings,
        })
    }
}

/// Convenience wrapper: loads `path` with default limits.
///
/// # Errors
///
/// See [`ScriptLoader::load`].
pub fn load_script(path: impl Into<PathBuf>) -> Result<LoadResult, ConfigError> {
    ScriptLoader::default().load(&path.into())
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
