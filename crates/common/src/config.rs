//! Application configuration.
//!
//! Only front ends load configuration from disk. Engine crates receive the
//! relevant sections as explicit arguments.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CutlineError, CutlineResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Undo/redo history settings.
    pub history: HistoryConfig,

    /// Quick-command rule settings.
    pub quick_commands: QuickCommandConfig,

    /// External command interpreter settings.
    pub interpreter: InterpreterConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Undo/redo history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undo snapshots retained. Oldest entries are
    /// discarded first.
    pub max_depth: usize,
}

/// Settings for the deterministic quick-command rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickCommandConfig {
    /// Words that mark a transcript segment as filler (matched
    /// case-insensitively, surrounding punctuation ignored).
    pub filler_words: Vec<String>,

    /// Annotations with a confidence below this value are ignored.
    pub min_confidence: f64,
}

/// Settings for the external natural-language interpreter.
///
/// The interpreter is an external program that reads a JSON request on
/// stdin and writes a JSON response on stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Interpreter executable. `None` disables interpretation.
    pub program: Option<PathBuf>,

    /// Extra arguments passed to the program.
    pub args: Vec<String>,

    /// API key forwarded to the program as `CUTLINE_API_KEY`.
    pub api_key: Option<String>,

    /// Maximum time to wait for a response.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cutline=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl Default for QuickCommandConfig {
    fn default() -> Self {
        Self {
            filler_words: ["um", "umm", "uh", "uhh", "uhm", "er", "erm", "ah", "hmm", "mhm"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            min_confidence: 0.0,
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: vec![],
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields defaults. An unreadable or invalid file is an
    /// error so the caller can report it once logging is up.
    pub fn load() -> CutlineResult<Self> {
        Self::load_or_default(&config_file_path())
    }

    /// Load config from `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> CutlineResult<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> CutlineResult<Self> {
        if !path.exists() {
            return Err(CutlineError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> CutlineResult<()> {
        let min_confidence = self.quick_commands.min_confidence;
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(CutlineError::config(format!(
                "quick_commands.min_confidence must be within [0, 1], got {min_confidence}"
            )));
        }
        if self.interpreter.timeout_secs == 0 {
            return Err(CutlineError::config(
                "interpreter.timeout_secs must be positive",
            ));
        }
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cutline").join("config.json")
}
