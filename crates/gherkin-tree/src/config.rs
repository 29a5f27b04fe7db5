//! Parser configuration parsed from environment variables.
//!
//! Every setting can be overridden via environment variables prefixed with
//! `GHERKIN_TREE_`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use gherkin_tree_keywords::DEFAULT_LANGUAGE;

use crate::error::ConfigError;

const LANGUAGE_VAR: &str = "GHERKIN_TREE_LANGUAGE";
const CACHE_DIR_VAR: &str = "GHERKIN_TREE_CACHE_DIR";
const LOG_LEVEL_VAR: &str = "GHERKIN_TREE_LOG_LEVEL";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information such as language switches.
    Debug,
    /// Standard informational messages.
    #[default]
    Info,
    /// Warning messages, such as skipped feature files.
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::Invalid(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub const fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for parsing and loading features.
///
/// # Environment Variables
///
/// - `GHERKIN_TREE_LANGUAGE`: language used when a file has no
///   `# language:` pragma
/// - `GHERKIN_TREE_CACHE_DIR`: root directory of the on-disk feature cache
/// - `GHERKIN_TREE_LOG_LEVEL`: log level (trace, debug, info, warn, error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Language code used when a file has no pragma.
    pub default_language: String,
    /// Root directory of the feature cache; no caching when `None`.
    pub cache_dir: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            cache_dir: None,
            log_level: LogLevel::default(),
        }
    }
}

impl ParserConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `GHERKIN_TREE_LANGUAGE`, `GHERKIN_TREE_CACHE_DIR` and
    /// `GHERKIN_TREE_LOG_LEVEL`. Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// `lookup` receives the `GHERKIN_TREE_*` variable names and returns
    /// their values, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable contains an invalid
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_language = lookup(LANGUAGE_VAR)
            .map(|val| parse_language(&val))
            .transpose()?
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let cache_dir = lookup(CACHE_DIR_VAR)
            .map(|val| parse_cache_dir(&val))
            .transpose()?;

        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|val| val.parse())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            default_language,
            cache_dir,
            log_level,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Intended for caller-supplied settings that take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        default_language: Option<String>,
        cache_dir: Option<PathBuf>,
        log_level: Option<LogLevel>,
    ) -> Self {
        if let Some(language) = default_language {
            self.default_language = language;
        }

        if let Some(dir) = cache_dir {
            self.cache_dir = Some(dir);
        }

        if let Some(level) = log_level {
            self.log_level = level;
        }

        self
    }

    /// Create a new configuration with the specified default language.
    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Create a new configuration caching parsed features under `dir`.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

fn parse_cache_dir(value: &str) -> Result<PathBuf, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "cache directory must not be empty".to_string(),
        ));
    }
    Ok(PathBuf::from(value))
}

fn parse_language(value: &str) -> Result<String, ConfigError> {
    let code = value.trim();
    if code.is_empty()
        || !code
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Invalid(format!(
            "invalid language code '{value}'"
        )));
    }
    Ok(code.to_string())
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ParserConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        ParserConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn log_level_parses_valid_values() {
        assert_eq!("trace".parse::<LogLevel>().ok(), Some(LogLevel::Trace));
        assert_eq!("debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
        assert_eq!("info".parse::<LogLevel>().ok(), Some(LogLevel::Info));
        assert_eq!("warn".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert_eq!("warning".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert_eq!("error".parse::<LogLevel>().ok(), Some(LogLevel::Error));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        assert_eq!("TRACE".parse::<LogLevel>().ok(), Some(LogLevel::Trace));
        assert_eq!("Debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[test]
    fn config_default_values() {
        let config = ParserConfig::default();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.cache_dir, None);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn builders_set_fields() {
        let config = ParserConfig::default()
            .with_default_language("fr")
            .with_cache_dir("/tmp/cache")
            .with_log_level(LogLevel::Debug);
        assert_eq!(config.default_language, "fr");
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/cache")));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let config = ParserConfig::default().apply_overrides(
            Some("de".to_string()),
            None,
            Some(LogLevel::Error),
        );
        assert_eq!(config.default_language, "de");
        assert_eq!(config.cache_dir, None);
        assert_eq!(config.log_level, LogLevel::Error);

        let config = ParserConfig::default().apply_overrides(None, None, None);
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn lookup_uses_defaults_when_unset() {
        assert_eq!(from_vars(&[]).unwrap(), ParserConfig::default());
    }

    #[test]
    fn lookup_reads_every_variable() {
        let config = from_vars(&[
            ("GHERKIN_TREE_LANGUAGE", " pt-BR "),
            ("GHERKIN_TREE_CACHE_DIR", "/var/cache/features"),
            ("GHERKIN_TREE_LOG_LEVEL", "WARN"),
        ])
        .unwrap();
        assert_eq!(config.default_language, "pt-BR");
        assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/features")));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn lookup_rejects_invalid_values() {
        for (name, value) in [
            ("GHERKIN_TREE_LANGUAGE", "en us"),
            ("GHERKIN_TREE_CACHE_DIR", "  "),
            ("GHERKIN_TREE_LOG_LEVEL", "chatty"),
        ] {
            let result = from_vars(&[(name, value)]);
            assert!(
                matches!(result, Err(ConfigError::Invalid(_))),
                "{name}={value:?} should be rejected"
            );
        }
    }
}
