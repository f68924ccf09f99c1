// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPreferences {
    /// Whether to log every reported problem through the global logger
    pub log_each_problem: bool,

    /// Whether to log the duration of each validation pass
    pub log_timing: bool,

    /// Whether rendered reports start with the banner line
    pub include_banner: bool,
}

impl Default for ValidationPreferences {
    fn default() -> Self {
        Self {
            log_each_problem: env::var(env_vars::VALIDATION_LOG_EACH_PROBLEM)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_timing: env::var(env_vars::VALIDATION_LOG_TIMING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_banner: env::var(env_vars::VALIDATION_INCLUDE_BANNER)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether to write log events to the console at all
    pub enable_console_logging: bool,

    /// Minimum level written by the configured logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub validation: ValidationPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a runtime configuration file; missing tables fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Validation
    pub const VALIDATION_LOG_EACH_PROBLEM: &str = "CHOICE_VALIDATION_LOG_EACH_PROBLEM";
    pub const VALIDATION_LOG_TIMING: &str = "CHOICE_VALIDATION_LOG_TIMING";
    pub const VALIDATION_INCLUDE_BANNER: &str = "CHOICE_VALIDATION_INCLUDE_BANNER";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "CHOICE_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CHOICE_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "CHOICE_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [validation]
            log_each_problem = false
            include_banner = false

            [logging]
            min_log_level = "debug"
            use_structured_logging = true
            "#,
        )
        .unwrap();

        assert!(!config.validation.log_each_problem);
        assert!(!config.validation.include_banner);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.use_structured_logging);
    }

    #[test]
    fn test_runtime_config_rejects_unknown_level() {
        let result = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"loud\"\n");
        assert!(result.is_err());
    }
}
