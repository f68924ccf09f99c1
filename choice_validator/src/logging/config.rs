//! Logging configuration: compile-time limits plus runtime user preferences.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; must happen before `init_global_logging`
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Capacity of the in-memory event buffer
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_MESSAGE_LENGTH < 80 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    if MAX_CONTEXT_ENTRIES == 0 {
        return Err("At least one context entry per event is required".to_string());
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Compile-time ===\n\
         - Log buffer size: {}\n\
         - Max message length: {}\n\
         - Max context entries: {}\n\
         === Runtime ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        MAX_CONTEXT_ENTRIES,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
    )
}
