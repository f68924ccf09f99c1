//! Type-safe logging macros using Code types with Display support

// ============================================================================
// ERROR LOGGING
// ============================================================================

/// Log error with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, position = $position:expr) => {
        $crate::logging::log_error_with_context($code, $message, $position, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };

    ($code:expr, $message:expr, position = $position:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, $position, context_refs)
        }
    };
}

// ============================================================================
// SUCCESS LOGGING
// ============================================================================

/// Log success with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// INFO / WARNING / DEBUG
// ============================================================================

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

/// Log warning message - accepts Display types for context values
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        $crate::logging::emit($crate::logging::LogEvent::warning($message))
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let mut event = $crate::logging::LogEvent::warning($message);
            $(
                event = event.with_context($key, &format!("{}", $value));
            )+
            $crate::logging::emit(event)
        }
    };
}

/// Log debug message; skipped entirely below the configured level
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::emit($crate::logging::LogEvent::debug($message))
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            let mut event = $crate::logging::LogEvent::debug($message);
            $(
                event = event.with_context($key, &format!("{}", $value));
            )+
            $crate::logging::emit(event)
        }
    };
}

// ============================================================================
// CONVENIENCE
// ============================================================================

/// Log a success code with a standard `duration_ms` entry
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        $crate::log_success!($code, $message,
            "duration_ms" => $duration.as_secs_f64() * 1000.0
        )
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+) => {
        $crate::log_success!($code, $message,
            "duration_ms" => $duration.as_secs_f64() * 1000.0,
            $($key => $value),+
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::CellPosition;

    #[test]
    fn test_macros_are_silent_without_global_logger() {
        // Either uninitialized (no-op) or initialized by another test; both must not panic.
        let duration = std::time::Duration::from_millis(12);

        log_error!(codes::syntax::NUMERAL_SYNTAX, "Not an integer",
            "field" => "factors",
            "token" => "abc"
        );
        log_error!(codes::range::VALUE_OUT_OF_RANGE, "Cell out of range",
            position = Some(CellPosition::new(2, 5)),
            "field" => "chsets"
        );
        log_success!(codes::success::MANDATORY_CHECKS_PASSED, "Mandatory checks passed",
            "fields" => 3
        );
        log_info!("Validation pass started", "mode" => "check/main");
        log_warning!("Mandatory checks failed", "problems" => 2);
        log_debug!("Tiled ranges", "width" => 8);
        log_performance!(codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Validation complete",
            duration = duration,
            "problems" => 0
        );
    }
}
