//! Global logging module for the choice validator
//!
//! Thread-safe global logging with coded events and a per-thread submission
//! context. Nothing is written until `init_global_logging` (or
//! `init_global_logging_with_service`) has been called, so the engine can be
//! used as a plain library without any logging setup.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
#[cfg(feature = "log-facade")]
pub use service::LogFacadeLogger;
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

use crate::utils::CellPosition;

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static SUBMISSION_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());
    install(logging_service)
}

/// Initialize with custom service (tests and embedding hosts)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    install(service)
}

fn install(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    let required_codes = [
        codes::system::INTERNAL_ERROR,
        codes::presence::REQUIRED_FIELD_EMPTY,
        codes::dimension::DIMENSION_MISMATCH,
        codes::success::VALIDATION_ACCEPTED,
    ];
    for code in required_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for code: {}", code));
        }
    }

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// SUBMISSION CONTEXT MANAGEMENT
// ============================================================================

/// Tag events logged on this thread with a submission name
pub fn set_submission_context(name: &str) {
    SUBMISSION_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(name.to_string());
    });
}

pub fn clear_submission_context() {
    SUBMISSION_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with the submission context set, restoring the previous one after
pub fn with_submission_context<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_submission_context();
    set_submission_context(name);
    let result = f();
    match previous {
        Some(previous) => set_submission_context(&previous),
        None => clear_submission_context(),
    }
    result
}

pub fn get_current_submission_context() -> Option<String> {
    SUBMISSION_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Tag with the submission context and hand to the global logger, if any
pub fn emit(event: LogEvent) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    let event = match get_current_submission_context() {
        Some(name) => event.with_context("submission", &name),
        None => event,
    };
    logger.log_event(event);
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    position: Option<CellPosition>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);

    if let Some(p) = position {
        event = event.with_position(p);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    emit(event);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::success(code, message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    emit(event);
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::info(message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    emit(event);
}

/// Error logging that falls back to stderr when logging is uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    if let Some(logger) = try_get_global_logger() {
        diagnostics.push_str(&format!("Service level: {:?}\n", logger.min_level()));
    }
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}
