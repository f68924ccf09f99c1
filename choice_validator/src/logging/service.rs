//! Logging service and the logger back ends it can write to

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service from the runtime logging preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(NullLogger)
        } else if config::use_structured_logging() {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_warning(&self, message: &str) {
        self.log_event(LogEvent::warning(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Discards everything; used when console output is switched off
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Plain-text console logger; errors go to stderr
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.level {
                LogLevel::Error => eprintln!("{}", event.format()),
                _ => println!("{}", event.format()),
            }
        }
    }
}

/// JSON-lines logger for tooling integration
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }
        let line = event.format_json().unwrap_or_else(|_| event.format());
        match event.level {
            LogLevel::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

/// Memory logger for testing
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    // A panic while holding the lock only poisons a test buffer; keep reading it.
    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.is_error()).cloned().collect()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_error() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_info() && e.code == code)
    }

    pub fn get_events_by_category(&self, category: &str) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.category() == category)
            .cloned()
            .collect()
    }

    /// Events tagged with the given submission context
    pub fn get_events_for_submission(&self, submission: &str) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.context.get("submission").map(String::as_str) == Some(submission))
            .cloned()
            .collect()
    }

    pub fn get_summary(&self) -> EventSummary {
        let events = self.lock();
        EventSummary {
            total_count: events.len(),
            error_count: events.iter().filter(|e| e.is_error()).count(),
            warning_count: events.iter().filter(|e| e.is_warning()).count(),
            info_count: events.iter().filter(|e| e.is_info()).count(),
            debug_count: events.iter().filter(|e| e.is_debug()).count(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();

        let max_events = config::get_log_buffer_size();
        if events.len() >= max_events {
            let remove_count = events.len() - max_events + 1;
            events.drain(0..remove_count);
        }

        events.push(event.clone());
    }
}

/// Summary of events in memory logger
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }
}

/// Forwards events to the `log` crate so hosts can use their own backend
#[cfg(feature = "log-facade")]
pub struct LogFacadeLogger {
    target: &'static str,
}

#[cfg(feature = "log-facade")]
impl LogFacadeLogger {
    pub fn new() -> Self {
        Self {
            target: "choice_validator",
        }
    }
}

#[cfg(feature = "log-facade")]
impl Default for LogFacadeLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "log-facade")]
impl Logger for LogFacadeLogger {
    fn log(&self, event: &LogEvent) {
        let level = match event.level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        };
        log::log!(target: self.target, level, "{}", event.format());
    }
}

/// Create logging service based on current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Create testing logger (memory-based, all events captured)
pub fn create_test_logger() -> Arc<MemoryLogger> {
    Arc::new(MemoryLogger::new())
}
