//! Event records produced by the validator's logging layer

use super::codes::{self, Code};
use crate::utils::CellPosition;
use std::collections::HashMap;
use std::time::SystemTime;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

/// A single logged occurrence
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub position: Option<CellPosition>,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    fn build(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: truncate_message(message),
            position: None,
            context: HashMap::new(),
        }
    }

    /// Create a new error event
    pub fn error(error_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Error, error_code, message)
    }

    /// Create a warning event without a specific code
    pub fn warning(message: &str) -> Self {
        Self::build(LogLevel::Warning, Code::new("W000"), message)
    }

    /// Create warning with specific code
    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Warning, warning_code, message)
    }

    /// Create an info event without a specific code
    pub fn info(message: &str) -> Self {
        Self::build(LogLevel::Info, Code::new("I000"), message)
    }

    /// Create a success event (info with success code)
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::build(LogLevel::Info, success_code, message)
    }

    /// Create a debug event
    pub fn debug(message: &str) -> Self {
        Self::build(LogLevel::Debug, Code::new("D000"), message)
    }

    /// Attach the matrix cell the event refers to
    pub fn with_position(mut self, position: CellPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        if self.context.len() < crate::config::compile_time::logging::MAX_CONTEXT_ENTRIES
            || self.context.contains_key(key)
        {
            self.context.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    /// Check if this event requires halting
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.code.as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.code.as_str())
    }

    /// Format for display
    pub fn format(&self) -> String {
        let position = self
            .position
            .map(|p| format!(" at row {}, column {}", p.row, p.column))
            .unwrap_or_default();

        format!(
            "[{}] {} - {}{}",
            self.level.as_str(),
            self.code.as_str(),
            self.message,
            position
        )
    }

    /// Format with registry metadata and context, one item per line
    pub fn format_detailed(&self) -> String {
        let mut output = self.format();

        output.push_str(&format!("\n  Category: {}", self.category()));
        output.push_str(&format!("\n  Severity: {}", self.severity()));

        if self.is_error() {
            output.push_str(&format!("\n  Recoverable: {}", self.is_recoverable()));
            output.push_str(&format!("\n  Requires halt: {}", self.requires_halt()));
        }

        let description = self.description();
        if description != "Unknown error" {
            output.push_str(&format!("\n  Description: {}", description));
        }

        let action = self.recommended_action();
        if action != "No specific action available" {
            output.push_str(&format!("\n  Recommended action: {}", action));
        }

        if !self.context.is_empty() {
            output.push_str("\n  Context:");
            let mut keys: Vec<&String> = self.context.keys().collect();
            keys.sort();
            for key in keys {
                output.push_str(&format!("\n    {}: {}", key, self.context[key]));
            }
        }

        output
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let timestamp = self
            .timestamp
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut json = serde_json::json!({
            "timestamp": timestamp,
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "recoverable": self.is_recoverable(),
                "requires_halt": self.requires_halt(),
                "description": self.description(),
                "recommended_action": self.recommended_action(),
            });
        }

        if let Some(position) = &self.position {
            json["position"] = serde_json::json!({
                "row": position.row,
                "column": position.column,
            });
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::Value::Object(
                self.context
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            );
        }

        serde_json::to_string(&json)
    }
}

/// Cap a message at the compile-time limit, respecting char boundaries
fn truncate_message(message: &str) -> String {
    let limit = crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
    if message.len() <= limit {
        return message.to_string();
    }
    let mut end = limit;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}
