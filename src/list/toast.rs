//! Toast notifications
//!
//! Transient, user-visible messages produced by list screens (fetch failures,
//! session expiry, confirmations).

use std::time::{Duration, Instant};

use owo_colors::OwoColorize;

/// How long a toast stays relevant after it was raised.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

/// A toast notification message
#[derive(Debug, Clone)]
pub struct Toast {
    /// The message to display
    pub message: String,
    /// The severity level of the toast
    pub level: ToastLevel,
    /// When the toast was created
    pub timestamp: Instant,
}

/// Severity level for toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl Toast {
    /// Create a new toast with the given message and level
    pub fn new(message: String, level: ToastLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Success)
    }

    pub fn is_expired(&self) -> bool {
        self.timestamp.elapsed() >= TOAST_TTL
    }

    fn marker(&self) -> &'static str {
        match self.level {
            ToastLevel::Info => "i",
            ToastLevel::Warning => "!",
            ToastLevel::Error => "x",
            ToastLevel::Success => "✓",
        }
    }

    /// Single-line rendering, colored by level when `color` is set.
    pub fn render(&self, color: bool) -> String {
        let line = format!("[{}] {}", self.marker(), self.message);
        if !color {
            return line;
        }
        match self.level {
            ToastLevel::Info => line.cyan().to_string(),
            ToastLevel::Warning => line.yellow().to_string(),
            ToastLevel::Error => line.red().to_string(),
            ToastLevel::Success => line.green().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        assert_eq!(Toast::error("Failed to load rooms").render(false), "[x] Failed to load rooms");
        assert_eq!(Toast::success("Signed in").render(false), "[✓] Signed in");
    }

    #[test]
    fn test_fresh_toast_not_expired() {
        assert!(!Toast::info("hello").is_expired());
    }
}
