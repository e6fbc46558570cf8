// Notifications - status signals from store, history and script operations

use crate::command::{CommandError, CommandResult};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
        };
        write!(f, "{}", label)
    }
}

/// What part of the system produced the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Store,
    History,
    Script,
    Generic,
}

/// Notification with timestamp and metadata
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub category: NotificationCategory,
    pub message: String,
    pub timestamp: u64, // Unix timestamp in milliseconds
}

impl Notification {
    /// Create a notification stamped with the current time
    pub fn new(level: NotificationLevel, category: NotificationCategory, message: String) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            level,
            category,
            message,
            timestamp,
        }
    }

    pub fn info(category: NotificationCategory, message: String) -> Self {
        Self::new(NotificationLevel::Info, category, message)
    }

    pub fn warning(category: NotificationCategory, message: String) -> Self {
        Self::new(NotificationLevel::Warning, category, message)
    }

    pub fn error(category: NotificationCategory, message: String) -> Self {
        Self::new(NotificationLevel::Error, category, message)
    }

    /// Turn the result of a manager operation into a notification
    ///
    /// `action` is a past-tense verb such as "Executed", "Undid" or "Redid".
    /// Reported command failures become warnings; backend failures become errors.
    pub fn from_outcome(action: &str, outcome: &CommandResult<String>) -> Self {
        match outcome {
            Ok(description) => Self::info(
                NotificationCategory::History,
                format!("{}: {}", action, description),
            ),
            Err(err @ CommandError::NotFound(_)) => {
                Self::warning(NotificationCategory::Store, err.to_string())
            }
            Err(err @ (CommandError::UndoUnavailable(_) | CommandError::EmptyHistory(_))) => {
                Self::warning(NotificationCategory::History, err.to_string())
            }
            Err(err @ CommandError::Store(_)) => {
                Self::error(NotificationCategory::Store, err.to_string())
            }
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
