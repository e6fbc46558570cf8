// UndoableCommand trait definition

use crate::store::{FileStore, StoreError};
use std::fmt;

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Which history stack an operation looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStack {
    Undo,
    Redo,
}

impl fmt::Display for HistoryStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryStack::Undo => write!(f, "undo"),
            HistoryStack::Redo => write!(f, "redo"),
        }
    }
}

/// Failures reported by commands and by the CommandManager
///
/// None of these are fatal. They are status reports handed back to the
/// caller; the store and both history stacks stay consistent.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Delete or rename target is absent
    #[error("File {0} does not exist")]
    NotFound(String),

    /// The command holds no state it could reverse
    #[error("Undo not possible: {0}")]
    UndoUnavailable(String),

    /// Nothing on the relevant stack
    #[error("Nothing to {0}")]
    EmptyHistory(HistoryStack),

    /// Backend failure other than a missing file
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(path) => CommandError::NotFound(path),
            other => CommandError::Store(other),
        }
    }
}

/// Variant tag of a concrete command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Delete,
    Rename,
}

/// Trait for commands that support undo/redo
///
/// A command is bound to its arguments at construction and receives the
/// store on every call. `execute` may be called again after `undo` (redo),
/// so it must capture any reversal state afresh each time.
///
/// # Example
/// ```
/// use filecmd::command::{CommandKind, CommandResult, UndoableCommand};
/// use filecmd::store::{FileStore, MemoryStore};
///
/// struct AppendCommand {
///     path: String,
///     suffix: String,
///     previous: Option<String>,
/// }
///
/// impl UndoableCommand for AppendCommand {
///     fn execute(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
///         let current = store.read(&self.path)?.unwrap_or_default();
///         store.create(&self.path, &format!("{}{}", current, self.suffix))?;
///         self.previous = Some(current);
///         Ok(())
///     }
///
///     fn undo(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
///         if let Some(previous) = &self.previous {
///             store.create(&self.path, previous)?;
///         }
///         Ok(())
///     }
///
///     fn description(&self) -> String {
///         format!("Append to {}", self.path)
///     }
///
///     fn kind(&self) -> CommandKind {
///         CommandKind::Create
///     }
/// }
///
/// let mut store = MemoryStore::new();
/// let mut cmd = AppendCommand { path: "log".into(), suffix: "x".into(), previous: None };
/// cmd.execute(&mut store).unwrap();
/// assert_eq!(store.read("log").unwrap().as_deref(), Some("x"));
/// ```
pub trait UndoableCommand: Send {
    /// Perform the forward action
    ///
    /// Should store whatever is needed to reverse it.
    fn execute(&mut self, store: &mut dyn FileStore) -> CommandResult<()>;

    /// Reverse the most recent `execute`
    ///
    /// Must not panic when nothing was captured; report `UndoUnavailable` instead.
    fn undo(&mut self, store: &mut dyn FileStore) -> CommandResult<()>;

    /// Human-readable description, e.g. "Rename a.txt -> b.txt"
    fn description(&self) -> String;

    fn kind(&self) -> CommandKind;
}
