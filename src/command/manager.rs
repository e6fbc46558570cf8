// CommandManager - Manages undo/redo stacks

use crate::command::trait_def::{
    CommandError, CommandKind, CommandResult, HistoryStack, UndoableCommand,
};
use crate::store::FileStore;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use uuid::Uuid;

/// A recorded command together with its identity
pub struct HistoryEntry {
    id: Uuid,
    executed_at: DateTime<Utc>,
    command: Box<dyn UndoableCommand>,
}

impl HistoryEntry {
    fn new(command: Box<dyn UndoableCommand>) -> Self {
        Self {
            id: Uuid::new_v4(),
            executed_at: Utc::now(),
            command,
        }
    }

    /// Stable identifier, kept while the entry moves between stacks
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Time of the latest forward execution (initial execute or redo)
    pub fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }

    pub fn description(&self) -> String {
        self.command.description()
    }

    pub fn kind(&self) -> CommandKind {
        self.command.kind()
    }
}

impl std::fmt::Debug for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("id", &self.id)
            .field("executed_at", &self.executed_at)
            .field("description", &self.command.description())
            .finish()
    }
}

/// Manages command execution and undo/redo functionality
///
/// The CommandManager maintains two stacks:
/// - Undo stack: Commands that have been executed and can be undone
/// - Redo stack: Commands that have been undone and can be redone
///
/// When a new command is executed:
/// 1. Execute the command
/// 2. Push it onto the undo stack, even if it reported a failure
/// 3. Clear the redo stack (new timeline, not restorable)
///
/// A command is always held by exactly one stack once it has been executed.
/// Failures reported by a command are returned to the caller but never stop
/// the command from moving between stacks.
///
/// # Memory Management
/// History is unbounded by default. With `with_history_limit`, the oldest
/// undo entry is dropped once the limit is exceeded.
pub struct CommandManager {
    /// Stack of commands that can be undone (most recent at the back)
    undo_stack: VecDeque<HistoryEntry>,

    /// Stack of commands that can be redone (most recent at the back)
    redo_stack: VecDeque<HistoryEntry>,

    /// Maximum number of commands to keep in undo history
    max_history: Option<NonZeroUsize>,
}

impl CommandManager {
    /// Create a new CommandManager with unbounded history
    pub fn new() -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_history: None,
        }
    }

    /// Create a new CommandManager that keeps at most `max_history` undo entries
    ///
    /// The limit is never zero, so the command just executed always stays undoable.
    pub fn with_history_limit(max_history: NonZeroUsize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_history.get()),
            redo_stack: VecDeque::new(),
            max_history: Some(max_history),
        }
    }

    /// Create a manager from an optional limit, as read from configuration
    pub fn from_limit(max_history: Option<NonZeroUsize>) -> Self {
        match max_history {
            Some(limit) => Self::with_history_limit(limit),
            None => Self::new(),
        }
    }

    /// Execute a command and add it to the undo stack
    ///
    /// The manager does not inspect success: the command is recorded and the
    /// redo history cleared whatever `execute` reported.
    ///
    /// # Errors
    /// Returns the failure reported by the command itself.
    pub fn execute_command(
        &mut self,
        mut command: Box<dyn UndoableCommand>,
        store: &mut dyn FileStore,
    ) -> CommandResult<String> {
        let description = command.description();
        let outcome = command.execute(store);
        if let Err(e) = &outcome {
            tracing::warn!(command = %description, error = %e, "command reported failure");
        }

        self.undo_stack.push_back(HistoryEntry::new(command));
        self.redo_stack.clear();

        if let Some(limit) = self.max_history {
            while self.undo_stack.len() > limit.get() {
                if let Some(dropped) = self.undo_stack.pop_front() {
                    tracing::debug!(
                        command = %dropped.description(),
                        "history limit reached, dropping oldest"
                    );
                }
            }
        }

        tracing::debug!(
            command = %description,
            undo = self.undo_stack.len(),
            "command executed"
        );
        outcome.map(|()| description)
    }

    /// Undo the last command
    ///
    /// Pops the last command from the undo stack, undoes it, and pushes it to the redo stack.
    ///
    /// # Errors
    /// Returns `EmptyHistory` if there is nothing to undo (no state change),
    /// or the failure reported by the command's undo.
    pub fn undo(&mut self, store: &mut dyn FileStore) -> CommandResult<String> {
        let mut entry = self.undo_stack.pop_back().ok_or_else(|| {
            tracing::debug!("nothing to undo");
            CommandError::EmptyHistory(HistoryStack::Undo)
        })?;

        let description = entry.description();
        let outcome = entry.command.undo(store);
        if let Err(e) = &outcome {
            tracing::warn!(command = %description, error = %e, "undo reported failure");
        }

        self.redo_stack.push_back(entry);
        tracing::debug!(command = %description, redo = self.redo_stack.len(), "command undone");
        outcome.map(|()| description)
    }

    /// Redo the last undone command
    ///
    /// Pops the last command from the redo stack, executes it again, and pushes it
    /// to the undo stack.
    ///
    /// # Errors
    /// Returns `EmptyHistory` if there is nothing to redo (no state change),
    /// or the failure reported by the command's execute.
    pub fn redo(&mut self, store: &mut dyn FileStore) -> CommandResult<String> {
        let mut entry = self.redo_stack.pop_back().ok_or_else(|| {
            tracing::debug!("nothing to redo");
            CommandError::EmptyHistory(HistoryStack::Redo)
        })?;

        let description = entry.description();
        let outcome = entry.command.execute(store);
        if let Err(e) = &outcome {
            tracing::warn!(command = %description, error = %e, "redo reported failure");
        }

        entry.executed_at = Utc::now();
        self.undo_stack.push_back(entry);
        tracing::debug!(command = %description, undo = self.undo_stack.len(), "command redone");
        outcome.map(|()| description)
    }

    /// Check if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get a description of the command that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|entry| entry.description())
    }

    /// Get a description of the command that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(|entry| entry.description())
    }

    /// Undo history from oldest (bottom) to most recent (top)
    pub fn undo_history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    /// Redo history from bottom to top; the last item is redone first
    pub fn redo_history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.redo_stack.iter()
    }

    /// Clear all command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get the number of commands in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of commands in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn history_limit(&self) -> Option<NonZeroUsize> {
        self.max_history
    }
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock command for testing
    struct MockCommand {
        value: i32,
        executions: Arc<AtomicUsize>,
        fail_undo: bool,
    }

    impl MockCommand {
        fn new(value: i32) -> Self {
            Self {
                value,
                executions: Arc::new(AtomicUsize::new(0)),
                fail_undo: false,
            }
        }

        fn failing_undo(value: i32) -> Self {
            Self {
                fail_undo: true,
                ..Self::new(value)
            }
        }
    }

    impl UndoableCommand for MockCommand {
        fn execute(&mut self, _store: &mut dyn FileStore) -> CommandResult<()> {
            self.executions.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn undo(&mut self, _store: &mut dyn FileStore) -> CommandResult<()> {
            if self.fail_undo {
                return Err(CommandError::UndoUnavailable("mock".into()));
            }
            Ok(())
        }

        fn description(&self) -> String {
            format!("Set value to {}", self.value)
        }

        fn kind(&self) -> CommandKind {
            CommandKind::Create
        }
    }

    #[test]
    fn test_execute_command() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        let description = manager
            .execute_command(Box::new(MockCommand::new(42)), &mut store)
            .unwrap();

        assert_eq!(description, "Set value to 42");
        assert_eq!(manager.undo_count(), 1);
        assert_eq!(manager.redo_count(), 0);
        assert!(manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_undo() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        manager
            .execute_command(Box::new(MockCommand::new(42)), &mut store)
            .unwrap();

        let description = manager.undo(&mut store).unwrap();
        assert_eq!(description, "Set value to 42");
        assert_eq!(manager.undo_count(), 0);
        assert_eq!(manager.redo_count(), 1);
        assert_eq!(manager.redo_description().as_deref(), Some("Set value to 42"));
    }

    #[test]
    fn test_redo_reexecutes() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();
        let cmd = MockCommand::new(42);
        let executions = cmd.executions.clone();

        manager.execute_command(Box::new(cmd), &mut store).unwrap();
        manager.undo(&mut store).unwrap();

        let description = manager.redo(&mut store).unwrap();
        assert_eq!(description, "Set value to 42");
        assert_eq!(executions.load(Ordering::SeqCst), 2);
        assert_eq!(manager.undo_count(), 1);
        assert_eq!(manager.redo_count(), 0);
    }

    #[test]
    fn test_redo_stack_cleared_on_new_command() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        // Execute, undo, then execute a new command
        manager
            .execute_command(Box::new(MockCommand::new(1)), &mut store)
            .unwrap();
        manager.undo(&mut store).unwrap();
        manager
            .execute_command(Box::new(MockCommand::new(2)), &mut store)
            .unwrap();

        // Redo stack should be cleared
        assert!(!manager.can_redo());
        assert_eq!(manager.redo_count(), 0);
        assert!(matches!(
            manager.redo(&mut store),
            Err(CommandError::EmptyHistory(HistoryStack::Redo))
        ));
    }

    #[test]
    fn test_history_limit() {
        let mut manager = CommandManager::with_history_limit(NonZeroUsize::new(3).unwrap());
        let mut store = MemoryStore::new();

        // Execute 5 commands (more than limit)
        for i in 0..5 {
            manager
                .execute_command(Box::new(MockCommand::new(i)), &mut store)
                .unwrap();
        }

        // Should only keep the last 3
        assert_eq!(manager.undo_count(), 3);
        let kept: Vec<String> = manager.undo_history().map(|e| e.description()).collect();
        assert_eq!(
            kept,
            vec!["Set value to 2", "Set value to 3", "Set value to 4"]
        );
    }

    #[test]
    fn test_smallest_limit_keeps_latest_command_undoable() {
        let mut manager = CommandManager::with_history_limit(NonZeroUsize::MIN);
        let mut store = MemoryStore::new();

        for i in 0..3 {
            manager
                .execute_command(Box::new(MockCommand::new(i)), &mut store)
                .unwrap();
        }

        assert_eq!(manager.undo_count(), 1);
        assert_eq!(manager.undo(&mut store).unwrap(), "Set value to 2");
    }

    #[test]
    fn test_unbounded_by_default() {
        let mut manager = CommandManager::default();
        let mut store = MemoryStore::new();

        for i in 0..250 {
            manager
                .execute_command(Box::new(MockCommand::new(i)), &mut store)
                .unwrap();
        }

        assert_eq!(manager.history_limit(), None);
        assert_eq!(manager.undo_count(), 250);
    }

    #[test]
    fn test_undo_with_empty_stack() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        let result = manager.undo(&mut store);
        assert!(matches!(
            result,
            Err(CommandError::EmptyHistory(HistoryStack::Undo))
        ));
        assert_eq!(manager.redo_count(), 0);
    }

    #[test]
    fn test_redo_with_empty_stack() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        let result = manager.redo(&mut store);
        assert!(matches!(
            result,
            Err(CommandError::EmptyHistory(HistoryStack::Redo))
        ));
        assert_eq!(manager.undo_count(), 0);
    }

    #[test]
    fn test_failed_undo_still_moves_command() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        manager
            .execute_command(Box::new(MockCommand::failing_undo(7)), &mut store)
            .unwrap();

        let result = manager.undo(&mut store);
        assert!(matches!(result, Err(CommandError::UndoUnavailable(_))));
        assert_eq!(manager.undo_count(), 0);
        assert_eq!(manager.redo_count(), 1);
    }

    #[test]
    fn test_entry_id_survives_stack_moves() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        manager
            .execute_command(Box::new(MockCommand::new(1)), &mut store)
            .unwrap();
        let id = manager.undo_history().next().unwrap().id();
        let first_run = manager.undo_history().next().unwrap().executed_at();

        manager.undo(&mut store).unwrap();
        assert_eq!(manager.redo_history().next().unwrap().id(), id);

        manager.redo(&mut store).unwrap();
        let entry = manager.undo_history().next().unwrap();
        assert_eq!(entry.id(), id);
        assert!(entry.executed_at() >= first_run);
    }

    #[test]
    fn test_clear() {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();

        manager
            .execute_command(Box::new(MockCommand::new(1)), &mut store)
            .unwrap();
        manager
            .execute_command(Box::new(MockCommand::new(2)), &mut store)
            .unwrap();
        manager.undo(&mut store).unwrap();

        manager.clear();
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
    }
}
