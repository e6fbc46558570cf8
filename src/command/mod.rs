// Command Pattern for undoable file operations
//
// Every change to a FileStore goes through an UndoableCommand so that the
// CommandManager can replay it backwards and forwards.
//
// Architecture:
// - UndoableCommand trait: execute(), undo(), description(), kind()
// - CommandManager: owns the undo and redo stacks
// - Concrete commands: CreateFileCommand, DeleteFileCommand, RenameFileCommand
//
// The FileStore is owned by the caller and lent to each operation, so a
// command only stores its arguments and whatever it needs to reverse itself.

pub mod commands;
pub mod manager;
pub mod trait_def;

pub use commands::{CreateFileCommand, DeleteFileCommand, RenameFileCommand};
pub use manager::{CommandManager, HistoryEntry};
pub use trait_def::{CommandError, CommandKind, CommandResult, HistoryStack, UndoableCommand};
