// filecmd - Library exports for the CLI, tests and benchmarks

pub mod command;
pub mod config;
pub mod logging;
pub mod messaging;
pub mod script;
pub mod store;

// Re-export commonly used types for convenience
pub use command::{
    CommandError, CommandKind, CommandManager, CommandResult, CreateFileCommand,
    DeleteFileCommand, HistoryStack, RenameFileCommand, UndoableCommand,
};
pub use config::{Config, StoreBackend};
pub use messaging::{Notification, NotificationCategory, NotificationLevel};
pub use script::{DEMO_SCRIPT, ScriptOp, parse_script, run_script};
pub use store::{DiskStore, FileStore, MemoryStore, StoreError, open_store};
