// Concrete command implementations

use crate::command::trait_def::{CommandError, CommandKind, CommandResult, UndoableCommand};
use crate::store::FileStore;

/// Command to create (or overwrite) a file
///
/// Undo deletes the file again.
#[derive(Debug, Clone)]
pub struct CreateFileCommand {
    path: String,
    content: String,
}

impl CreateFileCommand {
    /// Create a new CreateFileCommand
    ///
    /// # Arguments
    /// * `path` - The file to create
    /// * `content` - Initial content of the file
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Create an empty file
    pub fn empty(path: impl Into<String>) -> Self {
        Self::new(path, String::new())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl UndoableCommand for CreateFileCommand {
    fn execute(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
        store.create(&self.path, &self.content)?;
        Ok(())
    }

    fn undo(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
        store.delete(&self.path)?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create {}", self.path)
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Create
    }
}

/// Command to delete a file
///
/// The content is read before deletion so undo can recreate the file. If
/// the file was already missing, nothing is captured and undo reports
/// `UndoUnavailable`.
#[derive(Debug, Clone)]
pub struct DeleteFileCommand {
    path: String,
    captured_content: Option<String>,
}

impl DeleteFileCommand {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            captured_content: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Content captured by the most recent execute, if any
    pub fn captured_content(&self) -> Option<&str> {
        self.captured_content.as_deref()
    }
}

impl UndoableCommand for DeleteFileCommand {
    fn execute(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
        // Never keep content from an earlier run
        self.captured_content = None;

        if !store.exists(&self.path) {
            tracing::warn!(path = %self.path, "cannot delete, file does not exist");
            return Err(CommandError::NotFound(self.path.clone()));
        }

        let content = store
            .read(&self.path)?
            .ok_or_else(|| CommandError::NotFound(self.path.clone()))?;
        store.delete(&self.path)?;
        self.captured_content = Some(content);

        Ok(())
    }

    fn undo(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
        let content = self.captured_content.as_deref().ok_or_else(|| {
            CommandError::UndoUnavailable(format!("no content captured for {}", self.path))
        })?;

        store.create(&self.path, content)?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete {}", self.path)
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Delete
    }
}

/// Command to rename a file
///
/// Undo is the symmetric rename back. No collision check is made in either
/// direction: an existing target is overwritten.
#[derive(Debug, Clone)]
pub struct RenameFileCommand {
    old_path: String,
    new_path: String,
}

impl RenameFileCommand {
    pub fn new(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            old_path: old_path.into(),
            new_path: new_path.into(),
        }
    }

    pub fn old_path(&self) -> &str {
        &self.old_path
    }

    pub fn new_path(&self) -> &str {
        &self.new_path
    }
}

impl UndoableCommand for RenameFileCommand {
    fn execute(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
        store.rename(&self.old_path, &self.new_path)?;
        Ok(())
    }

    fn undo(&mut self, store: &mut dyn FileStore) -> CommandResult<()> {
        store.rename(&self.new_path, &self.old_path)?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename {} -> {}", self.old_path, self.new_path)
    }

    fn kind(&self) -> CommandKind {
        CommandKind::Rename
    }
}
