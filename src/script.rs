// Script harness - drives a CommandManager from a line-oriented script
//
// One operation per line, blank lines and `#` comment lines ignored:
//
//   create <path> [content...]
//   delete <path>
//   rename <old> <new>
//   undo
//   redo

use crate::command::{
    CommandManager, CreateFileCommand, DeleteFileCommand, RenameFileCommand, UndoableCommand,
};
use crate::messaging::Notification;
use crate::store::FileStore;
use std::path::Path;

/// The demonstration sequence: create, rename, undo, redo, delete, undo
pub const DEMO_SCRIPT: &str = "\
# Create a file
create example.txt Hello world!
# Rename it, then step back and forth through history
rename example.txt renamed.txt
undo
redo
# Delete it and bring it back
delete renamed.txt
undo
";

/// Script errors, with 1-based line numbers
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation { line: usize, op: String },

    #[error("line {line}: '{op}' is missing its {argument} argument")]
    MissingArgument {
        line: usize,
        op: &'static str,
        argument: &'static str,
    },

    #[error("line {line}: '{op}' takes no further arguments")]
    UnexpectedArgument { line: usize, op: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    Create { path: String, content: String },
    Delete { path: String },
    Rename { old_path: String, new_path: String },
    Undo,
    Redo,
}

impl ScriptOp {
    /// Build the command for a forward operation; `None` for undo/redo
    pub fn to_command(&self) -> Option<Box<dyn UndoableCommand>> {
        match self {
            ScriptOp::Create { path, content } => {
                Some(Box::new(CreateFileCommand::new(path.as_str(), content.as_str())))
            }
            ScriptOp::Delete { path } => Some(Box::new(DeleteFileCommand::new(path.as_str()))),
            ScriptOp::Rename { old_path, new_path } => Some(Box::new(RenameFileCommand::new(
                old_path.as_str(),
                new_path.as_str(),
            ))),
            ScriptOp::Undo | ScriptOp::Redo => None,
        }
    }
}

/// Split off the first whitespace-delimited word
fn split_word(input: &str) -> (&str, &str) {
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim_start()),
        None => (input, ""),
    }
}

/// Split off the first word, dropping exactly one separator after it
///
/// Used for `create`, whose content is the rest of the line verbatim.
fn split_verbatim(input: &str) -> (&str, &str) {
    match input.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((idx, separator)) => (&input[..idx], &input[idx + separator.len_utf8()..]),
        None => (input, ""),
    }
}

fn require<'a>(
    value: &'a str,
    line: usize,
    op: &'static str,
    argument: &'static str,
) -> Result<&'a str, ScriptError> {
    if value.is_empty() {
        Err(ScriptError::MissingArgument { line, op, argument })
    } else {
        Ok(value)
    }
}

fn no_more(rest: &str, line: usize, op: &'static str) -> Result<(), ScriptError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ScriptError::UnexpectedArgument { line, op })
    }
}

/// Parse a whole script
///
/// # Errors
/// Returns the first malformed line.
pub fn parse_script(source: &str) -> Result<Vec<ScriptOp>, ScriptError> {
    let mut ops = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        // Only leading whitespace is dropped; trailing spaces may be content
        let text = raw.trim_start();
        if text.trim_end().is_empty() || text.starts_with('#') {
            continue;
        }

        let (op, rest) = split_word(text);
        let parsed = match op {
            "create" => {
                let (path, content) = split_verbatim(rest);
                ScriptOp::Create {
                    path: require(path, line, "create", "path")?.to_string(),
                    content: content.to_string(),
                }
            }
            "delete" => {
                let (path, extra) = split_word(rest);
                let path = require(path, line, "delete", "path")?;
                no_more(extra, line, "delete")?;
                ScriptOp::Delete {
                    path: path.to_string(),
                }
            }
            "rename" => {
                let (old_path, rest) = split_word(rest);
                let (new_path, extra) = split_word(rest);
                let old_path = require(old_path, line, "rename", "old path")?;
                let new_path = require(new_path, line, "rename", "new path")?;
                no_more(extra, line, "rename")?;
                ScriptOp::Rename {
                    old_path: old_path.to_string(),
                    new_path: new_path.to_string(),
                }
            }
            "undo" => {
                no_more(rest, line, "undo")?;
                ScriptOp::Undo
            }
            "redo" => {
                no_more(rest, line, "redo")?;
                ScriptOp::Redo
            }
            other => {
                return Err(ScriptError::UnknownOperation {
                    line,
                    op: other.to_string(),
                });
            }
        };
        ops.push(parsed);
    }

    Ok(ops)
}

/// Read and parse a script file
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse.
pub fn parse_script_file<P: AsRef<Path>>(path: P) -> Result<Vec<ScriptOp>, ScriptError> {
    let source = std::fs::read_to_string(path)?;
    parse_script(&source)
}

/// Run parsed operations against a manager and store
///
/// Produces one notification per operation and never stops early: reported
/// failures are part of the output, not an abort condition.
pub fn run_script(
    ops: &[ScriptOp],
    manager: &mut CommandManager,
    store: &mut dyn FileStore,
) -> Vec<Notification> {
    let mut notifications = Vec::with_capacity(ops.len());

    for op in ops {
        let notification = match op {
            ScriptOp::Undo => Notification::from_outcome("Undid", &manager.undo(store)),
            ScriptOp::Redo => Notification::from_outcome("Redid", &manager.redo(store)),
            forward => {
                let Some(command) = forward.to_command() else {
                    continue;
                };
                Notification::from_outcome("Executed", &manager.execute_command(command, store))
            }
        };
        tracing::debug!(%notification, "script step");
        notifications.push(notification);
    }

    notifications
}
