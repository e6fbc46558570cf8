// FileStore - the receiver every file command acts upon
//
// A FileStore is a minimal filesystem-like mapping from path to content.
// It is the only component with externally visible side effects; commands
// and the CommandManager never touch files directly.
//
// Backends:
// - MemoryStore: ordered in-memory map, used by tests and the `--memory` CLI mode
// - DiskStore: real files below a root directory

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::config::StoreBackend;

/// Result type for store primitives
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a FileStore
///
/// `NotFound` is the ordinary, non-fatal report of a delete or rename whose
/// source path is absent. The store is left unchanged in that case.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("File {0} does not exist")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-like operations consumed by the file commands
///
/// Implementations must honor these semantics exactly:
/// - `create` always succeeds for a valid path and overwrites existing content
/// - `delete` and `rename` on a missing path report `StoreError::NotFound`
///   and change nothing
/// - `rename` onto an existing path overwrites it silently
pub trait FileStore {
    /// Create `path` with `content`, overwriting any previous content
    fn create(&mut self, path: &str, content: &str) -> StoreResult<()>;

    /// Check whether `path` is present
    fn exists(&self, path: &str) -> bool;

    /// Remove `path`
    fn delete(&mut self, path: &str) -> StoreResult<()>;

    /// Move the content of `old_path` to `new_path`
    fn rename(&mut self, old_path: &str, new_path: &str) -> StoreResult<()>;

    /// Read the content of `path`, `None` when absent
    fn read(&self, path: &str) -> StoreResult<Option<String>>;

    /// All stored paths, sorted
    fn paths(&self) -> StoreResult<Vec<String>>;
}

/// Open the store described by a configured backend
///
/// # Errors
/// Returns an error if the disk root cannot be created.
pub fn open_store(backend: &StoreBackend) -> StoreResult<Box<dyn FileStore>> {
    match backend {
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StoreBackend::Disk { root } => Ok(Box::new(DiskStore::open(root)?)),
    }
}
