// DiskStore - FileStore backed by real files below a root directory

use crate::store::{FileStore, StoreError, StoreResult};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// FileStore acting on real files
///
/// Every store path is interpreted relative to `root`. Absolute paths,
/// paths that climb out of the root, and paths that reach outside it
/// through a symlink are rejected with `InvalidPath`.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Open a store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if the root directory cannot be created.
    pub fn open<P: AsRef<Path>>(root: P) -> StoreResult<Self> {
        fs::create_dir_all(root.as_ref())?;
        let root = fs::canonicalize(root.as_ref())?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty() {
            return Err(StoreError::InvalidPath(path.to_string()));
        }

        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(StoreError::InvalidPath(path.to_string())),
            }
        }

        let target = self.root.join(relative);
        self.confine(&target, path)?;
        Ok(target)
    }

    /// Resolve symlinks on the deepest existing ancestor of `target` and
    /// check the result is still below the root
    fn confine(&self, target: &Path, path: &str) -> StoreResult<()> {
        let invalid = || StoreError::InvalidPath(path.to_string());

        let mut existing = target;
        while existing.symlink_metadata().is_err() {
            existing = existing.parent().ok_or_else(invalid)?;
        }

        // Dangling symlinks fail to canonicalize and are rejected too
        let resolved = fs::canonicalize(existing).map_err(|_| invalid())?;
        if resolved.starts_with(&self.root) {
            Ok(())
        } else {
            tracing::warn!(path, resolved = %resolved.display(), "path escapes store root");
            Err(invalid())
        }
    }

    fn ensure_parent(path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl FileStore for DiskStore {
    fn create(&mut self, path: &str, content: &str) -> StoreResult<()> {
        let target = self.resolve(path)?;
        Self::ensure_parent(&target)?;
        fs::write(&target, content)?;
        tracing::info!(path, content, "file created");
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn delete(&mut self, path: &str) -> StoreResult<()> {
        let target = self.resolve(path)?;
        if !target.is_file() {
            tracing::warn!(path, "delete skipped, file does not exist");
            return Err(StoreError::NotFound(path.to_string()));
        }

        fs::remove_file(&target)?;
        tracing::info!(path, "file deleted");
        Ok(())
    }

    fn rename(&mut self, old_path: &str, new_path: &str) -> StoreResult<()> {
        let source = self.resolve(old_path)?;
        let target = self.resolve(new_path)?;
        if !source.is_file() {
            tracing::warn!(path = old_path, "rename skipped, file does not exist");
            return Err(StoreError::NotFound(old_path.to_string()));
        }

        Self::ensure_parent(&target)?;
        fs::rename(&source, &target)?;
        tracing::info!(from = old_path, to = new_path, "file renamed");
        Ok(())
    }

    fn read(&self, path: &str) -> StoreResult<Option<String>> {
        let target = self.resolve(path)?;
        if !target.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&target)?))
    }

    fn paths(&self) -> StoreResult<Vec<String>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|e| {
                StoreError::Io(std::io::Error::other(format!(
                    "Failed to walk directory: {}",
                    e
                )))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| StoreError::InvalidPath(entry.path().display().to_string()))?;

            let joined = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            paths.push(joined);
        }

        paths.sort();
        Ok(paths)
    }
}
