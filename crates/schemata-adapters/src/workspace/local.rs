//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use schemata_core::{
    application::{ApplicationError, DirEntry, Workspace},
    error::{SchemataError, SchemataResult},
};

/// Production workspace implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalWorkspace;

impl LocalWorkspace {
    /// Create a new local workspace adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace for LocalWorkspace {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> SchemataResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> SchemataResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn read_to_string(&self, path: &Path) -> SchemataResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SchemataResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> SchemataResult<()> {
        trace!(from = %from.display(), to = %to.display(), "copy");
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> SchemataResult<()> {
        self.create_dir_all(to)?;

        for entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: format!("Failed to walk directory: {e}"),
            })?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .map_err(|_| ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: "Entry escaped the source directory".into(),
                })?;
            let target = to.join(rel);

            if entry.file_type().is_dir() {
                self.create_dir_all(&target)?;
            } else {
                self.copy_file(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> SchemataResult<Vec<DirEntry>> {
        let reader = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "get file type"))?
                .is_dir();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SchemataError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_dir_is_sorted() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.txt"), "").unwrap();
        std::fs::create_dir(tmp.path().join("a")).unwrap();
        std::fs::write(tmp.path().join("c.txt"), "").unwrap();

        let entries = LocalWorkspace::new().read_dir(tmp.path()).unwrap();

        assert_eq!(
            entries,
            vec![DirEntry::dir("a"), DirEntry::file("b.txt"), DirEntry::file("c.txt")]
        );
    }

    #[test]
    fn copy_dir_all_copies_nested_tree() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("files");
        std::fs::create_dir_all(from.join("nested/deeper")).unwrap();
        std::fs::write(from.join("top.txt"), "top").unwrap();
        std::fs::write(from.join("nested/deeper/leaf.txt"), "leaf").unwrap();

        let to = tmp.path().join("out/files");
        LocalWorkspace::new().copy_dir_all(&from, &to).unwrap();

        assert_eq!(std::fs::read_to_string(to.join("top.txt")).unwrap(), "top");
        assert_eq!(
            std::fs::read_to_string(to.join("nested/deeper/leaf.txt")).unwrap(),
            "leaf"
        );
    }

    #[test]
    fn copy_file_requires_parent() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("a.json");
        std::fs::write(&from, "{}").unwrap();

        let err = LocalWorkspace::new()
            .copy_file(&from, &tmp.path().join("missing/a.json"))
            .unwrap_err();

        assert!(matches!(
            err,
            SchemataError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let result = LocalWorkspace::new().read_to_string(&tmp.path().join("nope"));
        assert!(result.is_err());
    }
}
