//! In-memory workspace adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use schemata_core::{
    application::{ApplicationError, DirEntry, Workspace},
    error::{SchemataError, SchemataResult},
};

/// In-memory workspace for testing.
#[derive(Debug, Clone)]
pub struct MemoryWorkspace {
    inner: Arc<RwLock<MemoryWorkspaceInner>>,
}

#[derive(Debug, Default)]
struct MemoryWorkspaceInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryWorkspaceInner {
    fn add_dir(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn require_parent(&self, path: &Path) -> SchemataResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.directories.contains(parent) => {
                Err(not_found(path, "Parent directory does not exist"))
            }
            _ => Ok(()),
        }
    }
}

impl MemoryWorkspace {
    /// Create a new empty memory workspace.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryWorkspaceInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> SchemataResult<RwLockReadGuard<'_, MemoryWorkspaceInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> SchemataResult<RwLockWriteGuard<'_, MemoryWorkspaceInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

impl Default for MemoryWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace for MemoryWorkspace {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> SchemataResult<()> {
        self.write()?.add_dir(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> SchemataResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "Directory does not exist"));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> SchemataResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "File does not exist"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SchemataResult<()> {
        let mut inner = self.write()?;
        inner.require_parent(path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> SchemataResult<()> {
        let mut inner = self.write()?;
        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from, "File does not exist"))?;
        inner.require_parent(to)?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> SchemataResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(from) {
            return Err(not_found(from, "Directory does not exist"));
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok().map(|rel| to.join(rel)))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| p.strip_prefix(from).ok().map(|rel| (to.join(rel), c.clone())))
            .collect();

        for dir in dirs {
            inner.add_dir(&dir);
        }
        inner.files.extend(files);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> SchemataResult<Vec<DirEntry>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "Directory does not exist"));
        }

        let child_name = |p: &Path| -> Option<String> {
            (p.parent() == Some(path))
                .then(|| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .flatten()
        };

        let mut entries: Vec<DirEntry> = inner
            .directories
            .iter()
            .filter_map(|d| child_name(d.as_path()).map(DirEntry::dir))
            .chain(inner.files.keys().filter_map(|f| child_name(f.as_path()).map(DirEntry::file)))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn not_found(path: &Path, reason: &str) -> SchemataError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn lock_poisoned() -> SchemataError {
    SchemataError::Internal {
        message: "memory workspace lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let ws = MemoryWorkspace::new();
        assert!(ws.write_file(Path::new("/a/b.txt"), "x").is_err());

        ws.create_dir_all(Path::new("/a")).unwrap();
        ws.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(ws.read_file(Path::new("/a/b.txt")).as_deref(), Some("x"));
    }

    #[test]
    fn read_dir_lists_direct_children_only() {
        let ws = MemoryWorkspace::new()
            .with_file("/p/src/foo/schema.json", "{}")
            .with_file("/p/src/collection.json", "{}");

        let entries = ws.read_dir(Path::new("/p/src")).unwrap();

        assert_eq!(
            entries,
            vec![DirEntry::file("collection.json"), DirEntry::dir("foo")]
        );
    }

    #[test]
    fn remove_dir_all_drops_descendants() {
        let ws = MemoryWorkspace::new()
            .with_file("/p/build/a.txt", "a")
            .with_file("/p/keep.txt", "k");

        ws.remove_dir_all(Path::new("/p/build")).unwrap();

        assert!(!ws.exists(Path::new("/p/build")));
        assert!(!ws.exists(Path::new("/p/build/a.txt")));
        assert!(ws.exists(Path::new("/p/keep.txt")));
    }

    #[test]
    fn copy_dir_all_recreates_structure() {
        let ws = MemoryWorkspace::new()
            .with_file("/p/src/x/files/t.txt", "hi")
            .with_file("/p/src/x/files/sub/u.txt", "yo");

        ws.copy_dir_all(Path::new("/p/src/x/files"), Path::new("/p/build/x/files"))
            .unwrap();

        assert_eq!(
            ws.read_file(Path::new("/p/build/x/files/sub/u.txt")).as_deref(),
            Some("yo")
        );
        assert!(ws.exists(Path::new("/p/build/x")));
    }
}
