//! Filesystem layout contract of a schematic collection project.
//!
//! A [`CollectionLayout`] is built once by the caller (usually the CLI, from
//! configuration) and handed to every service. Services never consult the
//! process working directory: every path they touch is derived from here.

use std::path::{Path, PathBuf};

/// Directory holding template sources, relative to the project root.
pub const DEFAULT_SOURCE_DIR: &str = "src";
/// Build output directory, relative to the project root.
pub const DEFAULT_BUILD_DIR: &str = "build";
/// Manifest source file, relative to the project root.
pub const DEFAULT_MANIFEST: &str = "src/collection.json";
/// Project package descriptor, relative to the project root.
pub const DEFAULT_DESCRIPTOR: &str = "package.json";
/// Reserved file name of schema description files.
pub const DEFAULT_SCHEMA_FILE_NAME: &str = "schema.json";
/// Reserved directory name of verbatim template-file trees.
pub const DEFAULT_FILES_DIR_NAME: &str = "files";
/// Value written to the manifest's `$schema` field.
pub const DEFAULT_SCHEMA_REF: &str = "@angular-devkit/schematics/collection-schema.json";
/// Dependencies copied into the synthesized descriptor.
pub const DEFAULT_PINNED_DEPENDENCIES: [&str; 2] =
    ["@angular-devkit/core", "@angular-devkit/schematics"];

/// Paths and reserved names for one collection project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLayout {
    project_root: PathBuf,
    source_dir: PathBuf,
    build_dir: PathBuf,
    manifest: PathBuf,
    descriptor: PathBuf,
    schema_file_name: String,
    files_dir_name: String,
    schema_ref: String,
    pinned_dependencies: Vec<String>,
}

impl CollectionLayout {
    /// Layout with every default, rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            source_dir: project_root.join(DEFAULT_SOURCE_DIR),
            build_dir: project_root.join(DEFAULT_BUILD_DIR),
            manifest: project_root.join(DEFAULT_MANIFEST),
            descriptor: project_root.join(DEFAULT_DESCRIPTOR),
            schema_file_name: DEFAULT_SCHEMA_FILE_NAME.into(),
            files_dir_name: DEFAULT_FILES_DIR_NAME.into(),
            schema_ref: DEFAULT_SCHEMA_REF.into(),
            pinned_dependencies: DEFAULT_PINNED_DEPENDENCIES
                .iter()
                .map(|d| d.to_string())
                .collect(),
            project_root,
        }
    }

    // ── builder-style overrides (relative paths resolve against the root) ──

    pub fn with_source_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source_dir = self.project_root.join(dir);
        self
    }

    pub fn with_build_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.build_dir = self.project_root.join(dir);
        self
    }

    pub fn with_manifest(mut self, path: impl AsRef<Path>) -> Self {
        self.manifest = self.project_root.join(path);
        self
    }

    pub fn with_descriptor(mut self, path: impl AsRef<Path>) -> Self {
        self.descriptor = self.project_root.join(path);
        self
    }

    pub fn with_schema_file_name(mut self, name: impl Into<String>) -> Self {
        self.schema_file_name = name.into();
        self
    }

    pub fn with_files_dir_name(mut self, name: impl Into<String>) -> Self {
        self.files_dir_name = name.into();
        self
    }

    pub fn with_schema_ref(mut self, schema_ref: impl Into<String>) -> Self {
        self.schema_ref = schema_ref.into();
        self
    }

    pub fn with_pinned_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pinned_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    // ── accessors ──────────────────────────────────────────────────────────

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Manifest source, e.g. `<root>/src/collection.json`.
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    pub fn descriptor(&self) -> &Path {
        &self.descriptor
    }

    pub fn schema_file_name(&self) -> &str {
        &self.schema_file_name
    }

    pub fn files_dir_name(&self) -> &str {
        &self.files_dir_name
    }

    pub fn schema_ref(&self) -> &str {
        &self.schema_ref
    }

    pub fn pinned_dependencies(&self) -> &[String] {
        &self.pinned_dependencies
    }

    /// File name shared by the source manifest and its patched copy.
    pub fn manifest_file_name(&self) -> String {
        self.manifest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection.json".into())
    }

    /// Where the patched manifest is written.
    pub fn build_manifest(&self) -> PathBuf {
        self.build_dir.join(self.manifest_file_name())
    }

    /// Where the synthesized descriptor is written.
    pub fn build_descriptor(&self) -> PathBuf {
        let name = self
            .descriptor
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_DESCRIPTOR.into());
        self.build_dir.join(name)
    }

    /// The descriptor's `schematics` entry point, relative to the build dir.
    pub fn schematics_entry(&self) -> String {
        format!("./{}", self.manifest_file_name())
    }
}
