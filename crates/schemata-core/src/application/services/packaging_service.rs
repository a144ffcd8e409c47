//! Packaging Service - builds a self-contained collection directory.
//!
//! The build is an ordered pipeline of [`BuildStep`]s over one explicit
//! [`BuildState`]:
//! 1. Clean the previous build
//! 2. Compile sources with the external compiler
//! 3. Patch and write the manifest
//! 4. Copy schema description files
//! 5. Copy verbatim template-file directories
//! 6. Synthesize the package descriptor
//!
//! Any failure aborts the run. Nothing is rolled back: a failed build leaves
//! a directory that must not be used.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Compiler, Workspace},
    },
    domain::{
        BuildDescriptor, BuildReport, BuildState, BuildStep, BuildTree, CollectionLayout,
        CollectionManifest, ProjectDescriptor, TreeEntry,
    },
    error::SchemataResult,
};

/// Main packaging service.
pub struct PackagingService {
    workspace: Box<dyn Workspace>,
    compiler: Box<dyn Compiler>,
    layout: CollectionLayout,
}

impl PackagingService {
    /// Create a new packaging service with the given adapters.
    pub fn new(
        workspace: Box<dyn Workspace>,
        compiler: Box<dyn Compiler>,
        layout: CollectionLayout,
    ) -> Self {
        Self {
            workspace,
            compiler,
            layout,
        }
    }

    pub fn layout(&self) -> &CollectionLayout {
        &self.layout
    }

    pub fn workspace(&self) -> &dyn Workspace {
        self.workspace.as_ref()
    }

    /// Run the full pipeline and list the resulting build directory.
    #[instrument(skip_all, fields(root = %self.layout.project_root().display()))]
    pub fn package(&self) -> SchemataResult<BuildReport> {
        info!(build_dir = %self.layout.build_dir().display(), "Packaging collection");

        let mut state = BuildState::new();
        for step in BuildStep::PIPELINE {
            self.apply(step, &mut state)?;
        }

        let tree = self.list_tree(self.layout.build_dir())?;
        debug!(files = ?tree.file_paths(), "Build contents");
        info!(
            files = tree.file_count(),
            directories = tree.directory_count(),
            "Packaging completed"
        );

        Ok(BuildReport {
            build_dir: self.layout.build_dir().to_path_buf(),
            state,
            tree,
        })
    }

    /// Apply a single step and record it.
    #[instrument(skip(self, state), fields(step = %step))]
    pub fn apply(&self, step: BuildStep, state: &mut BuildState) -> SchemataResult<()> {
        match step {
            BuildStep::Clean => self.clean(state)?,
            BuildStep::Compile => self.compile()?,
            BuildStep::PatchManifest => self.patch_manifest(state)?,
            BuildStep::CopySchemas => self.copy_schemas(state)?,
            BuildStep::CopyTemplateFiles => self.copy_template_dirs(state)?,
            BuildStep::SynthesizeDescriptor => self.synthesize_descriptor(state)?,
        }
        state.complete(step);
        Ok(())
    }

    /// Depth-first, name-sorted listing of `root`.
    pub fn list_tree(&self, root: &Path) -> SchemataResult<BuildTree> {
        let mut tree = BuildTree::default();
        self.collect_tree(root, 0, &mut tree)?;
        Ok(tree)
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn clean(&self, state: &mut BuildState) -> SchemataResult<()> {
        let build_dir = self.layout.build_dir();
        if self.workspace.exists(build_dir) {
            self.workspace.remove_dir_all(build_dir)?;
            state.removed_previous_build = true;
            debug!(path = %build_dir.display(), "Removed previous build");
        }
        Ok(())
    }

    fn compile(&self) -> SchemataResult<()> {
        info!(command = %self.compiler.describe(), "Compiling sources");
        self.compiler.compile(self.layout.project_root())
    }

    fn patch_manifest(&self, state: &mut BuildState) -> SchemataResult<()> {
        let source = self.layout.manifest();
        if !self.workspace.exists(source) {
            return Err(ApplicationError::ManifestNotFound {
                path: source.to_path_buf(),
            }
            .into());
        }

        let raw = self.workspace.read_to_string(source)?;
        let mut manifest = CollectionManifest::parse(&raw, source)?;
        manifest.set_schema_ref(self.layout.schema_ref());

        let dest = self.layout.build_manifest();
        self.ensure_parent(&dest)?;
        self.workspace.write_file(&dest, &manifest.to_pretty_json())?;

        debug!(from = %source.display(), to = %dest.display(), "Patched manifest");
        state.manifest = Some(dest);
        Ok(())
    }

    fn copy_schemas(&self, state: &mut BuildState) -> SchemataResult<()> {
        let mut found = Vec::new();
        self.find_schema_files(Path::new(""), &mut found)?;

        for rel in found {
            let from = self.layout.source_dir().join(&rel);
            let to = self.layout.build_dir().join(&rel);
            self.ensure_parent(&to)?;
            self.workspace.copy_file(&from, &to)?;
            debug!(from = %from.display(), to = %to.display(), "Copied schema");
            state.schema_files.push(rel);
        }
        Ok(())
    }

    fn copy_template_dirs(&self, state: &mut BuildState) -> SchemataResult<()> {
        let mut found = Vec::new();
        self.find_template_dirs(Path::new(""), &mut found)?;

        for rel in found {
            let from = self.layout.source_dir().join(&rel);
            let to = self.layout.build_dir().join(&rel);
            self.workspace.copy_dir_all(&from, &to)?;
            debug!(from = %from.display(), to = %to.display(), "Copied template files");
            state.template_dirs.push(rel);
        }
        Ok(())
    }

    fn synthesize_descriptor(&self, state: &mut BuildState) -> SchemataResult<()> {
        let source = self.layout.descriptor();
        let raw = self.workspace.read_to_string(source)?;
        let project = ProjectDescriptor::parse(&raw, source)?;

        let descriptor = BuildDescriptor::synthesize(
            &project,
            &self.layout.schematics_entry(),
            self.layout.pinned_dependencies(),
        )?;

        let dest = self.layout.build_descriptor();
        self.ensure_parent(&dest)?;
        self.workspace.write_file(&dest, &descriptor.to_pretty_json())?;

        debug!(to = %dest.display(), "Wrote package descriptor");
        state.descriptor = Some(dest);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn ensure_parent(&self, path: &Path) -> SchemataResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.workspace.create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }

    /// Every file named as the schema file, at any depth.
    fn find_schema_files(&self, rel: &Path, found: &mut Vec<PathBuf>) -> SchemataResult<()> {
        let dir = self.layout.source_dir().join(rel);
        for entry in self.workspace.read_dir(&dir)? {
            let child = rel.join(&entry.name);
            if entry.is_dir {
                self.find_schema_files(&child, found)?;
            } else if entry.name == self.layout.schema_file_name() {
                found.push(child);
            }
        }
        Ok(())
    }

    /// Every directory named as the verbatim directory; matched directories
    /// are not descended into.
    fn find_template_dirs(&self, rel: &Path, found: &mut Vec<PathBuf>) -> SchemataResult<()> {
        let dir = self.layout.source_dir().join(rel);
        for entry in self.workspace.read_dir(&dir)? {
            if !entry.is_dir {
                continue;
            }
            let child = rel.join(&entry.name);
            if entry.name == self.layout.files_dir_name() {
                found.push(child);
            } else {
                self.find_template_dirs(&child, found)?;
            }
        }
        Ok(())
    }

    fn collect_tree(&self, dir: &Path, depth: usize, tree: &mut BuildTree) -> SchemataResult<()> {
        for entry in self.workspace.read_dir(dir)? {
            tree.entries.push(TreeEntry {
                depth,
                name: entry.name.clone(),
                is_dir: entry.is_dir,
            });
            if entry.is_dir {
                self.collect_tree(&dir.join(&entry.name), depth + 1, tree)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DirEntry, MockCompiler, MockWorkspace};
    use crate::domain::DomainError;
    use crate::error::SchemataError;
    use mockall::predicate::eq;

    fn layout() -> CollectionLayout {
        CollectionLayout::new("/proj")
    }

    fn passing_compiler() -> MockCompiler {
        let mut compiler = MockCompiler::new();
        compiler.expect_describe().return_const("tsc -p tsconfig.json".to_string());
        compiler.expect_compile().returning(|_| Ok(()));
        compiler
    }

    #[test]
    fn clean_is_noop_without_previous_build() {
        let mut ws = MockWorkspace::new();
        ws.expect_exists()
            .with(eq(Path::new("/proj/build")))
            .return_const(false);
        ws.expect_remove_dir_all().never();

        let service = PackagingService::new(Box::new(ws), Box::new(MockCompiler::new()), layout());
        let mut state = BuildState::new();
        service.apply(BuildStep::Clean, &mut state).unwrap();

        assert!(!state.removed_previous_build);
        assert_eq!(state.completed, [BuildStep::Clean]);
    }

    #[test]
    fn clean_removes_previous_build() {
        let mut ws = MockWorkspace::new();
        ws.expect_exists().return_const(true);
        ws.expect_remove_dir_all()
            .with(eq(Path::new("/proj/build")))
            .times(1)
            .returning(|_| Ok(()));

        let service = PackagingService::new(Box::new(ws), Box::new(MockCompiler::new()), layout());
        let mut state = BuildState::new();
        service.apply(BuildStep::Clean, &mut state).unwrap();

        assert!(state.removed_previous_build);
    }

    #[test]
    fn compile_failure_stops_before_any_copy() {
        let mut ws = MockWorkspace::new();
        ws.expect_exists().return_const(false);
        ws.expect_read_to_string().never();
        ws.expect_write_file().never();
        ws.expect_copy_file().never();
        ws.expect_copy_dir_all().never();

        let mut compiler = MockCompiler::new();
        compiler.expect_describe().return_const("tsc".to_string());
        compiler.expect_compile().times(1).returning(|_| {
            Err(ApplicationError::CompileFailed {
                command: "tsc".into(),
                status: Some(2),
            }
            .into())
        });

        let service = PackagingService::new(Box::new(ws), Box::new(compiler), layout());
        let err = service.package().unwrap_err();

        assert!(matches!(
            err,
            SchemataError::Application(ApplicationError::CompileFailed { .. })
        ));
    }

    #[test]
    fn compiler_runs_in_project_root() {
        let mut compiler = MockCompiler::new();
        compiler.expect_describe().return_const("tsc".to_string());
        compiler
            .expect_compile()
            .with(eq(Path::new("/proj")))
            .times(1)
            .returning(|_| Ok(()));

        let service =
            PackagingService::new(Box::new(MockWorkspace::new()), Box::new(compiler), layout());
        let mut state = BuildState::new();
        service.apply(BuildStep::Compile, &mut state).unwrap();
        assert_eq!(state.completed, [BuildStep::Compile]);
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let mut ws = MockWorkspace::new();
        ws.expect_exists().return_const(false);

        let service = PackagingService::new(Box::new(ws), Box::new(passing_compiler()), layout());
        let err = service
            .apply(BuildStep::PatchManifest, &mut BuildState::new())
            .unwrap_err();

        assert!(matches!(
            err,
            SchemataError::Application(ApplicationError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn manifest_is_written_with_patched_schema_ref() {
        let mut ws = MockWorkspace::new();
        ws.expect_exists().return_const(true);
        ws.expect_read_to_string()
            .returning(|_| Ok(r#"{"$schema":"old","schematics":{}}"#.to_string()));
        ws.expect_create_dir_all()
            .with(eq(Path::new("/proj/build")))
            .returning(|_| Ok(()));
        ws.expect_write_file()
            .withf(|path, content| {
                path.to_str() == Some("/proj/build/collection.json")
                    && content.contains("@angular-devkit/schematics/collection-schema.json")
                    && !content.contains("old")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PackagingService::new(Box::new(ws), Box::new(passing_compiler()), layout());
        let mut state = BuildState::new();
        service.apply(BuildStep::PatchManifest, &mut state).unwrap();

        assert_eq!(
            state.manifest,
            Some(PathBuf::from("/proj/build/collection.json"))
        );
    }

    #[test]
    fn schema_files_are_found_at_any_depth() {
        let mut ws = MockWorkspace::new();
        ws.expect_read_dir().returning(|dir| {
            Ok(match dir.to_str().unwrap() {
                "/proj/src/" | "/proj/src" => {
                    vec![DirEntry::file("collection.json"), DirEntry::dir("foo")]
                }
                "/proj/src/foo" => vec![DirEntry::dir("nested"), DirEntry::file("schema.json")],
                "/proj/src/foo/nested" => {
                    vec![DirEntry::file("schema.json"), DirEntry::file("x.ts")]
                }
                _ => vec![],
            })
        });
        ws.expect_create_dir_all().returning(|_| Ok(()));
        ws.expect_copy_file().times(2).returning(|_, _| Ok(()));

        let service = PackagingService::new(Box::new(ws), Box::new(passing_compiler()), layout());
        let mut state = BuildState::new();
        service.apply(BuildStep::CopySchemas, &mut state).unwrap();

        assert_eq!(
            state.schema_files,
            [
                PathBuf::from("foo/nested/schema.json"),
                PathBuf::from("foo/schema.json"),
            ]
        );
    }

    #[test]
    fn template_dirs_are_not_descended_into() {
        let mut ws = MockWorkspace::new();
        ws.expect_read_dir().returning(|dir| {
            Ok(match dir.to_str().unwrap() {
                "/proj/src/" | "/proj/src" => vec![DirEntry::dir("bar"), DirEntry::file("files")],
                "/proj/src/bar" => vec![DirEntry::dir("files"), DirEntry::file("index.ts")],
                "/proj/src/bar/files" => panic!("matched directory must not be walked"),
                _ => vec![],
            })
        });
        ws.expect_copy_dir_all()
            .with(
                eq(Path::new("/proj/src/bar/files")),
                eq(Path::new("/proj/build/bar/files")),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PackagingService::new(Box::new(ws), Box::new(passing_compiler()), layout());
        let mut state = BuildState::new();
        service.apply(BuildStep::CopyTemplateFiles, &mut state).unwrap();

        assert_eq!(state.template_dirs, [PathBuf::from("bar/files")]);
    }

    #[test]
    fn descriptor_with_missing_pin_fails() {
        let mut ws = MockWorkspace::new();
        ws.expect_read_to_string()
            .returning(|_| Ok(r#"{"name":"n","version":"1.0.0"}"#.to_string()));
        ws.expect_write_file().never();

        let service = PackagingService::new(Box::new(ws), Box::new(passing_compiler()), layout());
        let err = service
            .apply(BuildStep::SynthesizeDescriptor, &mut BuildState::new())
            .unwrap_err();

        assert!(matches!(
            err,
            SchemataError::Domain(DomainError::MissingPinnedDependency { .. })
        ));
    }

    #[test]
    fn tree_listing_is_depth_first() {
        let mut ws = MockWorkspace::new();
        ws.expect_read_dir().returning(|dir| {
            Ok(match dir.to_str().unwrap() {
                "/out" => vec![DirEntry::dir("a"), DirEntry::file("b.json")],
                "/out/a" => vec![DirEntry::file("c.txt")],
                _ => vec![],
            })
        });

        let service = PackagingService::new(Box::new(ws), Box::new(passing_compiler()), layout());
        let tree = service.list_tree(Path::new("/out")).unwrap();

        assert_eq!(tree.file_paths(), ["a/c.txt", "b.json"]);
        assert_eq!(tree.entries[1].depth, 1);
    }
}
