//! Packaging pipeline vocabulary: steps, the state they pass along, and the
//! resulting report.

use std::fmt;
use std::path::PathBuf;

/// One packaging step. [`BuildStep::PIPELINE`] is the only valid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    Clean,
    Compile,
    PatchManifest,
    CopySchemas,
    CopyTemplateFiles,
    SynthesizeDescriptor,
}

impl BuildStep {
    pub const PIPELINE: [BuildStep; 6] = [
        BuildStep::Clean,
        BuildStep::Compile,
        BuildStep::PatchManifest,
        BuildStep::CopySchemas,
        BuildStep::CopyTemplateFiles,
        BuildStep::SynthesizeDescriptor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Compile => "compile",
            Self::PatchManifest => "patch-manifest",
            Self::CopySchemas => "copy-schemas",
            Self::CopyTemplateFiles => "copy-template-files",
            Self::SynthesizeDescriptor => "synthesize-descriptor",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state threaded through the pipeline.
///
/// Every step reads what earlier steps recorded here; nothing is shared
/// through hidden globals or the working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildState {
    /// Steps finished so far, in order.
    pub completed: Vec<BuildStep>,
    /// Whether `Clean` found and removed an earlier build.
    pub removed_previous_build: bool,
    /// Copied schema files, relative to the source/build roots.
    pub schema_files: Vec<PathBuf>,
    /// Copied verbatim directories, relative to the source/build roots.
    pub template_dirs: Vec<PathBuf>,
    /// Absolute path of the patched manifest.
    pub manifest: Option<PathBuf>,
    /// Absolute path of the synthesized descriptor.
    pub descriptor: Option<PathBuf>,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complete(&mut self, step: BuildStep) {
        self.completed.push(step);
    }

    pub fn is_complete(&self) -> bool {
        self.completed == BuildStep::PIPELINE
    }
}

/// One line of the build listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Nesting level, 0 for direct children of the build root.
    pub depth: usize,
    pub name: String,
    pub is_dir: bool,
}

/// Depth-first, name-sorted listing of a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTree {
    pub entries: Vec<TreeEntry>,
}

impl BuildTree {
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_dir).count()
    }

    pub fn directory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_dir).count()
    }

    /// Relative paths of every file, `/`-separated.
    pub fn file_paths(&self) -> Vec<String> {
        let mut stack: Vec<&str> = Vec::new();
        let mut files = Vec::new();
        for entry in &self.entries {
            stack.truncate(entry.depth);
            if entry.is_dir {
                stack.push(&entry.name);
            } else {
                let mut path = stack.join("/");
                if !path.is_empty() {
                    path.push('/');
                }
                path.push_str(&entry.name);
                files.push(path);
            }
        }
        files
    }
}

/// Outcome of a successful packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub build_dir: PathBuf,
    pub state: BuildState,
    pub tree: BuildTree,
}
