//! Catalog Service - lists the schematics a collection provides.
//!
//! Reads the source manifest only; listing never builds, spawns, or creates
//! directories.

use crate::{
    application::{ApplicationError, ports::Workspace},
    domain::{CollectionLayout, CollectionManifest, SchematicEntry},
    error::SchemataResult,
};

/// Service for manifest queries.
pub struct CatalogService {
    workspace: Box<dyn Workspace>,
    layout: CollectionLayout,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(workspace: Box<dyn Workspace>, layout: CollectionLayout) -> Self {
        Self { workspace, layout }
    }

    /// Schematics in manifest order.
    pub fn list(&self) -> SchemataResult<Vec<SchematicEntry>> {
        let path = self.layout.manifest();
        if !self.workspace.exists(path) {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let raw = self.workspace.read_to_string(path)?;
        let manifest = CollectionManifest::parse(&raw, path)?;
        Ok(manifest.entries())
    }
}
