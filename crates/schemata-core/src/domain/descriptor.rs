//! Package descriptors (`package.json`).
//!
//! The project's own descriptor is read, and a minimal descriptor is written
//! into the build directory so the external executor can resolve the
//! collection from it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// The fields of the project descriptor that packaging reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Map<String, Value>,
}

impl ProjectDescriptor {
    /// Parse descriptor text. `path` is only used for error messages.
    pub fn parse(raw: &str, path: &Path) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidDescriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Version string of a declared dependency.
    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).and_then(Value::as_str)
    }
}

/// Minimal descriptor written to the build root.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildDescriptor {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schematics: String,
    pub dependencies: Map<String, Value>,
}

impl BuildDescriptor {
    /// Derive the build descriptor from the project descriptor.
    ///
    /// Exactly the `pinned` dependencies are copied, in the given order. A
    /// pinned dependency the project does not declare is an error.
    pub fn synthesize(
        project: &ProjectDescriptor,
        schematics_entry: &str,
        pinned: &[String],
    ) -> Result<Self, DomainError> {
        let name = project
            .name
            .clone()
            .ok_or(DomainError::MissingDescriptorField { field: "name" })?;
        let version = project
            .version
            .clone()
            .ok_or(DomainError::MissingDescriptorField { field: "version" })?;

        let mut dependencies = Map::new();
        for dep in pinned {
            let version = project.dependency(dep).ok_or_else(|| {
                DomainError::MissingPinnedDependency { name: dep.clone() }
            })?;
            dependencies.insert(dep.clone(), Value::String(version.to_string()));
        }

        Ok(Self {
            name,
            version,
            description: project.description.clone(),
            schematics: schematics_entry.to_string(),
            dependencies,
        })
    }

    /// Two-space pretty JSON, no trailing newline.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
