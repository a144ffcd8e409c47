//! The collection manifest (`collection.json`).
//!
//! The manifest is the one machine-readable compatibility contract with the
//! external framework, so it is kept as an order-preserving JSON object and
//! never re-modelled: packaging rewrites `$schema` and nothing else.
//!
//! ```json
//! {
//!   "$schema": "../node_modules/@angular-devkit/schematics/collection-schema.json",
//!   "schematics": {
//!     "my-full-schematic": {
//!       "description": "A schematic using a schema.",
//!       "factory": "./my-full-schematic/index",
//!       "schema": "./my-full-schematic/schema.json"
//!     }
//!   }
//! }
//! ```

use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::DomainError;

const SCHEMA_KEY: &str = "$schema";
const SCHEMATICS_KEY: &str = "schematics";
const DESCRIPTION_KEY: &str = "description";

/// One schematic listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicEntry {
    pub name: String,
    pub description: Option<String>,
}

/// Parsed manifest document.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionManifest {
    document: Map<String, Value>,
}

impl CollectionManifest {
    /// Parse manifest text. `path` is only used for error messages.
    pub fn parse(raw: &str, path: &Path) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| DomainError::InvalidManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(document) => Ok(Self { document }),
            other => Err(DomainError::InvalidManifest {
                path: path.to_path_buf(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Overwrite `$schema`. An existing key keeps its position; a missing one
    /// is appended.
    pub fn set_schema_ref(&mut self, schema_ref: &str) {
        self.document
            .insert(SCHEMA_KEY.to_string(), Value::String(schema_ref.to_string()));
    }

    /// Schematics in document order.
    ///
    /// A missing or non-object `schematics` member yields no entries; a
    /// non-string description is treated as absent.
    pub fn entries(&self) -> Vec<SchematicEntry> {
        let Some(Value::Object(schematics)) = self.document.get(SCHEMATICS_KEY) else {
            return Vec::new();
        };

        schematics
            .iter()
            .map(|(name, config)| SchematicEntry {
                name: name.clone(),
                description: config
                    .get(DESCRIPTION_KEY)
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }

    /// Stable two-space pretty JSON, no trailing newline.
    pub fn to_pretty_json(&self) -> String {
        // Serializing a Map<String, Value> cannot fail.
        serde_json::to_string_pretty(&self.document).unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
