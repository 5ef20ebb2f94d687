//! Canonical descriptor loading
//!
//! Parses the canonical JSON module descriptor (`module.build.json`) into a
//! validated [`ModuleDescriptor`]. The JSON shape keys dependencies by scope:
//!
//! ```json
//! {
//!     "module": "com.example:demo:1.0.0",
//!     "packaging": "jar",
//!     "properties": { "java.version": "11" },
//!     "dependencies": {
//!         "compile": ["com.google.guava:guava:18.0"],
//!         "test": ["junit:junit:4.12"]
//!     }
//! }
//! ```

use crate::models::{
    DependencyDeclaration, DependencyScope, DescriptorError, ModuleDescriptor, ModuleId,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Conventional filename for the canonical descriptor within a module
/// directory.
pub const CANONICAL_DESCRIPTOR_FILENAME: &str = "module.build.json";

/// Raw serde shape of the canonical JSON descriptor, validated into the model
/// after parsing.
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    module: String,
    #[serde(default)]
    packaging: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, String>,
    /// Scope token -> coordinate strings. BTreeMap keeps the scope iteration
    /// order stable, but within one scope declaration order is preserved.
    #[serde(default)]
    dependencies: BTreeMap<String, Vec<String>>,
}

/// Loader for canonical JSON descriptors.
pub struct DescriptorLoader;

impl DescriptorLoader {
    /// Load and validate the canonical descriptor at `path`.
    ///
    /// Fails with [`DescriptorError::Malformed`] on bad JSON, unknown scope
    /// tokens, bad coordinates or violated model invariants, and with
    /// [`DescriptorError::IoError`] when the file cannot be read.
    pub async fn load(path: &Path) -> Result<ModuleDescriptor, DescriptorError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DescriptorError::IoError(format!("failed to read {}: {}", path.display(), e)))?;
        let descriptor = Self::parse(&content)?;
        info!(
            "Loaded descriptor {} with {} dependencies from {}",
            descriptor.id(),
            descriptor.dependencies().len(),
            path.display()
        );
        Ok(descriptor)
    }

    /// Parse canonical descriptor JSON from a string.
    pub fn parse(content: &str) -> Result<ModuleDescriptor, DescriptorError> {
        let raw: RawDescriptor = serde_json::from_str(content)
            .map_err(|e| DescriptorError::Malformed(format!("invalid descriptor JSON: {}", e)))?;

        let id = ModuleId::parse(&raw.module)?;

        let mut dependencies = Vec::new();
        for (scope_token, coordinates) in &raw.dependencies {
            let scope: DependencyScope = scope_token.parse()?;
            for coordinate in coordinates {
                dependencies.push(DependencyDeclaration::new(
                    ModuleId::parse(coordinate)?,
                    scope,
                ));
            }
        }

        ModuleDescriptor::new(id, raw.packaging, raw.properties, dependencies)
    }
}
