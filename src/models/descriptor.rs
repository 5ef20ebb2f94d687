//! Module descriptor model
//!
//! The descriptor is the tool-agnostic record of a module's identity,
//! dependencies and packaging metadata. All invariants are enforced in the
//! constructor; once built, a descriptor is never mutated.

use super::dependency::DependencyDeclaration;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

/// Error for malformed canonical descriptors.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Malformed descriptor: {0}")]
    Malformed(String),
    #[error("IO error: {0}")]
    IoError(String),
}

/// Module coordinates: group, name and version.
///
/// Used both for the module's own identity and for dependency targets.
/// Rendered as `group:name:version` in the canonical JSON descriptor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct ModuleId {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleId {
    /// Build an identity, validating the identity invariants: every field is
    /// non-empty and contains no path separator.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, DescriptorError> {
        let id = Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        };
        for (field, value) in [
            ("group", &id.group),
            ("name", &id.name),
            ("version", &id.version),
        ] {
            if value.is_empty() {
                return Err(DescriptorError::Malformed(format!(
                    "module {} must not be empty",
                    field
                )));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(DescriptorError::Malformed(format!(
                    "module {} '{}' must not contain path separators",
                    field, value
                )));
            }
        }
        Ok(id)
    }

    /// Parse a `group:name:version` coordinate string.
    pub fn parse(coordinates: &str) -> Result<Self, DescriptorError> {
        let parts: Vec<&str> = coordinates.split(':').collect();
        match parts.as_slice() {
            [group, name, version] => Self::new(*group, *name, *version),
            _ => Err(DescriptorError::Malformed(format!(
                "invalid module coordinates '{}': expected group:name:version",
                coordinates
            ))),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// Canonical, tool-agnostic module descriptor.
///
/// Dependency insertion order is preserved: some target tools build the
/// classpath in declaration order, so order is part of the data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModuleDescriptor {
    id: ModuleId,
    packaging: String,
    /// Build properties, ordered by key so every rendering is deterministic.
    properties: BTreeMap<String, String>,
    dependencies: Vec<DependencyDeclaration>,
}

impl ModuleDescriptor {
    /// Default packaging when the canonical descriptor does not specify one.
    pub const DEFAULT_PACKAGING: &'static str = "jar";

    /// Build a descriptor, validating:
    /// - the identity invariants of [`ModuleId`]
    /// - that no two dependencies on the same (group, name) carry conflicting
    ///   versions (an exact duplicate is tolerated and collapses to one)
    pub fn new(
        id: ModuleId,
        packaging: Option<String>,
        properties: BTreeMap<String, String>,
        dependencies: Vec<DependencyDeclaration>,
    ) -> Result<Self, DescriptorError> {
        let mut seen: HashMap<(String, String), String> = HashMap::new();
        let mut deduped = Vec::with_capacity(dependencies.len());
        for dep in dependencies {
            let key = (dep.id.group.clone(), dep.id.name.clone());
            match seen.get(&key) {
                Some(version) if *version != dep.id.version => {
                    return Err(DescriptorError::Malformed(format!(
                        "conflicting versions for dependency {}:{}: '{}' vs '{}'",
                        key.0, key.1, version, dep.id.version
                    )));
                }
                Some(_) => {
                    // exact duplicate, keep first occurrence
                }
                None => {
                    seen.insert(key, dep.id.version.clone());
                    deduped.push(dep);
                }
            }
        }

        Ok(Self {
            id,
            packaging: packaging.unwrap_or_else(|| Self::DEFAULT_PACKAGING.to_string()),
            properties,
            dependencies: deduped,
        })
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Dependencies in declaration order.
    pub fn dependencies(&self) -> &[DependencyDeclaration] {
        &self.dependencies
    }
}
