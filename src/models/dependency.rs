//! Dependency declaration model

use super::descriptor::{DescriptorError, ModuleId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scope classifier for a dependency declaration.
///
/// The set is closed: canonical descriptors using any other scope token are
/// rejected at parse time rather than mapped to a fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Compile,
    Runtime,
    Test,
    Provided,
}

impl DependencyScope {
    /// Token used for this scope in the canonical JSON descriptor and in
    /// generated target descriptors.
    pub fn token(&self) -> &'static str {
        match self {
            DependencyScope::Compile => "compile",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Test => "test",
            DependencyScope::Provided => "provided",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DependencyScope {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compile" => Ok(DependencyScope::Compile),
            "runtime" => Ok(DependencyScope::Runtime),
            "test" => Ok(DependencyScope::Test),
            "provided" => Ok(DependencyScope::Provided),
            other => Err(DescriptorError::Malformed(format!(
                "unrecognized dependency scope '{}'",
                other
            ))),
        }
    }
}

/// A single dependency declaration, owned by its parent module descriptor.
///
/// The version may be a literal or a range expression; range support is a
/// property of the target format, not of the model.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DependencyDeclaration {
    pub id: ModuleId,
    pub scope: DependencyScope,
}

impl DependencyDeclaration {
    pub fn new(id: ModuleId, scope: DependencyScope) -> Self {
        Self { id, scope }
    }
}
