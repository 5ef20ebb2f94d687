//! Descriptor generation
//!
//! Provides generators rendering a [`ModuleDescriptor`] into each target
//! build tool's descriptor syntax:
//! - Maven (`pom.xml`)
//! - Ivy (`module.ivy`)
//!
//! Generators are pure: the same descriptor always renders to byte-identical
//! text (no timestamps, no non-deterministic ordering). Each implementation
//! documents its dependency-ordering policy and its policy for model fields
//! the format cannot express.

pub mod ivy;
pub mod maven;

use crate::models::ModuleDescriptor;

/// Error during descriptor generation
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The descriptor carries a field the target format cannot express and
    /// for which no omission policy exists.
    #[error("Unsupported field for target format: {0}")]
    UnsupportedField(String),
    #[error("XML write error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for GenerateError {
    fn from(err: quick_xml::Error) -> Self {
        GenerateError::Xml(err.to_string())
    }
}

/// Renderer from the canonical module descriptor to one target format.
pub trait DescriptorGenerator: Send + Sync {
    /// Render `descriptor` into the target format's textual syntax.
    ///
    /// Must either represent every field or fail; silently dropping a field
    /// without a documented omission policy is a format-coverage bug.
    fn generate(&self, descriptor: &ModuleDescriptor) -> Result<String, GenerateError>;
}

// Re-export for convenience
pub use ivy::IvyGenerator;
pub use maven::MavenGenerator;
