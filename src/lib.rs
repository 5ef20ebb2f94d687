//! Build Descriptor SDK - module-descriptor translation and discrepancy detection
//!
//! Provides unified interfaces for:
//! - The canonical in-memory module descriptor model
//! - Per-format descriptor generation (Maven pom.xml, Ivy module.ivy)
//! - Effective-descriptor resolution through the target tool
//! - Discrepancy detection between canonical and hand-maintained descriptors
//! - Module discovery over a source tree

pub mod compare;
pub mod discover;
pub mod generate;
pub mod loader;
pub mod models;
pub mod registry;
pub mod resolve;

// Re-export commonly used types
pub use compare::{CompareError, DiscrepancyDetector};
pub use discover::{
    ComparisonUnit, DiscoverError, UnitOutcome, discover_units, run_comparisons, run_units,
};
pub use generate::{DescriptorGenerator, GenerateError, IvyGenerator, MavenGenerator};
pub use loader::{CANONICAL_DESCRIPTOR_FILENAME, DescriptorLoader};
pub use registry::{DescriptorFormat, formats_in};
pub use resolve::{
    EffectiveResolver, MavenEffectivePomResolver, PassthroughResolver, ResolveError,
};

// Re-export models
pub use models::{
    DependencyDeclaration, DependencyScope, DescriptorError, ModuleDescriptor, ModuleId,
};
