//! Models module for the SDK
//!
//! Defines the canonical in-memory representation of a build module:
//! its identity, its dependency declarations, and its packaging metadata.
//! A descriptor is constructed once (from the canonical JSON file), validated
//! at construction time, and read-only afterwards.

pub mod dependency;
pub mod descriptor;

pub use dependency::{DependencyDeclaration, DependencyScope};
pub use descriptor::{DescriptorError, ModuleDescriptor, ModuleId};
