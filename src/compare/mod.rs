//! Discrepancy detection
//!
//! The comparison engine: given a module's canonical descriptor and an
//! existing hand-maintained descriptor of a known format, generate the
//! format's descriptor from the canonical model, resolve both sides to their
//! effective text where the format requires it, and demand exact textual
//! equality. Equality is textual, not structural: any divergence counts,
//! including formatting drift that could hide semantic drift.

use crate::generate::GenerateError;
use crate::loader::DescriptorLoader;
use crate::models::DescriptorError;
use crate::registry::DescriptorFormat;
use crate::resolve::{EffectiveResolver, ResolveError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Error during a comparison run
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("IO error: {0}")]
    IoError(String),
    /// The condition under test: existing and generated descriptors are not
    /// textually equivalent. Both full texts are carried so a human can judge
    /// whether the canonical model is missing information or a generator has
    /// a coverage bug.
    #[error("Descriptor mismatch, {}", first_divergence(.existing, .generated))]
    Mismatch { existing: String, generated: String },
}

/// Locate the first line where the two texts diverge, for the mismatch
/// error's summary line.
fn first_divergence(existing: &str, generated: &str) -> String {
    for (index, (left, right)) in existing.lines().zip(generated.lines()).enumerate() {
        if left != right {
            return format!(
                "first divergence at line {}: existing '{}' vs generated '{}'",
                index + 1,
                left,
                right
            );
        }
    }
    format!(
        "texts differ in length: existing {} lines vs generated {} lines",
        existing.lines().count(),
        generated.lines().count()
    )
}

/// Compares hand-maintained descriptors against the canonical model.
///
/// Resolvers are injectable per format, so tests can substitute canned
/// effective text for the Maven subprocess.
#[derive(Clone)]
pub struct DiscrepancyDetector {
    maven_resolver: Arc<dyn EffectiveResolver>,
    ivy_resolver: Arc<dyn EffectiveResolver>,
}

impl Default for DiscrepancyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscrepancyDetector {
    /// Detector wired with each format's registry resolver.
    pub fn new() -> Self {
        Self {
            maven_resolver: Arc::from(DescriptorFormat::Maven.resolver()),
            ivy_resolver: Arc::from(DescriptorFormat::Ivy.resolver()),
        }
    }

    /// Replace the resolver used for `format`.
    pub fn with_resolver(
        mut self,
        format: DescriptorFormat,
        resolver: Arc<dyn EffectiveResolver>,
    ) -> Self {
        match format {
            DescriptorFormat::Maven => self.maven_resolver = resolver,
            DescriptorFormat::Ivy => self.ivy_resolver = resolver,
        }
        self
    }

    fn resolver_for(&self, format: DescriptorFormat) -> &Arc<dyn EffectiveResolver> {
        match format {
            DescriptorFormat::Maven => &self.maven_resolver,
            DescriptorFormat::Ivy => &self.ivy_resolver,
        }
    }

    /// Compare the canonical descriptor at `canonical_path` against the
    /// hand-maintained `existing_path` of the given format.
    ///
    /// The generated descriptor is written next to the existing one (some
    /// formats resolve relative to file-tree position) under a per-run unique
    /// name, and is removed on every exit path.
    pub async fn compare(
        &self,
        canonical_path: &Path,
        existing_path: &Path,
        format: DescriptorFormat,
    ) -> Result<(), CompareError> {
        let descriptor = DescriptorLoader::load(canonical_path).await?;
        let generated_text = format.generator().generate(&descriptor)?;

        let module_dir = existing_path.parent().ok_or_else(|| {
            CompareError::IoError(format!(
                "existing descriptor {} has no parent directory",
                existing_path.display()
            ))
        })?;

        // Unique suffix keeps parallel units from colliding; the handle
        // deletes the file when dropped, on success and failure alike.
        let mut generated_file = tempfile::Builder::new()
            .prefix(&format!("generated-{}-", format.tag()))
            .suffix(".xml")
            .tempfile_in(module_dir)
            .map_err(|e| {
                CompareError::IoError(format!("failed to create generated descriptor: {}", e))
            })?;
        generated_file
            .write_all(generated_text.as_bytes())
            .map_err(|e| {
                CompareError::IoError(format!("failed to write generated descriptor: {}", e))
            })?;
        generated_file
            .flush()
            .map_err(|e| CompareError::IoError(format!("failed to flush generated descriptor: {}", e)))?;

        let resolver = self.resolver_for(format);
        let existing_effective = resolver.resolve(existing_path).await?;
        let generated_effective = resolver.resolve(generated_file.path()).await?;

        if existing_effective != generated_effective {
            warn!(
                "Descriptor mismatch for {} ({})",
                existing_path.display(),
                format
            );
            return Err(CompareError::Mismatch {
                existing: existing_effective,
                generated: generated_effective,
            });
        }

        info!(
            "Descriptor {} is equivalent to {} ({})",
            canonical_path.display(),
            existing_path.display(),
            format
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_divergence_points_at_line() {
        let summary = first_divergence("a\nb\nc\n", "a\nB\nc\n");
        assert!(summary.contains("line 2"));
        assert!(summary.contains("'b'"));
        assert!(summary.contains("'B'"));
    }

    #[test]
    fn test_first_divergence_length_difference() {
        let summary = first_divergence("a\nb\n", "a\nb\nc\n");
        assert!(summary.contains("2 lines"));
        assert!(summary.contains("3 lines"));
    }
}
