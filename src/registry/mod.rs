//! Format registry
//!
//! Closed catalog of supported target descriptor formats. Each format carries
//! three fixed associations: the conventional filename hand-maintained
//! descriptors use, the generator that renders the canonical model into the
//! format, and the resolver that produces comparable "effective" text for it.
//! The set is small and static; no runtime plugin discovery.

use crate::generate::{DescriptorGenerator, IvyGenerator, MavenGenerator};
use crate::resolve::{EffectiveResolver, MavenEffectivePomResolver, PassthroughResolver};
use std::fmt;
use std::path::Path;

/// Identifier for one supported target descriptor format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorFormat {
    Maven,
    Ivy,
}

impl DescriptorFormat {
    pub const ALL: [DescriptorFormat; 2] = [DescriptorFormat::Maven, DescriptorFormat::Ivy];

    /// Conventional filename for hand-maintained descriptors of this format.
    pub fn filename(&self) -> &'static str {
        match self {
            DescriptorFormat::Maven => "pom.xml",
            DescriptorFormat::Ivy => "module.ivy",
        }
    }

    /// Short tag used in log output and derived temporary-file names.
    pub fn tag(&self) -> &'static str {
        match self {
            DescriptorFormat::Maven => "maven",
            DescriptorFormat::Ivy => "ivy",
        }
    }

    /// Generator rendering the canonical model into this format.
    pub fn generator(&self) -> Box<dyn DescriptorGenerator> {
        match self {
            DescriptorFormat::Maven => Box::new(MavenGenerator::new()),
            DescriptorFormat::Ivy => Box::new(IvyGenerator::new()),
        }
    }

    /// Whether comparison must go through the target tool's own
    /// inheritance/merge expansion before texts are comparable.
    pub fn requires_resolution(&self) -> bool {
        match self {
            DescriptorFormat::Maven => true,
            DescriptorFormat::Ivy => false,
        }
    }

    /// Resolver producing the comparable text for this format. Formats
    /// without merge semantics get the passthrough resolver, so callers never
    /// branch on [`Self::requires_resolution`] themselves.
    pub fn resolver(&self) -> Box<dyn EffectiveResolver> {
        match self {
            DescriptorFormat::Maven => Box::new(MavenEffectivePomResolver::new()),
            DescriptorFormat::Ivy => Box::new(PassthroughResolver::new()),
        }
    }
}

impl fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Formats whose conventional filename exists as a file in `dir`.
/// I/O errors from the directory probe propagate unchanged.
pub fn formats_in(dir: &Path) -> std::io::Result<Vec<DescriptorFormat>> {
    // Probe the directory itself first so a missing directory is an error,
    // not an empty result.
    std::fs::read_dir(dir)?;

    let mut formats = Vec::new();
    for format in DescriptorFormat::ALL {
        let candidate = dir.join(format.filename());
        if candidate.is_file() {
            formats.push(format);
        }
    }
    Ok(formats)
}
