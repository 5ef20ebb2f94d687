//! Effective-descriptor resolution
//!
//! Some target tools apply their own inheritance/merge semantics to a
//! descriptor file (Maven's parent/super-pom expansion). For those formats a
//! textual comparison is only meaningful after the tool itself has produced
//! its fully-expanded "effective" view of both sides. This module defines the
//! resolver abstraction and its two implementations:
//! - [`PassthroughResolver`]: returns the raw file content unchanged, for
//!   formats with no merge semantics (Ivy).
//! - [`maven::MavenEffectivePomResolver`]: invokes Maven out-of-process and
//!   returns its effective pom, with tool-generated banner lines stripped.
//!
//! Resolvers are injectable so the discrepancy detector can be tested with
//! canned effective text instead of spawning real processes.

pub mod maven;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Error during effective-descriptor resolution
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The external tool exited non-zero or produced no output file. Carries
    /// the tool's diagnostics verbatim for debuggability.
    #[error("Tool invocation failed ({status}):\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    ToolInvocation {
        status: String,
        stdout: String,
        stderr: String,
    },
    /// The external tool did not finish within the bounded wait. The process
    /// is killed; a hung resolution must not hang the comparison run.
    #[error("Resolution timed out after {0:?}")]
    Timeout(Duration),
    #[error("IO error: {0}")]
    IoError(String),
}

/// Produces the text to compare for one descriptor file.
#[async_trait]
pub trait EffectiveResolver: Send + Sync {
    /// Resolve the descriptor at `descriptor_path` to the text used for
    /// comparison.
    async fn resolve(&self, descriptor_path: &Path) -> Result<String, ResolveError>;
}

/// Resolver for formats without inheritance/merge semantics: the raw file
/// content is already effective.
#[derive(Debug, Default)]
pub struct PassthroughResolver;

impl PassthroughResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EffectiveResolver for PassthroughResolver {
    async fn resolve(&self, descriptor_path: &Path) -> Result<String, ResolveError> {
        tokio::fs::read_to_string(descriptor_path).await.map_err(|e| {
            ResolveError::IoError(format!(
                "failed to read {}: {}",
                descriptor_path.display(),
                e
            ))
        })
    }
}

// Re-export for convenience
pub use maven::MavenEffectivePomResolver;
