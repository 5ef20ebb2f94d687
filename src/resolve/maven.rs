//! Maven effective-pom resolver
//!
//! Invokes Maven's help plugin out-of-process to expand a pom into its
//! effective form (parent and super-pom merged, default scopes filled in),
//! then strips the plugin's `Generated by Maven Help Plugin on <date>` banner
//! so the output is stable across runs.
//!
//! Maven is invoked offline and without snapshot updates so resolution is
//! deterministic and never touches the network.

use super::{EffectiveResolver, ResolveError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

/// Banner line marker emitted into the output file by the Maven help plugin.
/// The line carries a timestamp, so it must never take part in comparison.
const GENERATED_BANNER_MARKER: &str = "Generated by Maven Help Plugin on";

const EFFECTIVE_POM_GOAL: &str =
    "org.apache.maven.plugins:maven-help-plugin:2.2:effective-pom";

/// Resolver that shells out to Maven for formats with inheritance semantics.
pub struct MavenEffectivePomResolver {
    program: String,
    timeout: Duration,
}

impl Default for MavenEffectivePomResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MavenEffectivePomResolver {
    /// Default bounded wait for one Maven invocation. Maven is untrusted for
    /// liveness; a hung invocation is killed once this elapses.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new() -> Self {
        Self::with_program("mvn", Self::DEFAULT_TIMEOUT)
    }

    /// Create a resolver running `program` with the given bounded wait.
    /// Tests point this at stub executables instead of a real Maven.
    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl EffectiveResolver for MavenEffectivePomResolver {
    async fn resolve(&self, descriptor_path: &Path) -> Result<String, ResolveError> {
        let work_dir = descriptor_path.parent().ok_or_else(|| {
            ResolveError::IoError(format!(
                "descriptor {} has no parent directory",
                descriptor_path.display()
            ))
        })?;

        // Output goes into a scratch directory owned by this call, so no
        // partial output file survives any failure path.
        let scratch = TempDir::new()
            .map_err(|e| ResolveError::IoError(format!("failed to create scratch dir: {}", e)))?;
        let output_path = scratch.path().join("effective-pom.xml");

        debug!(
            "Resolving effective pom for {} via {}",
            descriptor_path.display(),
            self.program
        );

        let invocation = Command::new(&self.program)
            .arg("-f")
            .arg(descriptor_path)
            .arg("--batch-mode")
            .arg("--offline")
            .arg("--no-snapshot-updates")
            .arg(format!("-Doutput={}", output_path.display()))
            .arg(EFFECTIVE_POM_GOAL)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, invocation).await {
            Ok(result) => result.map_err(|e| {
                ResolveError::IoError(format!("failed to spawn {}: {}", self.program, e))
            })?,
            Err(_) => {
                warn!(
                    "Resolution of {} exceeded {:?}, killing {}",
                    descriptor_path.display(),
                    self.timeout,
                    self.program
                );
                return Err(ResolveError::Timeout(self.timeout));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ResolveError::ToolInvocation {
                status: output.status.to_string(),
                stdout,
                stderr,
            });
        }

        let resolved = match tokio::fs::read_to_string(&output_path).await {
            Ok(text) => text,
            // Exit 0 but no output file is still a failed invocation.
            Err(_) => {
                return Err(ResolveError::ToolInvocation {
                    status: format!("{} (no output file produced)", output.status),
                    stdout,
                    stderr,
                });
            }
        };
        if resolved.is_empty() {
            return Err(ResolveError::ToolInvocation {
                status: format!("{} (empty output file)", output.status),
                stdout,
                stderr,
            });
        }

        Ok(strip_generated_banner(&resolved))
    }
}

/// Remove every line carrying the help plugin's generated-on banner, leaving
/// all other lines untouched.
pub fn strip_generated_banner(text: &str) -> String {
    let mut filtered: String = text
        .lines()
        .filter(|line| !line.contains(GENERATED_BANNER_MARKER))
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') && !filtered.is_empty() {
        filtered.push('\n');
    }
    filtered
}
