//! Module discovery and comparison-run orchestration
//!
//! Walks a source-tree root with one subdirectory per module and produces one
//! comparison unit per (module with a canonical descriptor, present target
//! format). Units are independent: they share no mutable state and run as
//! parallel tasks, and one unit's failure never aborts its siblings.

use crate::compare::{CompareError, DiscrepancyDetector};
use crate::loader::CANONICAL_DESCRIPTOR_FILENAME;
use crate::registry::{self, DescriptorFormat};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Error during module discovery
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// One independent unit of work: a module directory compared against one of
/// its target-format descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonUnit {
    /// Module directory name, used for reporting.
    pub module: String,
    /// Absolute (or root-relative) module directory.
    pub dir: PathBuf,
    pub format: DescriptorFormat,
}

impl ComparisonUnit {
    pub fn canonical_path(&self) -> PathBuf {
        self.dir.join(CANONICAL_DESCRIPTOR_FILENAME)
    }

    pub fn existing_path(&self) -> PathBuf {
        self.dir.join(self.format.filename())
    }
}

/// Outcome of one comparison unit.
#[derive(Debug)]
pub struct UnitOutcome {
    pub unit: ComparisonUnit,
    pub result: Result<(), CompareError>,
}

/// Enumerate comparison units under `root`: every module subdirectory holding
/// a canonical descriptor yields one unit per target-format descriptor
/// present beside it. Modules are visited in sorted order and formats in
/// registry order, so runs are deterministic.
pub fn discover_units(root: &Path) -> Result<Vec<ComparisonUnit>, DiscoverError> {
    let entries = std::fs::read_dir(root)
        .map_err(|e| DiscoverError::IoError(format!("failed to read {}: {}", root.display(), e)))?;

    let mut module_dirs = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| DiscoverError::IoError(format!("failed to read directory entry: {}", e)))?;
        let path = entry.path();
        if path.is_dir() {
            module_dirs.push(path);
        }
    }
    module_dirs.sort();

    let mut units = Vec::new();
    for dir in module_dirs {
        if !dir.join(CANONICAL_DESCRIPTOR_FILENAME).is_file() {
            continue;
        }
        let module = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let formats = registry::formats_in(&dir)
            .map_err(|e| DiscoverError::IoError(format!("failed to probe {}: {}", dir.display(), e)))?;
        for format in formats {
            units.push(ComparisonUnit {
                module: module.clone(),
                dir: dir.clone(),
                format,
            });
        }
    }

    info!("Discovered {} comparison units under {}", units.len(), root.display());
    Ok(units)
}

/// Run every unit as its own tokio task and collect the outcomes in unit
/// order. Failures are per-unit: they are logged and reported, never
/// propagated across siblings.
pub async fn run_units(
    detector: &DiscrepancyDetector,
    units: Vec<ComparisonUnit>,
) -> Vec<UnitOutcome> {
    let mut handles = Vec::with_capacity(units.len());
    for unit in units {
        let detector = detector.clone();
        let task_unit = unit.clone();
        let handle = tokio::spawn(async move {
            detector
                .compare(
                    &task_unit.canonical_path(),
                    &task_unit.existing_path(),
                    task_unit.format,
                )
                .await
        });
        handles.push((unit, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (unit, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(CompareError::IoError(format!("comparison task failed: {}", e))),
        };
        if let Err(error) = &result {
            warn!("Unit {}/{} failed: {}", unit.module, unit.format, error);
        }
        outcomes.push(UnitOutcome { unit, result });
    }
    outcomes
}

/// Discover every comparison unit under `root` and run them with the default
/// detector. Convenience entry point for callers that do not need to inject
/// resolvers.
pub async fn run_comparisons(root: &Path) -> anyhow::Result<Vec<UnitOutcome>> {
    let units = discover_units(root)
        .with_context(|| format!("discovering modules under {}", root.display()))?;
    Ok(run_units(&DiscrepancyDetector::new(), units).await)
}
