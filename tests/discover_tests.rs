//! Discovery and comparison-run tests

use async_trait::async_trait;
use build_descriptor_sdk::{
    CANONICAL_DESCRIPTOR_FILENAME, CompareError, DescriptorFormat, DescriptorGenerator,
    DescriptorLoader, DiscrepancyDetector, EffectiveResolver, IvyGenerator, ResolveError,
    discover_units, run_units,
};
use std::path::Path;
use std::sync::Arc;

const CORE_CANONICAL: &str = r#"{
    "module": "com.example:core:2.1.0",
    "dependencies": { "compile": ["org.slf4j:slf4j-api:1.7.36"] }
}"#;

const SERVER_CANONICAL: &str = r#"{
    "module": "com.example:server:2.1.0",
    "dependencies": { "test": ["junit:junit:4.12"] }
}"#;

fn write_module(root: &Path, name: &str, canonical: &str, ivy: Option<&str>, pom: Option<&str>) {
    let dir = root.join(name);
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join(CANONICAL_DESCRIPTOR_FILENAME), canonical).unwrap();
    if let Some(content) = ivy {
        std::fs::write(dir.join("module.ivy"), content).unwrap();
    }
    if let Some(content) = pom {
        std::fs::write(dir.join("pom.xml"), content).unwrap();
    }
}

fn generated_ivy(canonical: &str) -> String {
    IvyGenerator::new()
        .generate(&DescriptorLoader::parse(canonical).unwrap())
        .unwrap()
}

/// Maven stand-in that fails like a broken local tool installation.
struct BrokenResolver;

#[async_trait]
impl EffectiveResolver for BrokenResolver {
    async fn resolve(&self, _descriptor_path: &Path) -> Result<String, ResolveError> {
        Err(ResolveError::ToolInvocation {
            status: "exit status: 1".to_string(),
            stdout: String::new(),
            stderr: "[ERROR] no local repository".to_string(),
        })
    }
}

#[tokio::test]
async fn test_run_reports_each_unit_independently() {
    let temp = tempfile::TempDir::new().unwrap();

    // core: equivalent ivy descriptor, plus a pom whose resolution fails
    write_module(
        temp.path(),
        "core",
        CORE_CANONICAL,
        Some(&generated_ivy(CORE_CANONICAL)),
        Some("<project/>\n"),
    );
    // server: drifted ivy descriptor (extra dependency not in the canonical
    // model)
    let drifted = generated_ivy(SERVER_CANONICAL).replace(
        "</dependencies>",
        "    <dependency org=\"x\" name=\"y\" rev=\"1\" conf=\"default->default\"/>\n    </dependencies>",
    );
    write_module(temp.path(), "server", SERVER_CANONICAL, Some(&drifted), None);

    let units = discover_units(temp.path()).unwrap();
    let summary: Vec<(&str, DescriptorFormat)> = units
        .iter()
        .map(|u| (u.module.as_str(), u.format))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("core", DescriptorFormat::Maven),
            ("core", DescriptorFormat::Ivy),
            ("server", DescriptorFormat::Ivy),
        ]
    );

    let detector =
        DiscrepancyDetector::new().with_resolver(DescriptorFormat::Maven, Arc::new(BrokenResolver));
    let outcomes = run_units(&detector, units).await;

    assert_eq!(outcomes.len(), 3);
    // core/maven: resolver failure, reported with diagnostics
    assert!(matches!(
        outcomes[0].result,
        Err(CompareError::Resolve(ResolveError::ToolInvocation { .. }))
    ));
    // core/ivy: equivalent, and the sibling failure did not abort it
    assert!(outcomes[1].result.is_ok());
    // server/ivy: genuine mismatch
    assert!(matches!(outcomes[2].result, Err(CompareError::Mismatch { .. })));
}

#[tokio::test]
async fn test_run_with_no_units_is_empty() {
    let detector = DiscrepancyDetector::new();
    let outcomes = run_units(&detector, Vec::new()).await;
    assert!(outcomes.is_empty());
}
