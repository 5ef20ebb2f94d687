//! Ivy descriptor generator
//!
//! Renders a module descriptor as a `module.ivy` (Ivy 2.0 syntax).
//!
//! Policies:
//! - Dependency ordering: declaration order of the canonical descriptor is
//!   preserved, same as the Maven generator.
//! - Scope mapping to configurations: `compile` -> `default->default`,
//!   `runtime` -> `runtime->default`, `test` -> `test->default`,
//!   `provided` -> `provided->default`.
//! - Ivy module descriptors have no property table. A descriptor carrying
//!   `properties` cannot be represented and fails with
//!   [`GenerateError::UnsupportedField`] rather than rendering partial
//!   output.

use super::{DescriptorGenerator, GenerateError};
use crate::models::{DependencyScope, ModuleDescriptor};
use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use std::borrow::Cow;

/// Generator for the Ivy `module.ivy` format.
#[derive(Debug, Default)]
pub struct IvyGenerator;

impl IvyGenerator {
    pub fn new() -> Self {
        Self
    }

    fn conf_mapping(scope: DependencyScope) -> &'static str {
        match scope {
            DependencyScope::Compile => "default->default",
            DependencyScope::Runtime => "runtime->default",
            DependencyScope::Test => "test->default",
            DependencyScope::Provided => "provided->default",
        }
    }
}

impl DescriptorGenerator for IvyGenerator {
    fn generate(&self, descriptor: &ModuleDescriptor) -> Result<String, GenerateError> {
        if !descriptor.properties().is_empty() {
            return Err(GenerateError::UnsupportedField(
                "properties (Ivy module descriptors have no property table)".to_string(),
            ));
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("ivy-module");
        root.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(root))?;

        let mut info = BytesStart::new("info");
        info.push_attribute(("organisation", descriptor.id().group.as_str()));
        info.push_attribute(("module", descriptor.id().name.as_str()));
        info.push_attribute(("revision", descriptor.id().version.as_str()));
        info.push_attribute(("status", "integration"));
        writer.write_event(Event::Empty(info))?;

        writer.write_event(Event::Start(BytesStart::new("configurations")))?;
        for (name, attrs) in [
            ("default", None),
            ("runtime", Some(("extends", "default"))),
            ("test", Some(("visibility", "private"))),
            ("provided", Some(("visibility", "private"))),
        ] {
            let mut conf = BytesStart::new("conf");
            conf.push_attribute(("name", name));
            if let Some((key, value)) = attrs {
                conf.push_attribute((key, value));
            }
            writer.write_event(Event::Empty(conf))?;
        }
        writer.write_event(Event::End(BytesEnd::new("configurations")))?;

        writer.write_event(Event::Start(BytesStart::new("publications")))?;
        let mut artifact = BytesStart::new("artifact");
        artifact.push_attribute(("name", descriptor.id().name.as_str()));
        artifact.push_attribute(("type", descriptor.packaging()));
        artifact.push_attribute(("ext", descriptor.packaging()));
        artifact.push_attribute(("conf", "default"));
        writer.write_event(Event::Empty(artifact))?;
        writer.write_event(Event::End(BytesEnd::new("publications")))?;

        if !descriptor.dependencies().is_empty() {
            writer.write_event(Event::Start(BytesStart::new("dependencies")))?;
            for dep in descriptor.dependencies() {
                let mut elem = BytesStart::new("dependency");
                elem.push_attribute(("org", dep.id.group.as_str()));
                elem.push_attribute(("name", dep.id.name.as_str()));
                elem.push_attribute(("rev", dep.id.version.as_str()));
                // Conf mappings carry a literal '->'; the tuple form would
                // escape the '>', so the attribute value is pushed raw.
                elem.push_attribute(Attribute {
                    key: QName(b"conf"),
                    value: Cow::Borrowed(Self::conf_mapping(dep.scope).as_bytes()),
                });
                writer.write_event(Event::Empty(elem))?;
            }
            writer.write_event(Event::End(BytesEnd::new("dependencies")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("ivy-module")))?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        String::from_utf8(xml).map_err(|e| GenerateError::Xml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DependencyDeclaration, ModuleId};
    use std::collections::BTreeMap;

    fn descriptor(properties: BTreeMap<String, String>) -> ModuleDescriptor {
        ModuleDescriptor::new(
            ModuleId::new("com.example", "demo", "1.0.0").unwrap(),
            None,
            properties,
            vec![
                DependencyDeclaration::new(
                    ModuleId::new("com.google.guava", "guava", "18.0").unwrap(),
                    DependencyScope::Compile,
                ),
                DependencyDeclaration::new(
                    ModuleId::new("junit", "junit", "4.12").unwrap(),
                    DependencyScope::Test,
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_generate_ivy_module() {
        let ivy = IvyGenerator::new().generate(&descriptor(BTreeMap::new())).unwrap();

        assert!(ivy.contains("<ivy-module version=\"2.0\">"));
        assert!(ivy.contains(
            "<info organisation=\"com.example\" module=\"demo\" revision=\"1.0.0\" status=\"integration\"/>"
        ));
        assert!(ivy.contains("<artifact name=\"demo\" type=\"jar\" ext=\"jar\" conf=\"default\"/>"));
        assert!(ivy.contains(
            "<dependency org=\"com.google.guava\" name=\"guava\" rev=\"18.0\" conf=\"default->default\"/>"
        ));
        assert!(ivy.contains(
            "<dependency org=\"junit\" name=\"junit\" rev=\"4.12\" conf=\"test->default\"/>"
        ));
        assert!(ivy.ends_with("</ivy-module>\n"));
    }

    #[test]
    fn test_conf_arrow_written_literally() {
        // Hand-maintained Ivy files write conf mappings as e.g.
        // "test->default"; an entity-escaped arrow would make every
        // comparison against them fail on escaping noise.
        let ivy = IvyGenerator::new().generate(&descriptor(BTreeMap::new())).unwrap();
        assert!(ivy.contains("conf=\"default->default\""));
        assert!(ivy.contains("conf=\"test->default\""));
        assert!(!ivy.contains("&gt;"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = IvyGenerator::new();
        let descriptor = descriptor(BTreeMap::new());
        assert_eq!(
            generator.generate(&descriptor).unwrap(),
            generator.generate(&descriptor).unwrap()
        );
    }

    #[test]
    fn test_properties_rejected_not_partially_rendered() {
        let mut properties = BTreeMap::new();
        properties.insert("java.version".to_string(), "11".to_string());

        let result = IvyGenerator::new().generate(&descriptor(properties));
        assert!(matches!(result, Err(GenerateError::UnsupportedField(_))));
    }
}
