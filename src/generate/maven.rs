//! Maven descriptor generator
//!
//! Renders a module descriptor as a `pom.xml`.
//!
//! Policies:
//! - Dependency ordering: declaration order of the canonical descriptor is
//!   preserved. Maven builds the compile classpath in declaration order, so
//!   reordering would change build semantics.
//! - `compile` scope is omitted on dependencies (it is Maven's default and
//!   hand-written poms conventionally leave it out); every other scope is
//!   written explicitly.
//! - Every model field is expressible in a pom, so this generator has no
//!   unsupported-field failure path.

use super::{DescriptorGenerator, GenerateError};
use crate::models::{DependencyScope, ModuleDescriptor};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

/// Generator for the Maven `pom.xml` format.
#[derive(Debug, Default)]
pub struct MavenGenerator;

impl MavenGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorGenerator for MavenGenerator {
    fn generate(&self, descriptor: &ModuleDescriptor) -> Result<String, GenerateError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut project = BytesStart::new("project");
        project.push_attribute(("xmlns", POM_NAMESPACE));
        project.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
        project.push_attribute(("xsi:schemaLocation", POM_SCHEMA_LOCATION));
        writer.write_event(Event::Start(project))?;

        write_text_element(&mut writer, "modelVersion", "4.0.0")?;
        write_text_element(&mut writer, "groupId", &descriptor.id().group)?;
        write_text_element(&mut writer, "artifactId", &descriptor.id().name)?;
        write_text_element(&mut writer, "version", &descriptor.id().version)?;
        write_text_element(&mut writer, "packaging", descriptor.packaging())?;

        if !descriptor.properties().is_empty() {
            writer.write_event(Event::Start(BytesStart::new("properties")))?;
            for (key, value) in descriptor.properties() {
                write_text_element(&mut writer, key, value)?;
            }
            writer.write_event(Event::End(BytesEnd::new("properties")))?;
        }

        if !descriptor.dependencies().is_empty() {
            writer.write_event(Event::Start(BytesStart::new("dependencies")))?;
            for dep in descriptor.dependencies() {
                writer.write_event(Event::Start(BytesStart::new("dependency")))?;
                write_text_element(&mut writer, "groupId", &dep.id.group)?;
                write_text_element(&mut writer, "artifactId", &dep.id.name)?;
                write_text_element(&mut writer, "version", &dep.id.version)?;
                if dep.scope != DependencyScope::Compile {
                    write_text_element(&mut writer, "scope", dep.scope.token())?;
                }
                writer.write_event(Event::End(BytesEnd::new("dependency")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("dependencies")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("project")))?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        String::from_utf8(xml).map_err(|e| GenerateError::Xml(e.to_string()))
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), GenerateError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DependencyDeclaration, ModuleId};
    use std::collections::BTreeMap;

    fn descriptor() -> ModuleDescriptor {
        ModuleDescriptor::new(
            ModuleId::new("com.example", "demo", "1.0.0").unwrap(),
            None,
            BTreeMap::new(),
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
    fn test_generate_pom() {
        let pom = MavenGenerator::new().generate(&descriptor()).unwrap();

        assert!(pom.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(pom.contains("<modelVersion>4.0.0</modelVersion>"));
        assert!(pom.contains("<groupId>com.example</groupId>"));
        assert!(pom.contains("<artifactId>demo</artifactId>"));
        assert!(pom.contains("<version>1.0.0</version>"));
        assert!(pom.contains("<packaging>jar</packaging>"));
        assert!(pom.contains("<artifactId>guava</artifactId>"));
        // compile is Maven's default scope and stays implicit
        assert!(!pom.contains("<scope>compile</scope>"));
        assert!(pom.contains("<scope>test</scope>"));
        assert!(pom.ends_with("</project>\n"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = MavenGenerator::new();
        let descriptor = descriptor();
        assert_eq!(
            generator.generate(&descriptor).unwrap(),
            generator.generate(&descriptor).unwrap()
        );
    }

    #[test]
    fn test_properties_rendered_in_key_order() {
        let mut properties = BTreeMap::new();
        properties.insert("maven.compiler.source".to_string(), "11".to_string());
        properties.insert("java.version".to_string(), "11".to_string());
        let descriptor = ModuleDescriptor::new(
            ModuleId::new("g", "n", "1.0").unwrap(),
            None,
            properties,
            Vec::new(),
        )
        .unwrap();

        let pom = MavenGenerator::new().generate(&descriptor).unwrap();
        let java = pom.find("<java.version>").unwrap();
        let source = pom.find("<maven.compiler.source>").unwrap();
        assert!(java < source);
    }

    #[test]
    fn test_dependency_order_preserved() {
        let pom = MavenGenerator::new().generate(&descriptor()).unwrap();
        let guava = pom.find("guava").unwrap();
        let junit = pom.find("junit").unwrap();
        assert!(guava < junit);
    }

    #[test]
    fn test_xml_special_characters_escaped() {
        let descriptor = ModuleDescriptor::new(
            ModuleId::new("g", "n", "[1.0,2.0)").unwrap(),
            None,
            {
                let mut p = BTreeMap::new();
                p.insert("argLine".to_string(), "-Da=1 & -Db=<2>".to_string());
                p
            },
            Vec::new(),
        )
        .unwrap();

        let pom = MavenGenerator::new().generate(&descriptor).unwrap();
        assert!(pom.contains("-Da=1 &amp; -Db=&lt;2&gt;"));
    }
}
