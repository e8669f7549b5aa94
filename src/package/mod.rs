//! OPC package writing.
//!
//! Both docx and pptx files are Open Packaging Conventions containers: a
//! ZIP archive holding `[Content_Types].xml`, package relationships, and
//! the XML parts with their own relationship files. The renderers build
//! an [`OpcPackage`] in memory and serialize it in one step, so a failed
//! render never produces partial output.

pub mod constants;
mod properties;
pub(crate) mod xml;

pub use properties::CoreProperties;

use crate::error::Result;
use constants::content_type as ct;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use xml::{escape_xml, XML_DECLARATION};
use zip::write::SimpleFileOptions;

/// A relationship from a source part (or the package) to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target reference, relative to the source part's directory
    pub target: String,
}

/// An ordered set of relationships with sequential IDs.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty relationship set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its assigned ID.
    pub fn add(&mut self, rel_type: &str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.into(),
        });
        id
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Iterate relationships in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Serialize to a `.rels` part.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for rel in &self.rels {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                escape_xml(&rel.id),
                escape_xml(&rel.rel_type),
                escape_xml(&rel.target)
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// A single part in the package.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part name without the leading slash (e.g., "word/document.xml")
    pub name: String,
    /// Content type of the part
    pub content_type: String,
    /// Serialized part content
    pub data: Vec<u8>,
}

impl Part {
    /// File extension of the part name.
    pub fn ext(&self) -> &str {
        self.name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }
}

/// In-memory OPC package.
#[derive(Debug, Default)]
pub struct OpcPackage {
    parts: Vec<Part>,
    package_rels: Relationships,
    part_rels: BTreeMap<String, Relationships>,
}

impl OpcPackage {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part.
    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        content_type: &str,
        data: impl Into<Vec<u8>>,
    ) {
        self.parts.push(Part {
            name: name.into(),
            content_type: content_type.to_string(),
            data: data.into(),
        });
    }

    /// Add a package-level relationship (written to `_rels/.rels`).
    pub fn add_package_rel(&mut self, rel_type: &str, target: impl Into<String>) -> String {
        self.package_rels.add(rel_type, target)
    }

    /// Attach a relationship set to a part.
    pub fn set_part_rels(&mut self, part_name: impl Into<String>, rels: Relationships) {
        self.part_rels.insert(part_name.into(), rels);
    }

    /// Parts in insertion order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Find a part by name.
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Build `[Content_Types].xml`.
    ///
    /// `rels` and plain `xml` parts are covered by defaults; every other
    /// part gets an override keyed by its part name.
    pub fn content_types_xml(&self) -> Result<String> {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels", ct::OPC_RELATIONSHIPS);
        defaults.insert("xml", ct::XML);

        let mut overrides = BTreeMap::new();
        for part in &self.parts {
            if defaults.get(part.ext()) != Some(&part.content_type.as_str()) {
                overrides.insert(format!("/{}", part.name), part.content_type.as_str());
            }
        }

        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        for (ext, content_type) in &defaults {
            write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            )?;
        }
        for (partname, content_type) in &overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            )?;
        }
        xml.push_str("</Types>");
        Ok(xml)
    }

    /// Serialize the package to ZIP bytes.
    ///
    /// Entry timestamps are fixed so identical content yields identical bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(self.content_types_xml()?.as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(self.package_rels.to_xml()?.as_bytes())?;

        for part in &self.parts {
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.data)?;

            if let Some(rels) = self.part_rels.get(&part.name) {
                zip.start_file(rels_name(&part.name), options)?;
                zip.write_all(rels.to_xml()?.as_bytes())?;
            }
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Relationship part name for a part, e.g. `word/_rels/document.xml.rels`.
fn rels_name(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_name),
    }
}
