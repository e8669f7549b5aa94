//! Core and extended document properties (`docProps/`).

use super::constants::{content_type as ct, relationship_type as rt};
use super::xml::{escape_xml, XML_DECLARATION};
use super::OpcPackage;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

/// Application name written to `docProps/app.xml`.
const APPLICATION: &str = "docexport";

/// Core document properties.
#[derive(Debug, Clone)]
pub struct CoreProperties {
    /// Document title
    pub title: String,
    /// Creation and modification time
    pub created: DateTime<Utc>,
}

impl CoreProperties {
    /// Create properties for a document.
    pub fn new(title: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            created,
        }
    }

    fn core_xml(&self) -> Result<String> {
        let stamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut xml = String::with_capacity(768);
        xml.push_str(XML_DECLARATION);
        xml.push_str(concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
            r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
            r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
        ));
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(&self.title))?;
        write!(xml, "<dc:creator>{}</dc:creator>", APPLICATION)?;
        write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            stamp
        )?;
        write!(
            xml,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            stamp
        )?;
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    fn app_xml(&self) -> String {
        format!(
            concat!(
                "{}",
                r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties""#,
                r#" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
                "<Application>{}</Application></Properties>"
            ),
            XML_DECLARATION, APPLICATION
        )
    }

    /// Add `docProps/core.xml` and `docProps/app.xml` with their package
    /// relationships.
    pub fn write_to(&self, package: &mut OpcPackage) -> Result<()> {
        package.add_part("docProps/core.xml", ct::OPC_CORE_PROPERTIES, self.core_xml()?);
        package.add_part("docProps/app.xml", ct::OFC_EXTENDED_PROPERTIES, self.app_xml());
        package.add_package_rel(rt::CORE_PROPERTIES, "docProps/core.xml");
        package.add_package_rel(rt::EXTENDED_PROPERTIES, "docProps/app.xml");
        Ok(())
    }
}
