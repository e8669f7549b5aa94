//! Minimal slide master, layout, and theme for generated presentations.
//!
//! Every slide uses the single blank layout; all visible content is placed
//! in explicit text boxes.

use crate::package::xml::XML_DECLARATION;

const PML_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#,
    r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#,
    r#" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// Empty group shape header every `<p:spTree>` starts with.
pub(super) const SP_TREE_HEADER: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
);

/// Opening tag of a slide part.
pub(super) fn slide_open() -> String {
    format!("{}<p:sld {}>", XML_DECLARATION, PML_NAMESPACES)
}

/// Closing tail of a slide part.
pub(super) const SLIDE_CLOSE: &str =
    "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>";

pub(super) fn slide_master_xml() -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("<p:sldMaster {}>", PML_NAMESPACES));
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#);
    xml.push_str(SP_TREE_HEADER);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2""#,
        r#" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
        r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
        "<p:txStyles>",
        r#"<p:titleStyle><a:lvl1pPr algn="l"><a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#,
        r#"<p:bodyStyle><a:lvl1pPr marL="228600" indent="-228600"><a:defRPr sz="2800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#,
        r#"<p:otherStyle><a:lvl1pPr><a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:otherStyle>"#,
        "</p:txStyles>",
        "</p:sldMaster>"
    ));
    xml
}

pub(super) fn slide_layout_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<p:sldLayout {} type="blank" preserve="1">"#,
        PML_NAMESPACES
    ));
    xml.push_str(r#"<p:cSld name="Blank"><p:spTree>"#);
    xml.push_str(SP_TREE_HEADER);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>");
    xml
}

pub(super) fn presentation_xml(slide_rel_ids: &[String], width: i64, height: i64) -> String {
    let mut xml = String::with_capacity(1024 + slide_rel_ids.len() * 48);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<p:presentation {} saveSubsetFonts="1">"#,
        PML_NAMESPACES
    ));
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    xml.push_str("<p:sldIdLst>");
    for (i, rel_id) in slide_rel_ids.iter().enumerate() {
        xml.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + i, rel_id));
    }
    xml.push_str("</p:sldIdLst>");
    xml.push_str(&format!(r#"<p:sldSz cx="{}" cy="{}"/>"#, width, height));
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

pub(super) fn theme_xml() -> String {
    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = format!(r#"<a:ln w="6350" cap="flat" cmpd="sng" algn="ctr">{}<a:prstDash val="solid"/></a:ln>"#, solid);
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";

    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>"#);
    xml.push_str(concat!(
        r#"<a:clrScheme name="Office">"#,
        r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
        r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
        r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#,
        r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2>"#,
        r#"<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#,
        r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#,
        r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
        "</a:clrScheme>",
        r#"<a:fontScheme name="Office">"#,
        r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
        r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
        "</a:fontScheme>",
    ));
    xml.push_str(r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#);
    xml.push_str(&solid.repeat(3));
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    xml.push_str(&line.repeat(3));
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    xml.push_str(&effect.repeat(3));
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    xml.push_str(&solid.repeat(3));
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");
    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    xml
}
