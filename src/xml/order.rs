//! Schema order of property children
//!
//! WordprocessingML property containers are `xsd:sequence`s, so Word rejects
//! children that appear out of order. Writers collect typed and preserved
//! children together and sort them with [`sort_by_schema`].

use crate::xml::RawXmlNode;

/// Children of `w:pPr`
pub const PARAGRAPH_PROPERTIES: &[&str] = &[
    "pStyle", "keepNext", "keepLines", "pageBreakBefore", "framePr", "widowControl", "numPr",
    "suppressLineNumbers", "pBdr", "shd", "tabs", "suppressAutoHyphens", "kinsoku", "wordWrap",
    "overflowPunct", "topLinePunct", "autoSpaceDE", "autoSpaceDN", "bidi", "adjustRightInd",
    "snapToGrid", "spacing", "ind", "contextualSpacing", "mirrorIndents", "suppressOverlap",
    "jc", "textDirection", "textAlignment", "textboxTightWrap", "outlineLvl", "divId",
    "cnfStyle", "rPr", "sectPr", "pPrChange",
];

/// Children of `w:rPr`
pub const RUN_PROPERTIES: &[&str] = &[
    "rStyle", "rFonts", "b", "bCs", "i", "iCs", "caps", "smallCaps", "strike", "dstrike",
    "outline", "shadow", "emboss", "imprint", "noProof", "snapToGrid", "vanish", "webHidden",
    "color", "spacing", "w", "kern", "position", "sz", "szCs", "highlight", "u", "effect",
    "bdr", "shd", "fitText", "vertAlign", "rtl", "cs", "em", "lang", "eastAsianLayout",
    "specVanish", "oMath", "rPrChange",
];

/// Children of `w:tcPr`
pub const CELL_PROPERTIES: &[&str] = &[
    "cnfStyle", "tcW", "gridSpan", "hMerge", "vMerge", "tcBorders", "shd", "noWrap", "tcMar",
    "textDirection", "tcFitText", "vAlign", "hideMark", "headers", "cellIns", "cellDel",
    "cellMerge", "tcPrChange",
];

/// Children of `w:sectPr`
pub const SECTION_PROPERTIES: &[&str] = &[
    "headerReference", "footerReference", "footnotePr", "endnotePr", "type", "pgSz", "pgMar",
    "paperSrc", "pgBorders", "lnNumType", "pgNumType", "cols", "formProt", "vAlign",
    "noEndnote", "titlePg", "textDirection", "bidi", "rtlGutter", "docGrid", "printerSettings",
    "sectPrChange",
];

/// Children of `w:style`
pub const STYLE: &[&str] = &[
    "name", "aliases", "basedOn", "next", "link", "autoRedefine", "hidden", "uiPriority",
    "semiHidden", "unhideWhenUsed", "qFormat", "locked", "personal", "personalCompose",
    "personalReply", "rsid", "pPr", "rPr", "tblPr", "trPr", "tcPr", "tblStylePr",
];

/// Position of a local name within a schema sequence; unknown names sort last
pub fn rank(order: &[&str], local: &str) -> usize {
    order
        .iter()
        .position(|name| *name == local)
        .unwrap_or(order.len())
}

/// Stable-sort nodes into schema order. Text, comments and foreign elements
/// keep their relative order after the known elements.
pub fn sort_by_schema(nodes: &mut [RawXmlNode], order: &[&str]) {
    nodes.sort_by_key(|node| match node.local_name() {
        Some(local) => rank(order, local),
        None => order.len(),
    });
}
