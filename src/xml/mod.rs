//! XML utilities and raw element preservation for round-trip support

mod namespace;
pub mod order;
mod raw;

pub use namespace::*;
pub use raw::{RawXmlElement, RawXmlNode};

use quick_xml::events::BytesStart;
use quick_xml::Writer;

use crate::error::Result;

/// Helper to get attribute value from BytesStart
pub fn get_attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name.as_bytes())
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Helper to get a `w:`-prefixed attribute, tolerating a missing prefix
pub fn get_w_attr(element: &BytesStart, local: &str) -> Option<String> {
    get_attr(element, &format!("w:{}", local)).or_else(|| get_attr(element, local))
}

/// Helper to get w:val attribute (common in OOXML)
pub fn get_w_val(element: &BytesStart) -> Option<String> {
    get_w_attr(element, "val")
}

/// Parse a boolean value from OOXML (handles "1", "true", "on", or missing val)
pub fn parse_bool(element: &BytesStart) -> bool {
    match get_w_val(element) {
        None => true, // No val attribute means true (e.g., <w:b/>)
        Some(v) => matches!(v.as_str(), "1" | "true" | "on"),
    }
}

/// All attributes of a start tag as owned (name, value) pairs
pub fn attributes_of(element: &BytesStart) -> Vec<(String, String)> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            (
                String::from_utf8_lossy(a.key.as_ref()).to_string(),
                String::from_utf8_lossy(&a.value).to_string(),
            )
        })
        .collect()
}

/// Strip the namespace prefix from a qualified name
pub fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Write `<name>` + schema-ordered children + `</name>`; nothing when empty
pub(crate) fn write_ordered<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    mut children: Vec<RawXmlNode>,
    order: &[&str],
) -> Result<()> {
    if children.is_empty() {
        return Ok(());
    }
    order::sort_by_schema(&mut children, order);
    let mut element = RawXmlElement::new(name);
    element.children = children;
    element.self_closing = false;
    element.write_to(writer)
}
