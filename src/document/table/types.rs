//! Table-related types and enums

use crate::xml::{attributes_of, local_name, RawXmlElement};
use quick_xml::events::BytesStart;

/// Grid column definition
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridColumn {
    /// Width in twips
    pub width: Option<i32>,
}

/// Vertical merge type
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VMerge {
    /// Start of a new vertical merge group
    Restart,
    /// Continuation of a vertical merge
    Continue,
}

/// Vertical alignment for table cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// Top aligned (default)
    #[default]
    Top,
    /// Center aligned
    Center,
    /// Bottom aligned
    Bottom,
}

impl VerticalAlignment {
    /// Parse from OOXML string value
    pub fn parse(s: &str) -> Self {
        match s {
            "center" => VerticalAlignment::Center,
            "bottom" => VerticalAlignment::Bottom,
            _ => VerticalAlignment::Top,
        }
    }

    /// Convert to OOXML string value
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
        }
    }
}

/// Background shading (w:shd)
#[derive(Clone, Debug, PartialEq)]
pub struct Shading {
    /// Pattern (`clear` for a solid fill)
    pub pattern: String,
    /// Pattern color
    pub color: String,
    /// Fill color (RGB hex)
    pub fill: String,
    /// Theme attributes and the like
    pub other_attrs: Vec<(String, String)>,
}

impl Shading {
    /// Solid background fill
    pub fn solid(fill: impl Into<String>) -> Self {
        Shading {
            pattern: "clear".into(),
            color: "auto".into(),
            fill: fill.into(),
            other_attrs: Vec::new(),
        }
    }

    pub(crate) fn from_start(e: &BytesStart) -> Self {
        let mut shading = Shading::solid("auto");
        for (key, value) in attributes_of(e) {
            match local_name(&key) {
                "val" => shading.pattern = value,
                "color" => shading.color = value,
                "fill" => shading.fill = value,
                _ => shading.other_attrs.push((key, value)),
            }
        }
        shading
    }

    pub(crate) fn to_element(&self) -> RawXmlElement {
        let mut elem = RawXmlElement::new("w:shd")
            .with_attr("w:val", &self.pattern)
            .with_attr("w:color", &self.color)
            .with_attr("w:fill", &self.fill);
        elem.attributes.extend(self.other_attrs.iter().cloned());
        elem
    }
}
