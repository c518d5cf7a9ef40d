//! Section properties (w:sectPr)

use crate::document::HeaderFooterKind;
use crate::error::Result;
use crate::xml::order::{sort_by_schema, SECTION_PROPERTIES};
use crate::xml::RawXmlElement;
use quick_xml::events::BytesStart;
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Twips per centimetre
pub const TWIPS_PER_CM: u32 = 567;

/// Section properties, kept as a raw element with typed accessors for the
/// pieces the formatter touches
#[derive(Clone, Debug, PartialEq)]
pub struct SectionProperties {
    element: RawXmlElement,
}

impl SectionProperties {
    /// Parse from reader (after w:sectPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        Ok(Self {
            element: RawXmlElement::from_reader(reader, start)?,
        })
    }

    /// Create from empty element
    pub fn from_empty(start: &BytesStart) -> Self {
        Self {
            element: RawXmlElement::from_empty(start),
        }
    }

    /// US Letter page, 1" margins, half-inch header/footer distance
    pub fn default_letter() -> Self {
        let element = RawXmlElement::new("w:sectPr")
            .with_child(
                RawXmlElement::new("w:pgSz")
                    .with_attr("w:w", "12240")
                    .with_attr("w:h", "15840"),
            )
            .with_child(default_page_margins())
            .with_child(RawXmlElement::new("w:cols").with_attr("w:space", "720"))
            .with_child(RawXmlElement::new("w:docGrid").with_attr("w:linePitch", "360"));
        Self { element }
    }

    /// Relationship ID of the default header or footer
    pub fn reference(&self, kind: HeaderFooterKind) -> Option<&str> {
        self.element
            .elements()
            .filter(|e| e.local_name() == kind.reference_tag())
            .find(|e| e.attr("w:type").unwrap_or("default") == "default")
            .and_then(|e| e.attr("r:id"))
    }

    /// Point the default header or footer at `r_id`
    pub fn set_reference(&mut self, kind: HeaderFooterKind, r_id: &str) {
        let existing = self
            .element
            .elements_mut()
            .filter(|e| e.local_name() == kind.reference_tag())
            .find(|e| e.attr("w:type").unwrap_or("default") == "default");

        match existing {
            Some(reference) => reference.set_attr("r:id", r_id),
            None => {
                let reference = RawXmlElement::new(format!("w:{}", kind.reference_tag()))
                    .with_attr("w:type", "default")
                    .with_attr("r:id", r_id);
                self.element.push_child(reference);
                sort_by_schema(&mut self.element.children, SECTION_PROPERTIES);
            }
        }
    }

    /// Distance from the top edge to the header, in twips
    pub fn header_distance(&self) -> Option<u32> {
        self.margin("w:header")
    }

    /// Distance from the bottom edge to the footer, in twips
    pub fn footer_distance(&self) -> Option<u32> {
        self.margin("w:footer")
    }

    /// Set the header distance, in twips
    pub fn set_header_distance(&mut self, twips: u32) {
        self.with_page_margins(|pg| pg.set_attr("w:header", twips.to_string()));
    }

    /// Set the footer distance, in twips
    pub fn set_footer_distance(&mut self, twips: u32) {
        self.with_page_margins(|pg| pg.set_attr("w:footer", twips.to_string()));
    }

    fn margin(&self, attr: &str) -> Option<u32> {
        self.element.child("pgMar")?.attr(attr)?.parse().ok()
    }

    fn with_page_margins(&mut self, f: impl FnOnce(&mut RawXmlElement)) {
        match self.element.child_mut("pgMar") {
            Some(pg_mar) => f(pg_mar),
            None => {
                let mut pg_mar = default_page_margins();
                f(&mut pg_mar);
                self.element.push_child(pg_mar);
                sort_by_schema(&mut self.element.children, SECTION_PROPERTIES);
            }
        }
    }

    /// The underlying element with children in schema order
    pub fn to_element(&self) -> RawXmlElement {
        let mut element = self.element.clone();
        sort_by_schema(&mut element.children, SECTION_PROPERTIES);
        element
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        self.to_element().write_to(writer)
    }
}

fn default_page_margins() -> RawXmlElement {
    RawXmlElement::new("w:pgMar")
        .with_attr("w:top", "1440")
        .with_attr("w:right", "1440")
        .with_attr("w:bottom", "1440")
        .with_attr("w:left", "1440")
        .with_attr("w:header", "720")
        .with_attr("w:footer", "720")
        .with_attr("w:gutter", "0")
}
