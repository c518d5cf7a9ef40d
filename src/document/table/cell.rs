//! Table cell elements (w:tc, w:tcPr)

use crate::document::body::{paragraphs_of, paragraphs_of_mut};
use crate::document::{BlockContent, Paragraph};
use crate::error::Result;
use crate::xml::order::CELL_PROPERTIES;
use crate::xml::{attributes_of, get_w_val, write_ordered, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

use super::types::{Shading, VMerge, VerticalAlignment};

/// Table cell (w:tc)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCell {
    /// Cell properties
    pub properties: Option<TableCellProperties>,
    /// Cell content (paragraphs, nested tables, ...)
    pub content: Vec<BlockContent>,
    /// Unknown attributes (preserved)
    pub unknown_attrs: Vec<(String, String)>,
}

/// Table cell properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCellProperties {
    /// Grid span (horizontal merge)
    pub grid_span: Option<u32>,
    /// Vertical merge
    pub v_merge: Option<VMerge>,
    /// Background shading
    pub shading: Option<Shading>,
    /// Vertical alignment
    pub v_align: Option<String>,
    /// Unknown children (preserved)
    pub unknown_children: Vec<RawXmlNode>,
}

impl TableCell {
    /// Create a new cell with text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let paragraph = if text.is_empty() {
            Paragraph::default()
        } else {
            Paragraph::new(text)
        };
        TableCell {
            content: vec![BlockContent::Paragraph(paragraph)],
            ..Default::default()
        }
    }

    /// Parse from reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut cell = TableCell {
            unknown_attrs: attributes_of(start),
            ..Default::default()
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"tcPr" {
                        cell.properties = Some(TableCellProperties::from_reader(reader)?);
                    } else {
                        cell.content.push(BlockContent::from_start(reader, &e)?);
                    }
                }
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"tcPr" {
                        cell.properties = Some(TableCellProperties::default());
                    } else {
                        cell.content.push(BlockContent::from_empty(&e));
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tc" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(cell)
    }

    /// Get cell text (paragraphs joined by newlines)
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Iterate over direct paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        paragraphs_of(&self.content)
    }

    /// Iterate mutably over direct paragraphs
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        paragraphs_of_mut(&mut self.content)
    }

    /// Mutable cell properties, created if missing
    pub fn properties_mut(&mut self) -> &mut TableCellProperties {
        self.properties.get_or_insert_with(Default::default)
    }

    /// Get vertical alignment
    pub fn vertical_alignment(&self) -> Option<VerticalAlignment> {
        self.properties
            .as_ref()?
            .v_align
            .as_deref()
            .map(VerticalAlignment::parse)
    }

    /// Set vertical alignment
    pub fn set_vertical_alignment(&mut self, align: VerticalAlignment) {
        self.properties_mut().v_align = Some(align.as_str().to_string());
    }

    /// Get background shading
    pub fn shading(&self) -> Option<&Shading> {
        self.properties.as_ref()?.shading.as_ref()
    }

    /// Set background shading, replacing any existing one
    pub fn set_shading(&mut self, shading: Shading) {
        self.properties_mut().shading = Some(shading);
    }

    /// Get grid span (horizontal merge count)
    pub fn grid_span(&self) -> Option<u32> {
        self.properties.as_ref()?.grid_span
    }

    /// Get vertical merge status
    pub fn v_merge(&self) -> Option<&VMerge> {
        self.properties.as_ref()?.v_merge.as_ref()
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:tc");
        for (key, value) in &self.unknown_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start))?;

        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }

        // A cell must end with a paragraph
        let ends_with_paragraph = matches!(self.content.last(), Some(BlockContent::Paragraph(_)));
        for content in &self.content {
            content.write_to(writer)?;
        }
        if !ends_with_paragraph {
            writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:tc")))?;
        Ok(())
    }
}

impl TableCellProperties {
    /// Parse from reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = TableCellProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let raw = RawXmlElement::from_reader(reader, &e)?;
                    if raw.local_name() == "shd" {
                        props.shading = Some(Shading::from_start(&e));
                    } else {
                        props.unknown_children.push(raw.into());
                    }
                }
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"gridSpan" => props.grid_span = get_w_val(&e).and_then(|v| v.parse().ok()),
                    b"vMerge" => {
                        props.v_merge = Some(match get_w_val(&e).as_deref() {
                            Some("restart") => VMerge::Restart,
                            _ => VMerge::Continue,
                        });
                    }
                    b"shd" => props.shading = Some(Shading::from_start(&e)),
                    b"vAlign" => props.v_align = get_w_val(&e),
                    _ => {
                        props
                            .unknown_children
                            .push(RawXmlElement::from_empty(&e).into());
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tcPr" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(props)
    }

    fn child_nodes(&self) -> Vec<RawXmlNode> {
        let mut nodes: Vec<RawXmlNode> = Vec::new();
        if let Some(span) = self.grid_span {
            nodes.push(
                RawXmlElement::new("w:gridSpan")
                    .with_attr("w:val", span.to_string())
                    .into(),
            );
        }
        if let Some(v_merge) = &self.v_merge {
            let elem = RawXmlElement::new("w:vMerge");
            nodes.push(match v_merge {
                VMerge::Restart => elem.with_attr("w:val", "restart").into(),
                VMerge::Continue => elem.into(),
            });
        }
        if let Some(shading) = &self.shading {
            nodes.push(shading.to_element().into());
        }
        if let Some(v_align) = &self.v_align {
            nodes.push(RawXmlElement::new("w:vAlign").with_attr("w:val", v_align).into());
        }
        nodes.extend(self.unknown_children.iter().cloned());
        nodes
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let nodes = self.child_nodes();
        if nodes.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("w:tcPr")))?;
            return Ok(());
        }
        write_ordered(writer, "w:tcPr", nodes, CELL_PROPERTIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Table;
    use pretty_assertions::assert_eq;

    fn parse_cell(xml: &str) -> TableCell {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        loop {
            if let Event::Start(e) = reader.read_event_into(&mut buf).unwrap() {
                return TableCell::from_reader(&mut reader, &e.into_owned()).unwrap();
            }
        }
    }

    fn write_cell(cell: &TableCell) -> String {
        let mut writer = Writer::new(Vec::new());
        cell.write_to(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_nested_table_keeps_position() {
        let xml = r#"<w:tc><w:tcPr><w:tcW w:w="2000" w:type="dxa"/></w:tcPr><w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tblPr/><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl><w:p/></w:tc>"#;
        let cell = parse_cell(xml);

        assert!(matches!(cell.content[1], BlockContent::Table(_)));
        assert_eq!(cell.paragraphs().count(), 2);
        assert_eq!(cell.text(), "before\n");
    }

    #[test]
    fn test_shading_and_alignment_in_schema_order() {
        let mut cell = parse_cell(
            r#"<w:tc><w:tcPr><w:tcW w:w="2000" w:type="dxa"/><w:tcBorders><w:top w:val="single"/></w:tcBorders><w:noWrap/></w:tcPr><w:p/></w:tc>"#,
        );
        cell.set_vertical_alignment(VerticalAlignment::Center);
        cell.set_shading(Shading::solid("D9D9D9"));

        assert_eq!(
            write_cell(&cell),
            r#"<w:tc><w:tcPr><w:tcW w:w="2000" w:type="dxa"/><w:tcBorders><w:top w:val="single"/></w:tcBorders><w:shd w:val="clear" w:color="auto" w:fill="D9D9D9"/><w:noWrap/><w:vAlign w:val="center"/></w:tcPr><w:p/></w:tc>"#
        );
    }

    #[test]
    fn test_shading_replaces_theme_fill() {
        let mut cell = parse_cell(
            r#"<w:tc><w:tcPr><w:shd w:val="clear" w:color="auto" w:fill="FFFFFF" w:themeFill="background1"/></w:tcPr><w:p/></w:tc>"#,
        );
        assert_eq!(cell.shading().map(|s| s.fill.as_str()), Some("FFFFFF"));

        cell.set_shading(Shading::solid("D9D9D9"));

        let xml = write_cell(&cell);
        assert_eq!(xml.matches("<w:shd").count(), 1);
        assert!(!xml.contains("themeFill"));
    }

    #[test]
    fn test_cell_without_paragraph_gets_one() {
        let mut cell = TableCell::default();
        cell.content
            .push(BlockContent::Table(Table::from_data(&[["x"]])));

        assert!(write_cell(&cell).ends_with("</w:tbl><w:p/></w:tc>"));
    }
}
