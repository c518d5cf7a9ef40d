//! Document body and block-level content

use crate::document::{Paragraph, SectionProperties, Table};
use crate::error::Result;
use crate::xml::{RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Block-level content of a body, table cell, header or footer
#[derive(Clone, Debug, PartialEq)]
pub enum BlockContent {
    /// Paragraph
    Paragraph(Paragraph),
    /// Table
    Table(Table),
    /// Unknown element (preserved for round-trip)
    Unknown(RawXmlNode),
}

/// Document body (w:body)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
    /// Block-level content
    pub content: Vec<BlockContent>,
    /// Section properties of the last section
    pub section: Option<SectionProperties>,
}

/// Iterate over the paragraphs of a block list
pub(crate) fn paragraphs_of(content: &[BlockContent]) -> impl Iterator<Item = &Paragraph> {
    content.iter().filter_map(|c| match c {
        BlockContent::Paragraph(p) => Some(p),
        _ => None,
    })
}

/// Iterate mutably over the paragraphs of a block list
pub(crate) fn paragraphs_of_mut(
    content: &mut [BlockContent],
) -> impl Iterator<Item = &mut Paragraph> {
    content.iter_mut().filter_map(|c| match c {
        BlockContent::Paragraph(p) => Some(p),
        _ => None,
    })
}

impl Body {
    /// Parse body from XML reader (after w:body start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut body = Body::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"sectPr" {
                        body.section = Some(SectionProperties::from_reader(reader, &e)?);
                    } else {
                        body.content.push(BlockContent::from_start(reader, &e)?);
                    }
                }
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"sectPr" {
                        body.section = Some(SectionProperties::from_empty(&e));
                    } else {
                        body.content.push(BlockContent::from_empty(&e));
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"body" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(body)
    }

    /// Get all paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        paragraphs_of(&self.content)
    }

    /// Get all paragraphs mutably
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        paragraphs_of_mut(&mut self.content)
    }

    /// Get all tables
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|c| match c {
            BlockContent::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Get all tables mutably
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.content.iter_mut().filter_map(|c| match c {
            BlockContent::Table(t) => Some(t),
            _ => None,
        })
    }

    /// The first section in document order: the earliest section break
    /// carried by a paragraph, else the body's own section properties
    pub fn first_section_mut(&mut self) -> Option<&mut SectionProperties> {
        let index = self.content.iter().position(|c| match c {
            BlockContent::Paragraph(p) => {
                p.properties.as_ref().is_some_and(|props| props.section.is_some())
            }
            _ => false,
        });

        match index {
            Some(i) => match &mut self.content[i] {
                BlockContent::Paragraph(p) => p.properties.as_mut()?.section.as_mut(),
                _ => None,
            },
            None => self.section.as_mut(),
        }
    }

    /// Write body to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:body")))?;

        for content in &self.content {
            content.write_to(writer)?;
        }

        if let Some(section) = &self.section {
            section.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:body")))?;
        Ok(())
    }

    /// Add a paragraph
    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.content.push(BlockContent::Paragraph(para));
    }

    /// Add a table
    pub fn add_table(&mut self, table: Table) {
        self.content.push(BlockContent::Table(table));
    }
}

impl BlockContent {
    /// Parse the block that starts with `e`
    pub(crate) fn from_start<R: BufRead>(reader: &mut Reader<R>, e: &BytesStart) -> Result<Self> {
        Ok(match e.name().local_name().as_ref() {
            b"p" => BlockContent::Paragraph(Paragraph::from_reader(reader, e)?),
            b"tbl" => BlockContent::Table(Table::from_reader(reader, e)?),
            _ => BlockContent::Unknown(RawXmlElement::from_reader(reader, e)?.into()),
        })
    }

    /// Block for a self-closing element
    pub(crate) fn from_empty(e: &BytesStart) -> Self {
        match e.name().local_name().as_ref() {
            b"p" => BlockContent::Paragraph(Paragraph::from_empty(e)),
            _ => BlockContent::Unknown(RawXmlElement::from_empty(e).into()),
        }
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            BlockContent::Paragraph(para) => para.write_to(writer),
            BlockContent::Table(table) => table.write_to(writer),
            BlockContent::Unknown(node) => node.write_to(writer),
        }
    }
}
