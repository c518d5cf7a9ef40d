//! Table row elements (w:tr)

use crate::error::Result;
use crate::xml::{attributes_of, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

use super::cell::TableCell;

/// Table row (w:tr)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    /// Row children in document order (cells, trPr, tblPrEx, ...)
    pub content: Vec<RowContent>,
    /// Unknown attributes (rsids, paraId, ...)
    pub unknown_attrs: Vec<(String, String)>,
}

/// Child of a row
#[derive(Clone, Debug, PartialEq)]
pub enum RowContent {
    /// Cell
    Cell(TableCell),
    /// Row properties and anything else (preserved)
    Unknown(RawXmlNode),
}

impl TableRow {
    /// Create a row from cell texts
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        let content = texts
            .into_iter()
            .map(|text| RowContent::Cell(TableCell::new(text)))
            .collect();
        TableRow {
            content,
            ..Default::default()
        }
    }

    /// Parse from reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut row = TableRow {
            unknown_attrs: attributes_of(start),
            ..Default::default()
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"tc" {
                        let cell = TableCell::from_reader(reader, &e)?;
                        row.content.push(RowContent::Cell(cell));
                    } else {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        row.content.push(RowContent::Unknown(raw.into()));
                    }
                }
                Event::Empty(e) => {
                    let raw = RawXmlElement::from_empty(&e);
                    row.content.push(RowContent::Unknown(raw.into()));
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tr" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(row)
    }

    /// Get cell count
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Iterate over cells
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.content.iter().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    /// Iterate mutably over cells
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> {
        self.content.iter_mut().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    /// Get cell at index
    pub fn cell(&self, index: usize) -> Option<&TableCell> {
        self.cells().nth(index)
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:tr");
        for (key, value) in &self.unknown_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start))?;

        for content in &self.content {
            match content {
                RowContent::Cell(cell) => cell.write_to(writer)?,
                RowContent::Unknown(node) => node.write_to(writer)?,
            }
        }

        writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
        Ok(())
    }
}
