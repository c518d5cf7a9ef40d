//! Table elements (w:tbl, w:tr, w:tc)

mod cell;
mod row;
mod types;

pub use cell::{TableCell, TableCellProperties};
pub use row::{RowContent, TableRow};
pub use types::{GridColumn, Shading, VMerge, VerticalAlignment};

use crate::error::Result;
use crate::xml::{get_w_attr, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Table element (w:tbl)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Table properties
    pub properties: Option<RawXmlElement>,
    /// Table grid
    pub grid: Vec<GridColumn>,
    /// Rows and interleaved elements (bookmarks, content controls), in order
    pub content: Vec<TableContent>,
}

/// Child of a table after its properties and grid
#[derive(Clone, Debug, PartialEq)]
pub enum TableContent {
    /// Row
    Row(TableRow),
    /// Unknown element (preserved)
    Unknown(RawXmlNode),
}

impl Table {
    /// Create a table from a 2D array of strings
    pub fn from_data<R, S>(data: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: Into<String> + Clone,
    {
        let content = data
            .iter()
            .map(|row| TableContent::Row(TableRow::from_texts(row.as_ref().iter().cloned())))
            .collect();

        let cols = data.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let grid = (0..cols).map(|_| GridColumn { width: None }).collect();
        let properties = RawXmlElement::new("w:tblPr").with_child(
            RawXmlElement::new("w:tblW")
                .with_attr("w:w", "0")
                .with_attr("w:type", "auto"),
        );

        Table {
            properties: Some(properties),
            grid,
            content,
        }
    }

    /// Parse from reader (after w:tbl start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, _start: &BytesStart) -> Result<Self> {
        let mut table = Table::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tblPr" => table.properties = Some(RawXmlElement::from_reader(reader, &e)?),
                    b"tblGrid" => table.grid = parse_table_grid(reader)?,
                    b"tr" => {
                        let row = TableRow::from_reader(reader, &e)?;
                        table.content.push(TableContent::Row(row));
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        table.content.push(TableContent::Unknown(raw.into()));
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"tblPr" => table.properties = Some(RawXmlElement::from_empty(&e)),
                    b"tblGrid" => {}
                    _ => {
                        let raw = RawXmlElement::from_empty(&e);
                        table.content.push(TableContent::Unknown(raw.into()));
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tbl" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.content.iter().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            _ => None,
        })
    }

    /// Iterate mutably over rows
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut TableRow> {
        self.content.iter_mut().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            _ => None,
        })
    }

    /// Get row count
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Get row by index
    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows().nth(index)
    }

    /// Get cell at position
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.row(row)?.cell(col)
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:tbl")))?;

        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }

        writer.write_event(Event::Start(BytesStart::new("w:tblGrid")))?;
        for col in &self.grid {
            let mut elem = BytesStart::new("w:gridCol");
            if let Some(w) = col.width {
                elem.push_attribute(("w:w", w.to_string().as_str()));
            }
            writer.write_event(Event::Empty(elem))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:tblGrid")))?;

        for content in &self.content {
            match content {
                TableContent::Row(row) => row.write_to(writer)?,
                TableContent::Unknown(node) => node.write_to(writer)?,
            }
        }

        writer.write_event(Event::End(BytesEnd::new("w:tbl")))?;
        Ok(())
    }
}

/// Parse table grid
fn parse_table_grid<R: BufRead>(reader: &mut Reader<R>) -> Result<Vec<GridColumn>> {
    let mut columns = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) => {
                if e.name().local_name().as_ref() == b"gridCol" {
                    let width = get_w_attr(&e, "w").and_then(|v| v.parse().ok());
                    columns.push(GridColumn { width });
                }
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"tblGrid" {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(columns)
}
