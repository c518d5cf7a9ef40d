//! Document model - high-level API for DOCX documents

mod body;
mod header_footer;
mod paragraph;
mod run;
mod section;
mod styles;
mod table;

pub use body::{BlockContent, Body};
pub use header_footer::{HeaderFooter, HeaderFooterKind};
pub use paragraph::{
    Hyperlink, LineSpacing, Paragraph, ParagraphAlignment, ParagraphContent, ParagraphProperties,
    Spacing,
};
pub use run::{BreakType, FieldCharType, Run, RunContent, RunFonts, RunProperties};
pub use section::{SectionProperties, TWIPS_PER_CM};
pub use styles::{Style, Styles};
pub use table::{
    GridColumn, RowContent, Shading, Table, TableCell, TableCellProperties, TableContent,
    TableRow, VMerge, VerticalAlignment,
};

use crate::error::{Error, Result};
use crate::opc::{rel_types, well_known, Package, Part, PartUri, MAIN_DOCUMENT, STYLES};
use crate::xml::{self, attributes_of, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

/// A DOCX document
#[derive(Debug)]
pub struct Document {
    /// Underlying OPC package
    package: Package,
    /// Main document part
    document_uri: PartUri,
    /// Attributes of `w:document` (namespace declarations, mc:Ignorable)
    root_attrs: Vec<(String, String)>,
    /// Children of `w:document` other than the body (w:background)
    preamble: Vec<RawXmlNode>,
    /// Parsed document body
    body: Body,
    /// Style registry and the part it lives in
    styles: Option<(PartUri, Styles)>,
    /// Header and footer parts parsed or created so far
    section_parts: BTreeMap<PartUri, HeaderFooter>,
}

/// Parsed content of the main document part
struct MainPart {
    root_attrs: Vec<(String, String)>,
    preamble: Vec<RawXmlNode>,
    body: Body,
}

impl Document {
    /// Open a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let package = Package::open(path)?;
        Self::from_package(package)
    }

    /// Open a document from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = Package::from_bytes(bytes)?;
        Self::from_package(package)
    }

    /// Create document from an OPC package
    fn from_package(package: Package) -> Result<Self> {
        let document_uri = package
            .main_document_uri()
            .ok_or_else(|| Error::MissingPart("Main document relationship not found".into()))?;
        let doc_part = package
            .part(&document_uri)
            .ok_or_else(|| Error::MissingPart(document_uri.to_string()))?;

        let main = parse_document_xml(doc_part.data_as_str()?)?;

        let styles = match doc_part
            .relationships()
            .and_then(|rels| rels.by_type(rel_types::STYLES))
        {
            Some(rel) => {
                let uri = document_uri.resolve(&rel.target)?;
                match package.part(&uri) {
                    Some(part) => Some((uri, Styles::from_xml(part.data_as_str()?)?)),
                    None => {
                        log::warn!("Styles relationship points at missing part {}", uri);
                        None
                    }
                }
            }
            None => None,
        };

        Ok(Self {
            package,
            document_uri,
            root_attrs: main.root_attrs,
            preamble: main.preamble,
            body: main.body,
            styles,
            section_parts: BTreeMap::new(),
        })
    }

    /// Create a new empty document with a single letter-size section
    pub fn new() -> Self {
        let document_uri = well_known::document();
        let mut package = Package::new();
        package.add_part(Part::new(document_uri.clone(), MAIN_DOCUMENT, Vec::new()));
        package.add_relationship(rel_types::OFFICE_DOCUMENT, document_uri.zip_path());

        Self {
            package,
            document_uri,
            root_attrs: xml::owned(xml::document_namespaces()),
            preamble: Vec::new(),
            body: Body {
                content: Vec::new(),
                section: Some(SectionProperties::default_letter()),
            },
            styles: None,
            section_parts: BTreeMap::new(),
        }
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.update_package()?;
        self.package.save(path)
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.update_package()?;
        self.package.to_bytes()
    }

    /// Write the parsed parts back into the package
    fn update_package(&mut self) -> Result<()> {
        let xml = self.serialize_document_xml()?;
        let document_uri = self.document_uri.clone();
        self.package_part_mut(&document_uri)?
            .set_data(xml.into_bytes());

        if let Some((uri, styles)) = &self.styles {
            let xml = styles.to_xml()?;
            match self.package.part_mut(uri) {
                Some(part) => part.set_data(xml.into_bytes()),
                None => return Err(Error::MissingPart(uri.to_string())),
            }
        }

        for (uri, section_part) in &self.section_parts {
            let xml = section_part.to_xml()?;
            match self.package.part_mut(uri) {
                Some(part) => part.set_data(xml.into_bytes()),
                None => return Err(Error::MissingPart(uri.to_string())),
            }
        }

        Ok(())
    }

    fn package_part_mut(&mut self, uri: &PartUri) -> Result<&mut Part> {
        self.package
            .part_mut(uri)
            .ok_or_else(|| Error::MissingPart(uri.to_string()))
    }

    fn serialize_document_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut start = BytesStart::new("w:document");
        for (key, value) in &self.root_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start))?;
        for node in &self.preamble {
            node.write_to(&mut writer)?;
        }
        self.body.write_to(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("w:document")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| Error::from(e.utf8_error()))
    }

    /// Get all body paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.paragraphs()
    }

    /// Get all body paragraphs mutably
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.body.paragraphs_mut()
    }

    /// Get paragraph count
    pub fn paragraph_count(&self) -> usize {
        self.body.paragraphs().count()
    }

    /// Get paragraph by index
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.body.paragraphs().nth(index)
    }

    /// Get all tables
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.tables()
    }

    /// Get all tables mutably
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.body.tables_mut()
    }

    /// Get table count
    pub fn table_count(&self) -> usize {
        self.body.tables().count()
    }

    /// Get table by index
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.body.tables().nth(index)
    }

    /// Get all text in the document body
    pub fn text(&self) -> String {
        self.body
            .paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get the underlying package
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Get body
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Get mutable body
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Append a paragraph to the body
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.add_paragraph(paragraph);
    }

    /// Append a table to the body
    pub fn add_table(&mut self, table: Table) {
        self.body.add_table(table);
    }

    /// The style registry, if the document has one
    pub fn styles(&self) -> Option<&Styles> {
        self.styles.as_ref().map(|(_, styles)| styles)
    }

    /// The style registry, creating the styles part when the document lacks one
    pub fn styles_mut(&mut self) -> Result<&mut Styles> {
        if self.styles.is_none() {
            let created = self.create_styles_part()?;
            self.styles = Some(created);
        }
        match &mut self.styles {
            Some((_, styles)) => Ok(styles),
            None => Err(Error::MissingPart(well_known::styles().to_string())),
        }
    }

    fn create_styles_part(&mut self) -> Result<(PartUri, Styles)> {
        let uri = match self.document_uri.sibling("styles.xml") {
            Ok(uri) if self.package.part(&uri).is_none() => uri,
            _ => self.package.next_part_uri(&self.document_uri, "styles", "xml")?,
        };
        let styles = Styles::new();

        let part = Part::new(uri.clone(), STYLES, styles.to_xml()?.into_bytes());
        self.package
            .add_related_part(&self.document_uri, part, rel_types::STYLES)?;

        log::warn!("Document has no styles part, created {}", uri);
        Ok((uri, styles))
    }

    /// Properties of the first section in document order
    pub fn section_mut(&mut self) -> Result<&mut SectionProperties> {
        self.body.first_section_mut().ok_or(Error::MissingSection)
    }

    /// The default header or footer of the first section.
    ///
    /// A section without one gets a new part holding a single empty
    /// paragraph, linked from the main document part.
    pub fn section_part_mut(&mut self, kind: HeaderFooterKind) -> Result<&mut HeaderFooter> {
        let uri = self.section_part_uri(kind)?;

        match self.section_parts.entry(uri) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let part = self
                    .package
                    .part(entry.key())
                    .ok_or_else(|| Error::MissingPart(entry.key().to_string()))?;
                let parsed = HeaderFooter::from_xml(kind, part.data_as_str()?)?;
                Ok(entry.insert(parsed))
            }
        }
    }

    fn section_part_uri(&mut self, kind: HeaderFooterKind) -> Result<PartUri> {
        let r_id = self.section_mut()?.reference(kind).map(str::to_string);

        if let Some(r_id) = r_id {
            let doc_part = self
                .package
                .part(&self.document_uri)
                .ok_or_else(|| Error::MissingPart(self.document_uri.to_string()))?;
            match doc_part.related_uri(&r_id) {
                Some(uri) if self.package.part(&uri).is_some() => return Ok(uri),
                _ => log::warn!(
                    "Default {} reference {} does not resolve to a part",
                    kind.name(),
                    r_id
                ),
            }
        }

        self.create_section_part(kind)
    }

    fn create_section_part(&mut self, kind: HeaderFooterKind) -> Result<PartUri> {
        let uri = self
            .package
            .next_part_uri(&self.document_uri, kind.file_stem(), "xml")?;
        let section_part = HeaderFooter::new(kind);

        let part = Part::new(
            uri.clone(),
            kind.content_type(),
            section_part.to_xml()?.into_bytes(),
        );
        let r_id = self
            .package
            .add_related_part(&self.document_uri, part, kind.relationship_type())?;
        self.section_mut()?.set_reference(kind, &r_id);
        self.section_parts.insert(uri.clone(), section_part);

        log::warn!("First section has no default {}, created {}", kind.name(), uri);
        Ok(uri)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse document.xml content
fn parse_document_xml(xml: &str) -> Result<MainPart> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut root_attrs = None;
    let mut preamble = Vec::new();
    let mut body = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"document" if root_attrs.is_none() => root_attrs = Some(attributes_of(&e)),
                b"body" => body = Some(Body::from_reader(&mut reader)?),
                _ => preamble.push(RawXmlElement::from_reader(&mut reader, &e)?.into()),
            },
            Event::Empty(e) => match e.name().local_name().as_ref() {
                b"document" => root_attrs = Some(attributes_of(&e)),
                b"body" => body = Some(Body::default()),
                _ => preamble.push(RawXmlElement::from_empty(&e).into()),
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let root_attrs =
        root_attrs.ok_or_else(|| Error::InvalidDocument("Missing w:document element".into()))?;
    let body = body.ok_or_else(|| Error::InvalidDocument("Missing w:body element".into()))?;

    Ok(MainPart {
        root_attrs,
        preamble,
        body,
    })
}
