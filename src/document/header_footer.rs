//! Header and footer parts (w:hdr, w:ftr)

use crate::document::body::{paragraphs_of, paragraphs_of_mut};
use crate::document::{BlockContent, Paragraph};
use crate::error::{Error, Result};
use crate::opc::{rel_types, FOOTER, HEADER};
use crate::xml::{self, attributes_of};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Which of the two page regions a part describes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderFooterKind {
    Header,
    Footer,
}

impl HeaderFooterKind {
    /// Root element name
    pub fn root_tag(&self) -> &'static str {
        match self {
            HeaderFooterKind::Header => "w:hdr",
            HeaderFooterKind::Footer => "w:ftr",
        }
    }

    /// Local name of the reference element in `w:sectPr`
    pub fn reference_tag(&self) -> &'static str {
        match self {
            HeaderFooterKind::Header => "headerReference",
            HeaderFooterKind::Footer => "footerReference",
        }
    }

    /// Relationship type from the main document part
    pub fn relationship_type(&self) -> &'static str {
        match self {
            HeaderFooterKind::Header => rel_types::HEADER,
            HeaderFooterKind::Footer => rel_types::FOOTER,
        }
    }

    /// Content type of the part
    pub fn content_type(&self) -> &'static str {
        match self {
            HeaderFooterKind::Header => HEADER,
            HeaderFooterKind::Footer => FOOTER,
        }
    }

    /// Paragraph style Word gives new header/footer paragraphs
    pub fn paragraph_style(&self) -> &'static str {
        match self {
            HeaderFooterKind::Header => "Header",
            HeaderFooterKind::Footer => "Footer",
        }
    }

    /// File stem for new parts ("header" gives header1.xml, header2.xml, ...)
    pub fn file_stem(&self) -> &'static str {
        match self {
            HeaderFooterKind::Header => "header",
            HeaderFooterKind::Footer => "footer",
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        self.file_stem()
    }
}

/// A parsed header or footer part
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderFooter {
    kind: HeaderFooterKind,
    /// Namespace declarations and other root attributes
    root_attrs: Vec<(String, String)>,
    /// Block content
    pub content: Vec<BlockContent>,
}

impl HeaderFooter {
    /// New part holding one empty paragraph in the Header/Footer style
    pub fn new(kind: HeaderFooterKind) -> Self {
        let mut paragraph = Paragraph::default();
        paragraph.set_style(kind.paragraph_style());
        HeaderFooter {
            kind,
            root_attrs: xml::owned(xml::minimal_document_namespaces()),
            content: vec![BlockContent::Paragraph(paragraph)],
        }
    }

    /// Parse a header or footer part
    pub fn from_xml(kind: HeaderFooterKind, xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();

        let root = loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => break e.into_owned(),
                Event::Empty(e) => {
                    return Ok(HeaderFooter {
                        kind,
                        root_attrs: attributes_of(&e),
                        content: Vec::new(),
                    })
                }
                Event::Eof => {
                    return Err(Error::InvalidDocument(format!(
                        "{} part has no root element",
                        kind.name()
                    )))
                }
                _ => {}
            }
            buf.clear();
        };

        let expected = xml::local_name(kind.root_tag());
        if root.name().local_name().as_ref() != expected.as_bytes() {
            return Err(Error::InvalidDocument(format!(
                "expected <{}> as {} root",
                kind.root_tag(),
                kind.name()
            )));
        }

        let mut content = Vec::new();
        loop {
            buf.clear();
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => content.push(BlockContent::from_start(&mut reader, &e)?),
                Event::Empty(e) => content.push(BlockContent::from_empty(&e)),
                Event::End(_) | Event::Eof => break,
                _ => {}
            }
        }

        Ok(HeaderFooter {
            kind,
            root_attrs: attributes_of(&root),
            content,
        })
    }

    /// Serialize the part
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut start = BytesStart::new(self.kind.root_tag());
        for (key, value) in &self.root_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start))?;
        for block in &self.content {
            block.write_to(&mut writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.kind.root_tag())))?;

        String::from_utf8(writer.into_inner()).map_err(|e| Error::from(e.utf8_error()))
    }

    /// Header or footer
    pub fn kind(&self) -> HeaderFooterKind {
        self.kind
    }

    /// Direct paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        paragraphs_of(&self.content)
    }

    /// Direct paragraphs, mutably
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        paragraphs_of_mut(&mut self.content)
    }

    /// First direct paragraph
    pub fn first_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        self.paragraphs_mut().next()
    }

    /// Append a paragraph after the existing content
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.content.push(BlockContent::Paragraph(paragraph));
    }

    /// Text of all paragraphs, one per line
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
