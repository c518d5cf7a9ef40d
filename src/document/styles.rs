//! Style definitions part (word/styles.xml)

use crate::document::RunProperties;
use crate::error::{Error, Result};
use crate::xml::order::{rank, STYLE};
use crate::xml::{self, attributes_of, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// The document's style registry
#[derive(Clone, Debug, PartialEq)]
pub struct Styles {
    root_attrs: Vec<(String, String)>,
    /// docDefaults, latentStyles and other non-style children
    pub preamble: Vec<RawXmlNode>,
    /// Style definitions
    pub styles: Vec<Style>,
}

/// A style definition (w:style)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// type, styleId, default, customStyle
    pub attributes: Vec<(String, String)>,
    /// Run properties
    pub run_properties: Option<RunProperties>,
    /// Everything else (name, basedOn, pPr, ...)
    pub unknown_children: Vec<RawXmlNode>,
}

impl Style {
    /// Paragraph style with the given id and display name
    pub fn paragraph(id: &str, name: &str) -> Self {
        Style {
            attributes: vec![
                ("w:type".into(), "paragraph".into()),
                ("w:styleId".into(), id.into()),
            ],
            run_properties: None,
            unknown_children: vec![
                RawXmlElement::new("w:name").with_attr("w:val", name).into(),
                RawXmlElement::new("w:qFormat").into(),
            ],
        }
    }

    fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut style = Style {
            attributes: attributes_of(start),
            ..Default::default()
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"rPr" {
                        style.run_properties = Some(RunProperties::from_reader(reader)?);
                    } else {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        style.unknown_children.push(raw.into());
                    }
                }
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"rPr" {
                        style.run_properties = Some(RunProperties::default());
                    } else {
                        style
                            .unknown_children
                            .push(RawXmlElement::from_empty(&e).into());
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"style" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(style)
    }

    fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| xml::local_name(k) == local)
            .map(|(_, v)| v.as_str())
    }

    /// Style ID
    pub fn id(&self) -> Option<&str> {
        self.attr("styleId")
    }

    /// Style type (paragraph, character, table, numbering)
    pub fn style_type(&self) -> Option<&str> {
        self.attr("type")
    }

    /// Display name (`w:name`)
    pub fn name(&self) -> Option<&str> {
        self.unknown_children.iter().find_map(|node| match node {
            RawXmlNode::Element(e) if e.local_name() == "name" => e.attr("w:val"),
            _ => None,
        })
    }

    /// Mutable run properties, created if missing
    pub fn run_properties_mut(&mut self) -> &mut RunProperties {
        self.run_properties.get_or_insert_with(Default::default)
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:style");
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start))?;

        let r_pr_rank = rank(STYLE, "rPr");
        let (before, after): (Vec<_>, Vec<_>) = self
            .unknown_children
            .iter()
            .partition(|node| node.local_name().is_some_and(|n| rank(STYLE, n) < r_pr_rank));
        for node in before {
            node.write_to(writer)?;
        }
        if let Some(props) = &self.run_properties {
            props.write_to(writer)?;
        }
        for node in after {
            node.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:style")))?;
        Ok(())
    }
}

impl Styles {
    /// Empty registry holding only the Normal paragraph style
    pub fn new() -> Self {
        let mut normal = Style::paragraph("Normal", "Normal");
        normal.attributes.insert(1, ("w:default".into(), "1".into()));
        Styles {
            root_attrs: xml::owned(xml::minimal_document_namespaces()),
            preamble: Vec::new(),
            styles: vec![normal],
        }
    }

    /// Parse styles.xml
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();

        let root = loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => break e.into_owned(),
                Event::Empty(e) => {
                    return Ok(Styles {
                        root_attrs: attributes_of(&e),
                        preamble: Vec::new(),
                        styles: Vec::new(),
                    })
                }
                Event::Eof => {
                    return Err(Error::InvalidDocument("styles part has no root element".into()))
                }
                _ => {}
            }
            buf.clear();
        };

        let mut styles = Styles {
            root_attrs: attributes_of(&root),
            preamble: Vec::new(),
            styles: Vec::new(),
        };
        loop {
            buf.clear();
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"style" {
                        styles.styles.push(Style::from_reader(&mut reader, &e)?);
                    } else {
                        let raw = RawXmlElement::from_reader(&mut reader, &e)?;
                        styles.preamble.push(raw.into());
                    }
                }
                Event::Empty(e) => styles.preamble.push(RawXmlElement::from_empty(&e).into()),
                Event::End(_) | Event::Eof => break,
                _ => {}
            }
        }

        Ok(styles)
    }

    /// Serialize styles.xml
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut start = BytesStart::new("w:styles");
        for (key, value) in &self.root_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Start(start))?;
        for node in &self.preamble {
            node.write_to(&mut writer)?;
        }
        for style in &self.styles {
            style.write_to(&mut writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:styles")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| Error::from(e.utf8_error()))
    }

    /// Look up a paragraph style by display name, falling back to its id
    pub fn paragraph_style(&self, name: &str) -> Option<&Style> {
        self.paragraph_style_index(name).map(|i| &self.styles[i])
    }

    /// Mutable paragraph style by name, created when the registry lacks it
    pub fn paragraph_style_mut(&mut self, name: &str) -> &mut Style {
        let index = match self.paragraph_style_index(name) {
            Some(index) => index,
            None => {
                log::warn!("Style '{}' not found, adding it", name);
                let id: String = name.chars().filter(|c| !c.is_whitespace()).collect();
                self.styles.push(Style::paragraph(&id, name));
                self.styles.len() - 1
            }
        };
        &mut self.styles[index]
    }

    fn paragraph_style_index(&self, name: &str) -> Option<usize> {
        let paragraph_styles = || {
            self.styles
                .iter()
                .enumerate()
                .filter(|(_, s)| s.style_type().unwrap_or("paragraph") == "paragraph")
        };
        paragraph_styles()
            .find(|(_, s)| s.name() == Some(name))
            .or_else(|| paragraph_styles().find(|(_, s)| s.id() == Some(name)))
            .map(|(i, _)| i)
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}
