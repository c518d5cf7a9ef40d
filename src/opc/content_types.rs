//! Content Types handling for OPC packages
//!
//! Parses and generates `[Content_Types].xml`. Entries keep the order and
//! spelling they were read with; new entries are appended, so rewriting a
//! package only changes the lines for parts that were added.

use crate::error::{Error, Result};
use crate::opc::PartUri;
use crate::xml::{get_attr, CT};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

/// Content types definition for an OPC package
#[derive(Clone, Debug, Default)]
pub struct ContentTypes {
    /// Default extension mappings (extension -> content type); extensions
    /// match case-insensitively
    defaults: Vec<(String, String)>,
    /// Override mappings (part URI -> content type)
    overrides: Vec<(PartUri, String)>,
}

impl ContentTypes {
    /// Create a new ContentTypes with the defaults every package needs
    pub fn new() -> Self {
        let mut ct = Self::default();

        // Standard defaults
        ct.add_default("rels", RELATIONSHIPS);
        ct.add_default("xml", XML);

        ct
    }

    /// Parse from XML string
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        Self::from_reader(&mut reader)
    }

    /// Parse from a reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut ct = Self::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) => match e.name().local_name().as_ref() {
                    b"Default" => {
                        let ext = required_attr(&e, "Extension")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.add_default(&ext, &content_type);
                    }
                    b"Override" => {
                        let part_name = required_attr(&e, "PartName")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.add_override(&PartUri::new(&part_name)?, &content_type);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(ct)
    }

    /// Serialize to XML string
    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    /// Write to a writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);

        xml.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))?;

        let mut types = BytesStart::new("Types");
        types.push_attribute(("xmlns", CT));
        xml.write_event(Event::Start(types))?;

        // Defaults first, then overrides, as the schema requires
        for (ext, content_type) in &self.defaults {
            let mut default = BytesStart::new("Default");
            default.push_attribute(("Extension", ext.as_str()));
            default.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(default))?;
        }

        for (uri, content_type) in &self.overrides {
            let mut override_elem = BytesStart::new("Override");
            override_elem.push_attribute(("PartName", uri.as_str()));
            override_elem.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(override_elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Types")))?;

        Ok(())
    }

    /// Add or replace a default extension mapping
    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        match self
            .defaults
            .iter_mut()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self
                .defaults
                .push((extension.to_string(), content_type.to_string())),
        }
    }

    /// Add or replace the override for a specific part
    pub fn add_override(&mut self, uri: &PartUri, content_type: &str) {
        match self.overrides.iter_mut().find(|(u, _)| u == uri) {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self.overrides.push((uri.clone(), content_type.to_string())),
        }
    }

    /// Get the content type for a part: its override, else the default for
    /// its extension
    pub fn get(&self, uri: &PartUri) -> Option<&str> {
        if let Some((_, ct)) = self.overrides.iter().find(|(u, _)| u == uri) {
            return Some(ct);
        }

        let ext = uri.extension()?;
        self.defaults
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(ext))
            .map(|(_, ct)| ct.as_str())
    }
}

fn required_attr(element: &BytesStart, name: &str) -> Result<String> {
    get_attr(element, name).ok_or_else(|| Error::MissingAttribute {
        element: String::from_utf8_lossy(element.name().as_ref()).to_string(),
        attr: name.to_string(),
    })
}

// Well-known content types
pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const XML: &str = "application/xml";
pub const MAIN_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const HEADER: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
pub const FOOTER: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";
