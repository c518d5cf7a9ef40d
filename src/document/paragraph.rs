//! Paragraph element (w:p)

use crate::document::{Run, SectionProperties};
use crate::error::Result;
use crate::xml::order::PARAGRAPH_PROPERTIES;
use crate::xml::{attributes_of, get_w_val, write_ordered, RawXmlElement, RawXmlNode};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Paragraph element (w:p)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    /// Paragraph properties
    pub properties: Option<ParagraphProperties>,
    /// Paragraph content (runs, hyperlinks, etc.)
    pub content: Vec<ParagraphContent>,
    /// Unknown attributes (rsids, paraId, ...)
    pub unknown_attrs: Vec<(String, String)>,
}

/// Content within a paragraph
#[derive(Clone, Debug, PartialEq)]
pub enum ParagraphContent {
    /// Text run
    Run(Run),
    /// Hyperlink
    Hyperlink(Hyperlink),
    /// Unknown element (preserved)
    Unknown(RawXmlNode),
}

/// Hyperlink element (w:hyperlink)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hyperlink {
    /// Relationship ID (for external links)
    pub r_id: Option<String>,
    /// Anchor (for internal links)
    pub anchor: Option<String>,
    /// Remaining attributes
    pub other_attrs: Vec<(String, String)>,
    /// Content
    pub content: Vec<ParagraphContent>,
}

/// Paragraph alignment (w:jc)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParagraphAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl ParagraphAlignment {
    /// Parse from OOXML string value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(ParagraphAlignment::Left),
            "center" => Some(ParagraphAlignment::Center),
            "right" | "end" => Some(ParagraphAlignment::Right),
            "both" => Some(ParagraphAlignment::Justify),
            _ => None,
        }
    }

    /// Convert to OOXML string value
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphAlignment::Left => "left",
            ParagraphAlignment::Center => "center",
            ParagraphAlignment::Right => "right",
            ParagraphAlignment::Justify => "both",
        }
    }
}

/// Line spacing as a multiple of single spacing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineSpacing {
    Single,
    OnePointFive,
    Double,
}

impl LineSpacing {
    /// Value of `w:line` with `w:lineRule="auto"` (240ths of a line)
    pub fn line_value(&self) -> u32 {
        match self {
            LineSpacing::Single => 240,
            LineSpacing::OnePointFive => 360,
            LineSpacing::Double => 480,
        }
    }

    fn from_line_value(value: u32) -> Option<Self> {
        match value {
            240 => Some(LineSpacing::Single),
            360 => Some(LineSpacing::OnePointFive),
            480 => Some(LineSpacing::Double),
            _ => None,
        }
    }
}

/// Paragraph spacing (w:spacing)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    /// Line pitch (`w:line`)
    pub line: Option<u32>,
    /// Interpretation of `line` (`auto`, `exact`, `atLeast`)
    pub line_rule: Option<String>,
    /// before/after and other attributes
    pub other_attrs: Vec<(String, String)>,
}

impl Spacing {
    fn from_start(e: &BytesStart) -> Self {
        let mut spacing = Spacing::default();
        for (key, value) in attributes_of(e) {
            match crate::xml::local_name(&key) {
                "line" => spacing.line = value.parse().ok(),
                "lineRule" => spacing.line_rule = Some(value),
                _ => spacing.other_attrs.push((key, value)),
            }
        }
        spacing
    }

    /// Proportional line spacing, if this is one of the known multiples
    pub fn line_spacing(&self) -> Option<LineSpacing> {
        match self.line_rule.as_deref() {
            None | Some("auto") => self.line.and_then(LineSpacing::from_line_value),
            Some(_) => None,
        }
    }

    fn to_element(&self) -> RawXmlElement {
        let mut elem = RawXmlElement::new("w:spacing");
        elem.attributes.extend(self.other_attrs.iter().cloned());
        if let Some(line) = self.line {
            elem.attributes.push(("w:line".into(), line.to_string()));
        }
        if let Some(rule) = &self.line_rule {
            elem.attributes.push(("w:lineRule".into(), rule.clone()));
        }
        elem
    }
}

/// Paragraph properties (w:pPr)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphProperties {
    /// Style ID
    pub style: Option<String>,
    /// Justification (raw `w:jc` value)
    pub justification: Option<String>,
    /// Spacing
    pub spacing: Option<Spacing>,
    /// Numbering properties
    pub num_id: Option<u32>,
    pub num_level: Option<u32>,
    /// Outline level (for headings)
    pub outline_level: Option<u8>,
    /// Section break carried by this paragraph
    pub section: Option<SectionProperties>,
    /// Unknown children (preserved)
    pub unknown_children: Vec<RawXmlNode>,
}

impl Paragraph {
    /// Parse paragraph from reader (after w:p start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut para = Paragraph::from_empty(start);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"pPr" {
                        para.properties = Some(ParagraphProperties::from_reader(reader)?);
                    } else {
                        para.content.push(ParagraphContent::from_start(reader, &e)?);
                    }
                }
                Event::Empty(e) => para.content.push(ParagraphContent::from_empty(&e)),
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"p" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(para)
    }

    /// Create from empty element
    pub fn from_empty(start: &BytesStart) -> Self {
        Paragraph {
            unknown_attrs: attributes_of(start),
            ..Default::default()
        }
    }

    /// Get all text in this paragraph (runs and hyperlinks)
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            content.push_text(&mut result);
        }
        result
    }

    /// Get style ID
    pub fn style(&self) -> Option<&str> {
        self.properties.as_ref()?.style.as_deref()
    }

    /// Get alignment, if set to a known value
    pub fn alignment(&self) -> Option<ParagraphAlignment> {
        ParagraphAlignment::parse(self.properties.as_ref()?.justification.as_deref()?)
    }

    /// Get proportional line spacing, if set
    pub fn line_spacing(&self) -> Option<LineSpacing> {
        self.properties.as_ref()?.spacing.as_ref()?.line_spacing()
    }

    /// Get direct runs
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|c| {
            if let ParagraphContent::Run(r) = c {
                Some(r)
            } else {
                None
            }
        })
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:p");
        for (key, value) in &self.unknown_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.properties.is_none() && self.content.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(props) = &self.properties {
            props.write_to(writer)?;
        }
        for content in &self.content {
            content.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }

    /// Create a new paragraph with text
    pub fn new(text: impl Into<String>) -> Self {
        Paragraph {
            content: vec![ParagraphContent::Run(Run::new(text))],
            ..Default::default()
        }
    }

    /// Add a run to this paragraph
    pub fn add_run(&mut self, run: Run) {
        self.content.push(ParagraphContent::Run(run));
    }

    /// Remove all content, keeping the paragraph properties
    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// Replace all content with a single run
    pub fn replace_content(&mut self, run: Run) {
        self.clear();
        self.add_run(run);
    }

    /// Mutable paragraph properties, created if missing
    pub fn properties_mut(&mut self) -> &mut ParagraphProperties {
        self.properties.get_or_insert_with(Default::default)
    }

    /// Set style
    pub fn set_style(&mut self, style: impl Into<String>) {
        self.properties_mut().style = Some(style.into());
    }

    /// Set alignment
    pub fn set_alignment(&mut self, alignment: ParagraphAlignment) {
        self.properties_mut().justification = Some(alignment.as_str().to_string());
    }

    /// Set proportional line spacing, keeping before/after spacing
    pub fn set_line_spacing(&mut self, spacing: LineSpacing) {
        let slot = self.properties_mut().spacing.get_or_insert_with(Default::default);
        slot.line = Some(spacing.line_value());
        slot.line_rule = Some("auto".into());
    }
}

impl ParagraphContent {
    fn from_start<R: BufRead>(reader: &mut Reader<R>, e: &BytesStart) -> Result<Self> {
        Ok(match e.name().local_name().as_ref() {
            b"r" => ParagraphContent::Run(Run::from_reader(reader, e)?),
            b"hyperlink" => ParagraphContent::Hyperlink(Hyperlink::from_reader(reader, e)?),
            _ => ParagraphContent::Unknown(RawXmlElement::from_reader(reader, e)?.into()),
        })
    }

    fn from_empty(e: &BytesStart) -> Self {
        match e.name().local_name().as_ref() {
            b"r" => ParagraphContent::Run(Run::from_empty(e)),
            b"hyperlink" => ParagraphContent::Hyperlink(Hyperlink::from_empty(e)),
            _ => ParagraphContent::Unknown(RawXmlElement::from_empty(e).into()),
        }
    }

    fn push_text(&self, out: &mut String) {
        match self {
            ParagraphContent::Run(run) => out.push_str(&run.text()),
            ParagraphContent::Hyperlink(link) => {
                for content in &link.content {
                    content.push_text(out);
                }
            }
            ParagraphContent::Unknown(_) => {}
        }
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            ParagraphContent::Run(run) => run.write_to(writer),
            ParagraphContent::Hyperlink(link) => link.write_to(writer),
            ParagraphContent::Unknown(node) => node.write_to(writer),
        }
    }
}

impl ParagraphProperties {
    /// Parse from reader (after w:pPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = ParagraphProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"numPr" => parse_num_pr(reader, &mut props)?,
                    b"sectPr" => {
                        props.section = Some(SectionProperties::from_reader(reader, &e)?);
                    }
                    b"spacing" => {
                        props.spacing = Some(Spacing::from_start(&e));
                        RawXmlElement::from_reader(reader, &e)?;
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        props.unknown_children.push(raw.into());
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"pStyle" => props.style = get_w_val(&e),
                    b"jc" => props.justification = get_w_val(&e),
                    b"spacing" => props.spacing = Some(Spacing::from_start(&e)),
                    b"outlineLvl" => {
                        props.outline_level = get_w_val(&e).and_then(|v| v.parse().ok());
                    }
                    b"sectPr" => props.section = Some(SectionProperties::from_empty(&e)),
                    _ => {
                        props
                            .unknown_children
                            .push(RawXmlElement::from_empty(&e).into());
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"pPr" {
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
        if let Some(style) = &self.style {
            nodes.push(RawXmlElement::new("w:pStyle").with_attr("w:val", style).into());
        }
        if self.num_id.is_some() || self.num_level.is_some() {
            let mut num_pr = RawXmlElement::new("w:numPr");
            if let Some(level) = self.num_level {
                num_pr.push_child(RawXmlElement::new("w:ilvl").with_attr("w:val", level.to_string()));
            }
            if let Some(num_id) = self.num_id {
                num_pr.push_child(RawXmlElement::new("w:numId").with_attr("w:val", num_id.to_string()));
            }
            nodes.push(num_pr.into());
        }
        if let Some(spacing) = &self.spacing {
            nodes.push(spacing.to_element().into());
        }
        if let Some(jc) = &self.justification {
            nodes.push(RawXmlElement::new("w:jc").with_attr("w:val", jc).into());
        }
        if let Some(level) = self.outline_level {
            nodes.push(
                RawXmlElement::new("w:outlineLvl")
                    .with_attr("w:val", level.to_string())
                    .into(),
            );
        }
        if let Some(section) = &self.section {
            nodes.push(section.to_element().into());
        }
        nodes.extend(self.unknown_children.iter().cloned());
        nodes
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        write_ordered(writer, "w:pPr", self.child_nodes(), PARAGRAPH_PROPERTIES)
    }
}

impl Hyperlink {
    fn from_empty(start: &BytesStart) -> Self {
        let mut link = Hyperlink::default();
        for (key, value) in attributes_of(start) {
            match key.as_str() {
                "r:id" => link.r_id = Some(value),
                "w:anchor" => link.anchor = Some(value),
                _ => link.other_attrs.push((key, value)),
            }
        }
        link
    }

    /// Parse from reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut link = Hyperlink::from_empty(start);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => link.content.push(ParagraphContent::from_start(reader, &e)?),
                Event::Empty(e) => link.content.push(ParagraphContent::from_empty(&e)),
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"hyperlink" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(link)
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:hyperlink");
        if let Some(r_id) = &self.r_id {
            start.push_attribute(("r:id", r_id.as_str()));
        }
        if let Some(anchor) = &self.anchor {
            start.push_attribute(("w:anchor", anchor.as_str()));
        }
        for (key, value) in &self.other_attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.content.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for content in &self.content {
                content.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new("w:hyperlink")))?;
        }

        Ok(())
    }
}

/// Parse numbering properties
fn parse_num_pr<R: BufRead>(reader: &mut Reader<R>, props: &mut ParagraphProperties) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) => match e.name().local_name().as_ref() {
                b"numId" => props.num_id = get_w_val(&e).and_then(|v| v.parse().ok()),
                b"ilvl" => props.num_level = get_w_val(&e).and_then(|v| v.parse().ok()),
                _ => {}
            },
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"numPr" {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
