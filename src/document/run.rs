//! Run element (w:r) - a contiguous run of text with uniform formatting

use crate::error::Result;
use crate::xml::order::RUN_PROPERTIES;
use crate::xml::{
    attributes_of, get_attr, get_w_attr, get_w_val, parse_bool, write_ordered, RawXmlElement,
    RawXmlNode,
};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// Run element (w:r)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Run {
    /// Run properties
    pub properties: Option<RunProperties>,
    /// Run content
    pub content: Vec<RunContent>,
    /// Unknown attributes (preserved)
    pub unknown_attrs: Vec<(String, String)>,
}

/// Content within a run
#[derive(Clone, Debug, PartialEq)]
pub enum RunContent {
    /// Text (w:t)
    Text(String),
    /// Tab (w:tab)
    Tab,
    /// Break (w:br)
    Break(BreakType),
    /// Carriage return (w:cr)
    CarriageReturn,
    /// Soft hyphen
    SoftHyphen,
    /// Non-breaking hyphen
    NoBreakHyphen,
    /// Complex field boundary (w:fldChar)
    FieldChar(FieldCharType),
    /// Field instruction (w:instrText), evaluated by the renderer
    InstrText(String),
    /// Unknown (preserved)
    Unknown(RawXmlNode),
}

/// Break type
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BreakType {
    #[default]
    TextWrapping,
    Page,
    Column,
}

/// Complex field character type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCharType {
    Begin,
    Separate,
    End,
}

impl FieldCharType {
    /// Parse from OOXML string value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "begin" => Some(FieldCharType::Begin),
            "separate" => Some(FieldCharType::Separate),
            "end" => Some(FieldCharType::End),
            _ => None,
        }
    }

    /// Convert to OOXML string value
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCharType::Begin => "begin",
            FieldCharType::Separate => "separate",
            FieldCharType::End => "end",
        }
    }
}

/// Font slots of `w:rFonts`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunFonts {
    pub ascii: Option<String>,
    pub h_ansi: Option<String>,
    pub east_asia: Option<String>,
    pub cs: Option<String>,
    /// Theme fonts, hints and other attributes (preserved)
    pub other_attrs: Vec<(String, String)>,
}

impl RunFonts {
    fn from_start(e: &BytesStart) -> Self {
        let mut fonts = RunFonts::default();
        for (key, value) in attributes_of(e) {
            match crate::xml::local_name(&key) {
                "ascii" => fonts.ascii = Some(value),
                "hAnsi" => fonts.h_ansi = Some(value),
                "eastAsia" => fonts.east_asia = Some(value),
                "cs" => fonts.cs = Some(value),
                _ => fonts.other_attrs.push((key, value)),
            }
        }
        fonts
    }

    /// Set the Latin font family (ascii + hAnsi). Theme fonts for those
    /// slots take precedence in Word, so they are dropped.
    pub fn set_family(&mut self, name: &str) {
        self.ascii = Some(name.to_string());
        self.h_ansi = Some(name.to_string());
        self.drop_other(&["asciiTheme", "hAnsiTheme"]);
    }

    /// Set the East Asian font
    pub fn set_east_asia(&mut self, name: &str) {
        self.east_asia = Some(name.to_string());
        self.drop_other(&["eastAsiaTheme"]);
    }

    fn drop_other(&mut self, locals: &[&str]) {
        self.other_attrs
            .retain(|(k, _)| !locals.contains(&crate::xml::local_name(k)));
    }

    fn to_element(&self) -> RawXmlElement {
        let mut elem = RawXmlElement::new("w:rFonts");
        let slots = [
            ("w:ascii", &self.ascii),
            ("w:hAnsi", &self.h_ansi),
            ("w:eastAsia", &self.east_asia),
            ("w:cs", &self.cs),
        ];
        for (name, value) in slots {
            if let Some(v) = value {
                elem.attributes.push((name.to_string(), v.clone()));
            }
        }
        elem.attributes.extend(self.other_attrs.iter().cloned());
        elem
    }
}

/// Run properties (w:rPr)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunProperties {
    /// Style ID
    pub style: Option<String>,
    /// Fonts
    pub fonts: Option<RunFonts>,
    /// Bold
    pub bold: Option<bool>,
    /// Italic
    pub italic: Option<bool>,
    /// Underline type
    pub underline: Option<String>,
    /// Strike-through
    pub strike: Option<bool>,
    /// Font size (in half-points, e.g., 24 = 12pt)
    pub size: Option<u32>,
    /// Color (RGB hex)
    pub color: Option<String>,
    /// Highlight color
    pub highlight: Option<String>,
    /// Vertical alignment (superscript/subscript)
    pub vertical_align: Option<String>,
    /// Unknown children (preserved)
    pub unknown_children: Vec<RawXmlNode>,
}

impl Run {
    /// Parse from reader (after w:r start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Self> {
        let mut run = Run::from_empty(start);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"rPr" => {
                        run.properties = Some(RunProperties::from_reader(reader)?);
                    }
                    b"t" => {
                        let text = read_text_content(reader, b"t")?;
                        run.content.push(RunContent::Text(text));
                    }
                    b"instrText" => {
                        let text = read_text_content(reader, b"instrText")?;
                        run.content.push(RunContent::InstrText(text));
                    }
                    _ => {
                        let raw = RawXmlElement::from_reader(reader, &e)?;
                        run.content.push(RunContent::Unknown(raw.into()));
                    }
                },
                Event::Empty(e) => {
                    let content = match e.name().local_name().as_ref() {
                        b"t" => RunContent::Text(String::new()),
                        b"instrText" => RunContent::InstrText(String::new()),
                        b"tab" => RunContent::Tab,
                        b"br" => {
                            let break_type = match get_w_attr(&e, "type").as_deref() {
                                Some("page") => BreakType::Page,
                                Some("column") => BreakType::Column,
                                _ => BreakType::TextWrapping,
                            };
                            RunContent::Break(break_type)
                        }
                        b"cr" => RunContent::CarriageReturn,
                        b"softHyphen" => RunContent::SoftHyphen,
                        b"noBreakHyphen" => RunContent::NoBreakHyphen,
                        b"fldChar" => parse_field_char(&e),
                        _ => RunContent::Unknown(RawXmlElement::from_empty(&e).into()),
                    };
                    run.content.push(content);
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"r" {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(run)
    }

    /// Create from empty element
    pub fn from_empty(start: &BytesStart) -> Self {
        Run {
            unknown_attrs: attributes_of(start),
            ..Default::default()
        }
    }

    /// Get all text in this run (field instructions are not text)
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            match content {
                RunContent::Text(t) => result.push_str(t),
                RunContent::Tab => result.push('\t'),
                RunContent::Break(BreakType::TextWrapping) => result.push('\n'),
                RunContent::CarriageReturn => result.push('\n'),
                _ => {}
            }
        }
        result
    }

    /// Check if bold
    pub fn bold(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.bold).unwrap_or(false)
    }

    /// Check if italic
    pub fn italic(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.italic).unwrap_or(false)
    }

    /// Get font size in points (None if not specified)
    pub fn font_size_pt(&self) -> Option<f32> {
        self.properties.as_ref()?.size.map(|s| s as f32 / 2.0)
    }

    /// Get color (RGB hex string)
    pub fn color(&self) -> Option<&str> {
        self.properties.as_ref()?.color.as_deref()
    }

    /// Whether this run holds a field instruction
    pub fn field_instruction(&self) -> Option<&str> {
        self.content.iter().find_map(|c| match c {
            RunContent::InstrText(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new("w:r");
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

        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        Ok(())
    }

    /// Create a new run with text
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            content: vec![RunContent::Text(text.into())],
            ..Default::default()
        }
    }

    /// Create a run from plain text, writing `\t` as `w:tab` and `\n` or
    /// `\r` as a line break
    pub fn from_text(text: &str) -> Self {
        let mut content = Vec::new();
        let mut pending = String::new();
        for c in text.chars() {
            let special = match c {
                '\t' => RunContent::Tab,
                '\n' | '\r' => RunContent::Break(BreakType::TextWrapping),
                _ => {
                    pending.push(c);
                    continue;
                }
            };
            if !pending.is_empty() {
                content.push(RunContent::Text(std::mem::take(&mut pending)));
            }
            content.push(special);
        }
        if !pending.is_empty() {
            content.push(RunContent::Text(pending));
        }

        Run {
            content,
            ..Default::default()
        }
    }

    /// Create a run holding a complete `PAGE` field, which the renderer
    /// replaces with the current page number
    pub fn page_number_field() -> Self {
        Run {
            content: vec![
                RunContent::FieldChar(FieldCharType::Begin),
                RunContent::InstrText("PAGE".into()),
                RunContent::FieldChar(FieldCharType::End),
            ],
            ..Default::default()
        }
    }

    /// Set bold
    pub fn set_bold(&mut self, bold: bool) {
        self.properties.get_or_insert_with(Default::default).bold = Some(bold);
    }

    /// Set font size in points
    pub fn set_font_size_pt(&mut self, size: f32) {
        self.properties.get_or_insert_with(Default::default).size =
            Some((size * 2.0).round() as u32);
    }

    /// Set color (RGB hex string)
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.properties.get_or_insert_with(Default::default).color = Some(color.into());
    }
}

impl RunContent {
    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            RunContent::Text(text) => write_text_element(writer, "w:t", text)?,
            RunContent::InstrText(text) => write_text_element(writer, "w:instrText", text)?,
            RunContent::Tab => {
                writer.write_event(Event::Empty(BytesStart::new("w:tab")))?;
            }
            RunContent::Break(break_type) => {
                let mut start = BytesStart::new("w:br");
                match break_type {
                    BreakType::Page => start.push_attribute(("w:type", "page")),
                    BreakType::Column => start.push_attribute(("w:type", "column")),
                    BreakType::TextWrapping => {}
                }
                writer.write_event(Event::Empty(start))?;
            }
            RunContent::CarriageReturn => {
                writer.write_event(Event::Empty(BytesStart::new("w:cr")))?;
            }
            RunContent::SoftHyphen => {
                writer.write_event(Event::Empty(BytesStart::new("w:softHyphen")))?;
            }
            RunContent::NoBreakHyphen => {
                writer.write_event(Event::Empty(BytesStart::new("w:noBreakHyphen")))?;
            }
            RunContent::FieldChar(kind) => {
                let mut start = BytesStart::new("w:fldChar");
                start.push_attribute(("w:fldCharType", kind.as_str()));
                writer.write_event(Event::Empty(start))?;
            }
            RunContent::Unknown(node) => node.write_to(writer)?,
        }
        Ok(())
    }
}

impl RunProperties {
    /// Parse from reader (after w:rPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = RunProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let raw = RawXmlElement::from_reader(reader, &e)?;
                    if raw.local_name() == "rFonts" {
                        props.fonts = Some(RunFonts::from_start(&e));
                    } else {
                        props.unknown_children.push(raw.into());
                    }
                }
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"rStyle" => props.style = get_w_val(&e),
                    b"rFonts" => props.fonts = Some(RunFonts::from_start(&e)),
                    b"b" => props.bold = Some(parse_bool(&e)),
                    b"i" => props.italic = Some(parse_bool(&e)),
                    b"u" => props.underline = get_w_val(&e).or(Some("single".into())),
                    b"strike" => props.strike = Some(parse_bool(&e)),
                    b"sz" => props.size = get_w_val(&e).and_then(|v| v.parse().ok()),
                    b"color" if get_attr(&e, "w:themeColor").is_none() => {
                        props.color = get_w_val(&e);
                    }
                    b"highlight" => props.highlight = get_w_val(&e),
                    b"vertAlign" => props.vertical_align = get_w_val(&e),
                    _ => {
                        props
                            .unknown_children
                            .push(RawXmlElement::from_empty(&e).into());
                    }
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"rPr" {
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

    /// Set the font size in points
    pub fn set_size_pt(&mut self, size: f32) {
        self.size = Some((size * 2.0).round() as u32);
    }

    /// Typed children followed by preserved ones, unordered
    fn child_nodes(&self) -> Vec<RawXmlNode> {
        fn toggle(name: &str, on: bool) -> RawXmlNode {
            let elem = RawXmlElement::new(name);
            if on {
                elem.into()
            } else {
                elem.with_attr("w:val", "0").into()
            }
        }
        fn valued(name: &str, value: &str) -> RawXmlNode {
            RawXmlElement::new(name).with_attr("w:val", value).into()
        }

        let mut nodes = Vec::new();
        if let Some(style) = &self.style {
            nodes.push(valued("w:rStyle", style));
        }
        if let Some(fonts) = &self.fonts {
            nodes.push(fonts.to_element().into());
        }
        if let Some(bold) = self.bold {
            nodes.push(toggle("w:b", bold));
        }
        if let Some(italic) = self.italic {
            nodes.push(toggle("w:i", italic));
        }
        if let Some(strike) = self.strike {
            nodes.push(toggle("w:strike", strike));
        }
        if let Some(color) = &self.color {
            nodes.push(valued("w:color", color));
        }
        if let Some(size) = self.size {
            nodes.push(valued("w:sz", &size.to_string()));
        }
        if let Some(highlight) = &self.highlight {
            nodes.push(valued("w:highlight", highlight));
        }
        if let Some(underline) = &self.underline {
            nodes.push(valued("w:u", underline));
        }
        if let Some(valign) = &self.vertical_align {
            nodes.push(valued("w:vertAlign", valign));
        }
        nodes.extend(self.unknown_children.iter().cloned());
        nodes
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        write_ordered(writer, "w:rPr", self.child_nodes(), RUN_PROPERTIES)
    }
}

fn parse_field_char(e: &BytesStart) -> RunContent {
    let attrs = attributes_of(e);
    match get_w_attr(e, "fldCharType").and_then(|v| FieldCharType::parse(&v)) {
        Some(kind) if attrs.len() == 1 => RunContent::FieldChar(kind),
        _ => RunContent::Unknown(RawXmlElement::from_empty(e).into()),
    }
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    if text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains("  ")
    {
        start.push_attribute(("xml:space", "preserve"));
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Read text content up to the matching end tag
fn read_text_content<R: BufRead>(reader: &mut Reader<R>, end: &[u8]) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(e) => {
                if e.name().local_name().as_ref() == end {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_run(xml: &str) -> Run {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        loop {
            if let Event::Start(e) = reader.read_event_into(&mut buf).unwrap() {
                return Run::from_reader(&mut reader, &e.into_owned()).unwrap();
            }
        }
    }

    fn write_run(run: &Run) -> String {
        let mut writer = Writer::new(Vec::new());
        run.write_to(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_from_text_splits_tabs_and_breaks() {
        let run = Run::from_text("Name\tValue\nNext\r");
        assert_eq!(
            run.content,
            vec![
                RunContent::Text("Name".into()),
                RunContent::Tab,
                RunContent::Text("Value".into()),
                RunContent::Break(BreakType::TextWrapping),
                RunContent::Text("Next".into()),
                RunContent::Break(BreakType::TextWrapping),
            ]
        );
        assert_eq!(run.text(), "Name\tValue\nNext\n");
        assert_eq!(
            write_run(&run),
            "<w:r><w:t>Name</w:t><w:tab/><w:t>Value</w:t><w:br/><w:t>Next</w:t><w:br/></w:r>"
        );
    }

    #[test]
    fn test_text_whitespace_is_kept() {
        let run = parse_run(r#"<w:r><w:t xml:space="preserve">Hello </w:t><w:tab/><w:t>World</w:t></w:r>"#);
        assert_eq!(run.text(), "Hello \tWorld");
    }

    #[test]
    fn test_parse_properties() {
        let run = parse_run(
            r#"<w:r><w:rPr><w:rFonts w:asciiTheme="minorHAnsi" w:ascii="Arial" w:cs="Mangal"/><w:b/><w:i w:val="0"/><w:sz w:val="28"/><w:szCs w:val="28"/><w:color w:val="FF0000"/></w:rPr><w:t>x</w:t></w:r>"#,
        );

        let props = run.properties.as_ref().unwrap();
        let fonts = props.fonts.as_ref().unwrap();
        assert_eq!(fonts.ascii.as_deref(), Some("Arial"));
        assert_eq!(fonts.cs.as_deref(), Some("Mangal"));
        assert!(run.bold());
        assert!(!run.italic());
        assert_eq!(run.font_size_pt(), Some(14.0));
        assert_eq!(run.color(), Some("FF0000"));
        assert_eq!(props.unknown_children.len(), 1);
    }

    #[test]
    fn test_set_family_drops_theme_fonts() {
        let mut fonts = RunFonts {
            other_attrs: vec![
                ("w:asciiTheme".into(), "minorHAnsi".into()),
                ("w:eastAsiaTheme".into(), "minorEastAsia".into()),
                ("w:hint".into(), "eastAsia".into()),
            ],
            ..Default::default()
        };
        fonts.set_family("Times New Roman");

        assert_eq!(fonts.h_ansi.as_deref(), Some("Times New Roman"));
        assert_eq!(
            fonts.other_attrs,
            vec![
                ("w:eastAsiaTheme".to_string(), "minorEastAsia".to_string()),
                ("w:hint".to_string(), "eastAsia".to_string()),
            ]
        );
    }

    #[test]
    fn test_properties_written_in_schema_order() {
        let mut run = parse_run(
            r#"<w:r><w:rPr><w:szCs w:val="20"/><w:lang w:val="en-IN"/></w:rPr><w:t>x</w:t></w:r>"#,
        );
        run.set_font_size_pt(16.0);
        run.set_bold(true);
        run.set_color("0070C0");

        assert_eq!(
            write_run(&run),
            r#"<w:r><w:rPr><w:b/><w:color w:val="0070C0"/><w:sz w:val="32"/><w:szCs w:val="20"/><w:lang w:val="en-IN"/></w:rPr><w:t>x</w:t></w:r>"#
        );
    }

    #[test]
    fn test_page_number_field() {
        let run = Run::page_number_field();
        assert_eq!(run.text(), "");
        assert_eq!(run.field_instruction(), Some("PAGE"));
        assert_eq!(
            write_run(&run),
            r#"<w:r><w:fldChar w:fldCharType="begin"/><w:instrText>PAGE</w:instrText><w:fldChar w:fldCharType="end"/></w:r>"#
        );

        let reparsed = parse_run(&write_run(&run));
        assert_eq!(reparsed, run);
    }

    #[test]
    fn test_preserve_space_attribute() {
        let run = Run::new(" leading");
        assert!(write_run(&run).contains(r#"<w:t xml:space="preserve"> leading</w:t>"#));
    }
}
