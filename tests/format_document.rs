//! Integration test: reformat whole documents

mod common;

use docx_restyle::document::{
    BlockContent, BreakType, HeaderFooterKind, LineSpacing, ParagraphAlignment, RunContent,
    VerticalAlignment,
};
use docx_restyle::opc::{Package, PartUri};
use docx_restyle::{Document, Error, FormatJob, Formatter, StyleGuide};
use pretty_assertions::assert_eq;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn formatted_syllabus() -> Document {
    init_logger();
    let output = Formatter::default()
        .format_bytes(&common::syllabus_docx())
        .expect("format should succeed");
    Document::from_bytes(&output).expect("output should reopen")
}

fn part_text(bytes: &[u8], uri: &str) -> String {
    let package = Package::from_bytes(bytes).unwrap();
    let part = package.part(&PartUri::new(uri).unwrap()).unwrap();
    part.data_as_str().unwrap().to_string()
}

#[test]
fn test_body_paragraphs_follow_rules() {
    let doc = formatted_syllabus();
    let paragraphs: Vec<_> = doc.paragraphs().collect();
    assert_eq!(paragraphs.len(), 8);

    let title = paragraphs[0];
    assert_eq!(
        title.text(),
        "Introduction to the b.sc computer science curriculum"
    );
    assert_eq!(title.style(), Some("Title"));
    assert_eq!(title.alignment(), Some(ParagraphAlignment::Center));
    let run = title.runs().next().unwrap();
    assert!(run.bold());
    assert_eq!(run.font_size_pt(), Some(16.0));
    assert_eq!(run.color(), Some("0070C0"));

    let semester = paragraphs[3];
    assert_eq!(semester.text(), "Semester iii");
    assert_eq!(semester.runs().count(), 1);
    assert_eq!(semester.alignment(), Some(ParagraphAlignment::Center));
    assert_eq!(semester.line_spacing(), Some(LineSpacing::OnePointFive));
    let spacing = semester
        .properties
        .as_ref()
        .and_then(|p| p.spacing.as_ref())
        .unwrap();
    assert_eq!(spacing.line, Some(360));
    assert!(spacing
        .other_attrs
        .iter()
        .any(|(k, v)| k == "w:before" && v == "120"));
    assert_eq!(semester.runs().next().unwrap().color(), Some("0070C0"));

    let bullet = paragraphs[4];
    assert_eq!(bullet.text(), "• submit assignment by friday");
    assert_eq!(bullet.alignment(), Some(ParagraphAlignment::Justify));
    assert_eq!(bullet.line_spacing(), Some(LineSpacing::Single));

    let objectives = paragraphs[5];
    assert_eq!(objectives.text(), "Course objectives");
    assert_eq!(objectives.alignment(), Some(ParagraphAlignment::Left));
    assert!(objectives.runs().next().unwrap().bold());

    let citation = paragraphs[6];
    assert_eq!(
        citation.text(),
        "Knuth, d. (1997). the art of computer programming"
    );
    assert_eq!(citation.line_spacing(), Some(LineSpacing::Single));

    let body = paragraphs[7];
    assert_eq!(
        body.text(),
        "This course introduces students to data structures."
    );
    assert_eq!(body.content.len(), 1);
    assert_eq!(body.line_spacing(), Some(LineSpacing::OnePointFive));
    let run = body.runs().next().unwrap();
    assert!(!run.bold());
    assert_eq!(run.font_size_pt(), Some(12.0));
}

#[test]
fn test_blank_paragraphs_untouched() {
    let doc = formatted_syllabus();

    let empty = doc.paragraph(1).unwrap();
    assert!(empty.properties.is_none());
    assert!(empty.content.is_empty());

    let spaces = doc.paragraph(2).unwrap();
    assert!(spaces.properties.is_none());
    assert_eq!(spaces.text(), "   ");
}

#[test]
fn test_content_control_paragraphs_untouched() {
    let output = Formatter::default()
        .format_bytes(&common::syllabus_docx())
        .unwrap();
    let xml = part_text(&output, "/word/document.xml");

    assert!(xml.contains("<w:t>INSIDE CONTENT CONTROL</w:t>"));
}

#[test]
fn test_tables_styled() {
    let doc = formatted_syllabus();
    let table = doc.table(0).unwrap();

    for cell in table.row(0).unwrap().cells() {
        assert_eq!(cell.shading().map(|s| s.fill.as_str()), Some("D9D9D9"));
        assert_eq!(cell.vertical_alignment(), Some(VerticalAlignment::Center));
        let paragraph = cell.paragraphs().next().unwrap();
        assert_eq!(paragraph.alignment(), Some(ParagraphAlignment::Center));
        assert!(paragraph.runs().next().unwrap().bold());
    }
    assert_eq!(table.cell(0, 0).unwrap().text(), "Code");

    let code = table.cell(1, 0).unwrap();
    assert_eq!(code.text(), "Cs101");
    assert_eq!(
        code.paragraphs().next().unwrap().alignment(),
        Some(ParagraphAlignment::Left)
    );
    let credits = table.cell(1, 1).unwrap();
    assert_eq!(
        credits.paragraphs().next().unwrap().alignment(),
        Some(ParagraphAlignment::Center)
    );
    let date = table.cell(2, 0).unwrap();
    assert_eq!(
        date.paragraphs().next().unwrap().alignment(),
        Some(ParagraphAlignment::Center)
    );
    assert!(table.cell(2, 1).unwrap().shading().is_none());
}

#[test]
fn test_cell_properties_keep_schema_order() {
    let output = Formatter::default()
        .format_bytes(&common::syllabus_docx())
        .unwrap();
    let xml = part_text(&output, "/word/document.xml");

    assert!(xml.contains(
        r#"<w:tcPr><w:tcW w:w="4508" w:type="dxa"/><w:shd w:val="clear" w:color="auto" w:fill="D9D9D9"/><w:vAlign w:val="center"/></w:tcPr>"#
    ));
}

#[test]
fn test_existing_header_and_footer_overwritten() {
    let mut doc = formatted_syllabus();

    let section = doc.section_mut().unwrap();
    assert_eq!(section.header_distance(), Some(567));
    assert_eq!(section.footer_distance(), Some(567));

    let header = doc.section_part_mut(HeaderFooterKind::Header).unwrap();
    assert_eq!(
        header.text(),
        "KG College of Arts and Science (Autonomous) – 2024 Batch"
    );
    let paragraph = header.paragraphs().next().unwrap();
    assert_eq!(paragraph.style(), Some("Header"));
    assert_eq!(paragraph.alignment(), Some(ParagraphAlignment::Center));
    let run = paragraph.runs().next().unwrap();
    assert!(run.bold());
    assert_eq!(run.font_size_pt(), Some(11.0));

    let footer = doc.section_part_mut(HeaderFooterKind::Footer).unwrap();
    let paragraphs: Vec<_> = footer.paragraphs().collect();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].text(), "Department of Computer Science");
    assert_eq!(paragraphs[1].alignment(), Some(ParagraphAlignment::Center));
    assert_eq!(
        paragraphs[1].runs().next().unwrap().field_instruction(),
        Some("PAGE")
    );

    assert_eq!(doc.package().part_uris().count(), 5);
}

#[test]
fn test_page_field_markup() {
    let output = Formatter::default()
        .format_bytes(&common::syllabus_docx())
        .unwrap();
    let xml = part_text(&output, "/word/footer1.xml");

    assert!(xml.contains(
        r#"<w:r><w:fldChar w:fldCharType="begin"/><w:instrText>PAGE</w:instrText><w:fldChar w:fldCharType="end"/></w:r>"#
    ));
}

#[test]
fn test_normal_style_font() {
    let output = Formatter::default()
        .format_bytes(&common::syllabus_docx())
        .unwrap();
    let xml = part_text(&output, "/word/styles.xml");

    assert!(xml.contains(
        r#"<w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman" w:eastAsia="Times New Roman" w:cstheme="minorBidi"/><w:sz w:val="24"/>"#
    ));
    // docDefaults keep their theme fonts
    assert!(xml.contains(r#"<w:rFonts w:asciiTheme="minorHAnsi""#));
}

#[test]
fn test_unknown_parts_preserved() {
    let output = Formatter::default()
        .format_bytes(&common::syllabus_docx())
        .unwrap();

    assert_eq!(part_text(&output, "/docProps/core.xml"), common::CORE_XML);
    let package = Package::from_bytes(&output).unwrap();
    assert_eq!(package.relationships().len(), 2);
}

#[test]
fn test_bookmarks_dropped_with_paragraph_content() {
    let doc = formatted_syllabus();
    let body = doc.paragraph(7).unwrap();
    assert!(body
        .content
        .iter()
        .all(|c| matches!(c, docx_restyle::document::ParagraphContent::Run(_))));
}

#[test]
fn test_formatting_twice_is_stable() {
    let formatter = Formatter::default();
    let once = formatter.format_bytes(&common::syllabus_docx()).unwrap();
    let twice = formatter.format_bytes(&once).unwrap();

    let once = Document::from_bytes(&once).unwrap();
    let twice = Document::from_bytes(&twice).unwrap();

    assert_eq!(once.body().content, twice.body().content);
    assert_eq!(
        once.styles().and_then(|s| s.paragraph_style("Normal")),
        twice.styles().and_then(|s| s.paragraph_style("Normal"))
    );
}

#[test]
fn test_missing_parts_are_created() {
    init_logger();
    let mut doc = Document::new();
    doc.add_paragraph(docx_restyle::document::Paragraph::new("Eligibility"));
    let input = doc.to_bytes().unwrap();

    let output = Formatter::default().format_bytes(&input).unwrap();
    let mut doc = Document::from_bytes(&output).unwrap();

    let uris: Vec<String> = doc
        .package()
        .part_uris()
        .map(|u| u.as_str().to_string())
        .collect();
    for expected in ["/word/styles.xml", "/word/header1.xml", "/word/footer1.xml"] {
        assert!(uris.iter().any(|u| u == expected), "missing {}", expected);
    }

    let footer = doc.section_part_mut(HeaderFooterKind::Footer).unwrap();
    assert_eq!(footer.paragraphs().count(), 2);
    assert_eq!(footer.text(), "Department of Computer Science\n");

    let header = doc.section_part_mut(HeaderFooterKind::Header).unwrap();
    assert_eq!(
        header.text(),
        "KG College of Arts and Science (Autonomous) – 2024 Batch"
    );
    assert!(doc.styles().and_then(|s| s.paragraph_style("Normal")).is_some());
}

#[test]
fn test_custom_style_guide() {
    let guide = StyleGuide::default()
        .with_header_text("Department of Mathematics")
        .with_footer_text("2025 Batch")
        .with_header_footer_distance(720);
    let output = Formatter::new(guide)
        .format_bytes(&common::syllabus_docx())
        .unwrap();
    let mut doc = Document::from_bytes(&output).unwrap();

    assert_eq!(doc.section_mut().unwrap().header_distance(), Some(720));
    assert_eq!(
        doc.section_part_mut(HeaderFooterKind::Header).unwrap().text(),
        "Department of Mathematics"
    );
}

#[test]
fn test_missing_section_is_an_error() {
    let bytes = common::build_docx(&common::document_xml(
        r#"<w:p><w:r><w:t>No section here</w:t></w:r></w:p>"#,
    ));

    let result = Formatter::default().format_bytes(&bytes);
    assert!(matches!(result, Err(Error::MissingSection)));
}

#[test]
fn test_header_without_paragraph_is_an_error() {
    let mut doc = Document::from_bytes(&common::syllabus_docx()).unwrap();
    doc.section_part_mut(HeaderFooterKind::Header)
        .unwrap()
        .content
        .retain(|block| !matches!(block, BlockContent::Paragraph(_)));

    let result = Formatter::default().apply(&mut doc);
    assert!(matches!(result, Err(Error::MissingParagraph(_))));
}

#[test]
fn test_file_round_trip_leaves_input_alone() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("syllabus.docx");
    let original = common::syllabus_docx();
    std::fs::write(&input, &original).unwrap();

    let job = FormatJob::new(input.clone(), None, Some(dir.path().join("outputs"))).unwrap();
    job.run(&Formatter::default()).unwrap();

    assert_eq!(
        job.output(),
        dir.path().join("outputs").join("formatted_syllabus.docx")
    );
    assert_eq!(std::fs::read(&input).unwrap(), original);

    let doc = Document::open(job.output()).unwrap();
    assert_eq!(doc.paragraph(5).map(|p| p.text()), Some("Course objectives".to_string()));
}

#[test]
fn test_format_document_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.docx");
    std::fs::write(&input, common::syllabus_docx()).unwrap();

    docx_restyle::format_document(&input, &output).unwrap();

    assert!(output.exists());
    assert!(Document::open(&output).is_ok());
}

#[test]
fn test_not_a_zip_is_an_error() {
    let result = Formatter::default().format_bytes(b"plain text, not a package");
    assert!(matches!(result, Err(Error::Zip(_))));
}

#[test]
fn test_line_breaks_and_tabs_survive_rewrite() {
    let body = format!(
        "{}{}",
        r#"<w:p><w:r><w:t>Unit I</w:t></w:r><w:r><w:br/><w:t>Arrays</w:t><w:tab/><w:t>LISTS</w:t></w:r></w:p>"#,
        common::SECTION
    );
    let bytes = common::build_docx(&common::document_xml(&body));
    let output = Formatter::default().format_bytes(&bytes).unwrap();
    let doc = Document::from_bytes(&output).unwrap();

    let paragraph = doc.paragraph(0).unwrap();
    assert_eq!(paragraph.runs().count(), 1);
    let run = paragraph.runs().next().unwrap();
    assert_eq!(
        run.content,
        vec![
            RunContent::Text("Unit i".into()),
            RunContent::Break(BreakType::TextWrapping),
            RunContent::Text("arrays".into()),
            RunContent::Tab,
            RunContent::Text("lists".into()),
        ]
    );
}
