//! Header, footer and page number passes

use super::config::StyleGuide;
use crate::document::{Document, HeaderFooterKind, Paragraph, ParagraphAlignment, Run};
use crate::error::{Error, Result};

/// Set the header/footer distances of the first section and overwrite the
/// first paragraph of its default header and footer.
pub fn write_header_footer(doc: &mut Document, guide: &StyleGuide) -> Result<()> {
    let section = doc.section_mut()?;
    section.set_header_distance(guide.header_footer_distance);
    section.set_footer_distance(guide.header_footer_distance);

    overwrite_first_paragraph(doc, HeaderFooterKind::Header, &guide.header_text, guide)?;
    overwrite_first_paragraph(doc, HeaderFooterKind::Footer, &guide.footer_text, guide)?;
    Ok(())
}

fn overwrite_first_paragraph(
    doc: &mut Document,
    kind: HeaderFooterKind,
    text: &str,
    guide: &StyleGuide,
) -> Result<()> {
    let part = doc.section_part_mut(kind)?;
    let paragraph = part
        .first_paragraph_mut()
        .ok_or_else(|| Error::MissingParagraph(kind.name().to_string()))?;

    let mut run = Run::from_text(text);
    run.set_font_size_pt(guide.header_footer_size_pt);
    run.set_bold(true);
    paragraph.replace_content(run);
    paragraph.set_alignment(ParagraphAlignment::Center);

    log::debug!("Wrote {} text {:?}", kind.name(), text);
    Ok(())
}

/// Append a centered paragraph holding a PAGE field to the default footer
pub fn append_page_number(doc: &mut Document) -> Result<()> {
    let mut paragraph = Paragraph::default();
    paragraph.set_alignment(ParagraphAlignment::Center);
    paragraph.add_run(Run::page_number_field());

    doc.section_part_mut(HeaderFooterKind::Footer)?
        .add_paragraph(paragraph);
    Ok(())
}
