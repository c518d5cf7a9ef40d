//! Reformatting passes
//!
//! A [`Formatter`] rewrites a document in five passes, always in this order:
//!
//! 1. the Normal style's font and size,
//! 2. every body paragraph, styled by the first matching entry of [`RULES`],
//! 3. every body table,
//! 4. the first section's header/footer text and distances,
//! 5. a PAGE field appended to the default footer.
//!
//! Any error aborts the run; nothing is written in that case.

mod classify;
mod config;
mod section;
mod table;
mod text;

pub use classify::{classify, Candidate, ParagraphStyle, Rule, RuleKind, RULES};
pub use config::{StyleGuide, DEFAULT_FOOTER_TEXT, DEFAULT_HEADER_TEXT};
pub use text::{is_numeric_only, sentence_case};

use crate::document::{Document, Paragraph, Run};
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Applies a [`StyleGuide`] to documents
#[derive(Clone, Debug, Default)]
pub struct Formatter {
    guide: StyleGuide,
}

impl Formatter {
    /// Create a formatter for the given style guide
    pub fn new(guide: StyleGuide) -> Self {
        Self { guide }
    }

    /// The style guide in use
    pub fn guide(&self) -> &StyleGuide {
        &self.guide
    }

    /// Reformat the file at `input` and write the result to `output`.
    ///
    /// The input file is only read.
    pub fn format_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<()> {
        let (input, output) = (input.as_ref(), output.as_ref());
        log::info!("Formatting {} -> {}", input.display(), output.display());

        let mut doc = Document::open(input)?;
        self.apply(&mut doc)?;
        doc.save(output)?;

        log::info!("Wrote {}", output.display());
        Ok(())
    }

    /// Reformat an in-memory DOCX
    pub fn format_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut doc = Document::from_bytes(bytes)?;
        self.apply(&mut doc)?;
        doc.to_bytes()
    }

    /// Run all passes on `doc`
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        self.set_default_font(doc)?;
        self.style_paragraphs(doc);
        self.style_tables(doc);
        section::write_header_footer(doc, &self.guide)?;
        section::append_page_number(doc)?;
        Ok(())
    }

    fn set_default_font(&self, doc: &mut Document) -> Result<()> {
        let props = doc
            .styles_mut()?
            .paragraph_style_mut("Normal")
            .run_properties_mut();

        let fonts = props.fonts.get_or_insert_with(Default::default);
        fonts.set_family(&self.guide.font_name);
        fonts.set_east_asia(&self.guide.font_name);
        props.set_size_pt(self.guide.font_size_pt);

        log::debug!(
            "Normal style set to {} {}pt",
            self.guide.font_name,
            self.guide.font_size_pt
        );
        Ok(())
    }

    fn style_paragraphs(&self, doc: &mut Document) {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut skipped = 0;

        for (index, paragraph) in doc.paragraphs_mut().enumerate() {
            let text = paragraph.text();
            let Some(rule) = classify(index, &text) else {
                skipped += 1;
                continue;
            };
            self.apply_style(paragraph, text.trim(), &rule.style);
            *counts.entry(rule.kind.name()).or_default() += 1;
        }

        log::debug!("Styled paragraphs {:?}, {} blank skipped", counts, skipped);
    }

    fn apply_style(&self, paragraph: &mut Paragraph, text: &str, style: &ParagraphStyle) {
        let mut run = Run::from_text(&sentence_case(text));
        run.set_font_size_pt(style.size_pt);
        if style.bold {
            run.set_bold(true);
        }
        if style.accent {
            run.set_color(self.guide.accent_color.as_str());
        }

        paragraph.replace_content(run);
        paragraph.set_alignment(style.alignment);
        if let Some(spacing) = style.line_spacing {
            paragraph.set_line_spacing(spacing);
        }
    }

    fn style_tables(&self, doc: &mut Document) {
        let mut tables = 0;
        let mut cells = 0;
        for t in doc.tables_mut() {
            tables += 1;
            cells += table::style_table(t, &self.guide);
        }
        log::debug!("Styled {} tables, {} cells", tables, cells);
    }
}

/// Reformat `input` with the default style guide and write it to `output`
pub fn format_document<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    Formatter::default().format_file(input, output)
}
