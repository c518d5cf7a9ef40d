//! Style guide constants

use crate::document::TWIPS_PER_CM;

/// Header text of the institutional template
pub const DEFAULT_HEADER_TEXT: &str = "KG College of Arts and Science (Autonomous) – 2024 Batch";
/// Footer text of the institutional template
pub const DEFAULT_FOOTER_TEXT: &str = "Department of Computer Science";

/// The configurable parts of the style guide.
///
/// The paragraph rules themselves are fixed; see [`RULES`](super::RULES).
#[derive(Clone, Debug, PartialEq)]
pub struct StyleGuide {
    /// Text written into the first paragraph of the default header
    pub header_text: String,
    /// Text written into the first paragraph of the default footer
    pub footer_text: String,
    /// Font family of the Normal style
    pub font_name: String,
    /// Font size of the Normal style and body text, in points
    pub font_size_pt: f32,
    /// Size of header and footer text, in points
    pub header_footer_size_pt: f32,
    /// RGB hex color of titles and degree headings
    pub accent_color: String,
    /// RGB hex fill of table header cells
    pub header_row_fill: String,
    /// Distance of header and footer from the page edge, in twips
    pub header_footer_distance: u32,
}

impl Default for StyleGuide {
    fn default() -> Self {
        StyleGuide {
            header_text: DEFAULT_HEADER_TEXT.to_string(),
            footer_text: DEFAULT_FOOTER_TEXT.to_string(),
            font_name: "Times New Roman".to_string(),
            font_size_pt: 12.0,
            header_footer_size_pt: 11.0,
            accent_color: "0070C0".to_string(),
            header_row_fill: "D9D9D9".to_string(),
            header_footer_distance: TWIPS_PER_CM,
        }
    }
}

impl StyleGuide {
    /// Set the header text
    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = text.into();
        self
    }

    /// Set the footer text
    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = text.into();
        self
    }

    /// Set the body font family
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Set the body font size in points
    pub fn with_font_size_pt(mut self, size: f32) -> Self {
        self.font_size_pt = size;
        self
    }

    /// Set the accent color (RGB hex, no '#')
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = color.into();
        self
    }

    /// Set the table header fill (RGB hex, no '#')
    pub fn with_header_row_fill(mut self, fill: impl Into<String>) -> Self {
        self.header_row_fill = fill.into();
        self
    }

    /// Set the header/footer distance in twips
    pub fn with_header_footer_distance(mut self, twips: u32) -> Self {
        self.header_footer_distance = twips;
        self
    }
}
