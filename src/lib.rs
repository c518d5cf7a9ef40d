//! # docx-restyle
//!
//! Rewrites the formatting of a DOCX document to a fixed institutional
//! style guide: default font, paragraph styles chosen by a small set of
//! lexical and positional rules, table styling, header/footer text and a
//! page-number field.
//!
//! ## Features
//!
//! - Ordered paragraph rules, testable on their own ([`format::classify`])
//! - Round-trip preservation (unknown parts and elements are kept intact)
//! - Header and footer parts are created when a document lacks them
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_restyle::{format_document, Formatter, StyleGuide};
//!
//! // Default style guide
//! format_document("syllabus.docx", "formatted_syllabus.docx")?;
//!
//! // Custom header text
//! let formatter = Formatter::new(StyleGuide::default().with_header_text("2025 Batch"));
//! formatter.format_file("syllabus.docx", "out.docx")?;
//! ```

pub mod document;
pub mod error;
pub mod format;
pub mod job;
pub mod opc;
pub mod xml;

pub use document::Document;
pub use error::{Error, Result};
pub use format::{format_document, Formatter, StyleGuide};
pub use job::FormatJob;
