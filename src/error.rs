//! Error types for docx-restyle

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML encoding error: {0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Missing required part: {0}")]
    MissingPart(String),

    #[error("Invalid part URI: {0}")]
    InvalidPartUri(String),

    #[error("Missing attribute '{attr}' on element '{element}'")]
    MissingAttribute { element: String, attr: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Document has no section properties")]
    MissingSection,

    #[error("{0} has no paragraph to overwrite")]
    MissingParagraph(String),

    #[error("Only .docx files are supported: {0}")]
    UnsupportedExtension(String),

    #[error("No file selected")]
    EmptyFileName,

    #[error("Output path would overwrite the input: {}", .0.display())]
    OutputIsInput(PathBuf),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by the
    /// document or the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedExtension(_) | Error::EmptyFileName | Error::OutputIsInput(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        assert!(Error::EmptyFileName.is_user_error());
        assert!(Error::UnsupportedExtension("notes.pdf".into()).is_user_error());
        assert!(!Error::MissingSection.is_user_error());
        assert!(!Error::InvalidDocument("broken".into()).is_user_error());
    }
}
