//! Part URI handling for OPC packages

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Represents a URI to a part within an OPC package.
///
/// Part URIs are always absolute paths starting with '/'. Part names are
/// compared ASCII case-insensitively, so `/word/Document.xml` and
/// `/word/document.xml` name the same part; the original spelling is kept
/// for writing.
/// Example: `/word/document.xml`
#[derive(Clone, Debug)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Create a new PartUri from a string.
    ///
    /// The path will be normalized (leading '/' ensured, no trailing '/').
    pub fn new(path: &str) -> Result<Self> {
        let path = path.trim();

        if path.is_empty() {
            return Err(Error::InvalidPartUri("empty path".into()));
        }

        // Normalize: ensure leading '/', remove trailing '/'
        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let normalized = normalized.trim_end_matches('/').to_string();

        // Validate: no double slashes
        if normalized.contains("//") {
            return Err(Error::InvalidPartUri(format!(
                "invalid path '{}': contains double slashes",
                path
            )));
        }

        Ok(Self { path: normalized })
    }

    /// Create PartUri without validation (for internal use)
    pub(crate) fn from_string_unchecked(path: String) -> Self {
        Self { path }
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path inside the ZIP archive (no leading '/')
    pub fn zip_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }

    /// Get the file name portion
    pub fn file_name(&self) -> Option<&str> {
        self.path.rsplit('/').next()
    }

    /// Get the file extension
    pub fn extension(&self) -> Option<&str> {
        self.file_name()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// Get the parent directory URI
    pub fn parent(&self) -> Option<PartUri> {
        let pos = self.path.rfind('/')?;
        if pos == 0 {
            None
        } else {
            Some(PartUri {
                path: self.path[..pos].to_string(),
            })
        }
    }

    /// Get the relationships URI for this part.
    ///
    /// For `/word/document.xml`, returns `/word/_rels/document.xml.rels`
    pub fn relationships_uri(&self) -> PartUri {
        let file_name = self.file_name().unwrap_or("");
        let parent = self.parent().map(|p| p.path).unwrap_or_default();

        PartUri {
            path: format!("{}/_rels/{}.rels", parent, file_name),
        }
    }

    /// Resolve a relative path against this URI.
    ///
    /// For `/word/document.xml` and `../media/image1.png`, returns `/media/image1.png`
    pub fn resolve(&self, relative: &str) -> Result<PartUri> {
        if relative.starts_with('/') {
            return PartUri::new(relative);
        }

        let base_dir = self.parent().map(|p| p.path).unwrap_or_default();
        let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

        for segment in relative.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    parts.pop();
                }
                s => parts.push(s),
            }
        }

        PartUri::new(&format!("/{}", parts.join("/")))
    }

    /// Part `file_name` in the same directory as this one
    pub fn sibling(&self, file_name: &str) -> Result<PartUri> {
        let parent = self.parent().map(|p| p.path).unwrap_or_default();
        PartUri::new(&format!("{}/{}", parent, file_name))
    }

    /// Relationship target pointing at `self` from a part living at `source`.
    ///
    /// The target is relative to the source's directory, so siblings get a
    /// bare file name (`header1.xml`) and other parts a path climbing with
    /// `..` as needed (`../customXml/item1.xml`). `source.resolve(target)`
    /// gives `self` back.
    pub fn target_from(&self, source: &PartUri) -> String {
        let from = source.parent().map(|p| p.path).unwrap_or_default();
        let from: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        let (to_dirs, file) = to.split_at(to.len().saturating_sub(1));

        let common = from
            .iter()
            .zip(to_dirs)
            .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
            .count();

        let mut segments = vec![".."; from.len() - common];
        segments.extend_from_slice(&to_dirs[common..]);
        segments.extend_from_slice(file);
        segments.join("/")
    }

    fn key(&self) -> impl Iterator<Item = u8> + '_ {
        self.path.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for PartUri {
    fn eq(&self, other: &Self) -> bool {
        self.path.eq_ignore_ascii_case(&other.path)
    }
}

impl Eq for PartUri {}

impl Hash for PartUri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.key() {
            state.write_u8(b);
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for PartUri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PartUri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(other.key())
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

/// Well-known part URIs
pub mod well_known {
    use super::PartUri;

    pub fn document() -> PartUri {
        PartUri::from_string_unchecked("/word/document.xml".into())
    }

    pub fn styles() -> PartUri {
        PartUri::from_string_unchecked("/word/styles.xml".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_leading_slash() {
        let uri = PartUri::new("word/document.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/document.xml");
        assert_eq!(uri.zip_path(), "word/document.xml");
    }

    #[test]
    fn test_rejects_empty_and_double_slash() {
        assert!(PartUri::new("  ").is_err());
        assert!(PartUri::new("/word//document.xml").is_err());
    }

    #[test]
    fn test_file_name_and_extension() {
        let uri = PartUri::new("/word/footer2.xml").unwrap();
        assert_eq!(uri.file_name(), Some("footer2.xml"));
        assert_eq!(uri.extension(), Some("xml"));
        assert_eq!(PartUri::new("/word/media/noext").unwrap().extension(), None);
    }

    #[test]
    fn test_relationships_uri() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.relationships_uri().as_str(), "/word/_rels/document.xml.rels");
    }

    #[test]
    fn test_resolve_relative() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.resolve("../media/image1.png").unwrap().as_str(), "/media/image1.png");
        assert_eq!(uri.resolve("styles.xml").unwrap().as_str(), "/word/styles.xml");
        assert_eq!(uri.resolve("/word/header1.xml").unwrap().as_str(), "/word/header1.xml");
    }

    #[test]
    fn test_target_from() {
        let doc = well_known::document();
        let header = PartUri::new("/word/header1.xml").unwrap();
        let elsewhere = PartUri::new("/customXml/item1.xml").unwrap();
        let nested = PartUri::new("/word/parts/footer1.xml").unwrap();

        assert_eq!(header.target_from(&doc), "header1.xml");
        assert_eq!(elsewhere.target_from(&doc), "../customXml/item1.xml");
        assert_eq!(nested.target_from(&doc), "parts/footer1.xml");

        for target in [&header, &elsewhere, &nested] {
            assert_eq!(&doc.resolve(&target.target_from(&doc)).unwrap(), target);
        }
    }

    #[test]
    fn test_target_from_package_root() {
        let doc = well_known::document();
        let root = PartUri::new("/document.xml").unwrap();
        assert_eq!(doc.target_from(&root), "word/document.xml");
        assert_eq!(root.target_from(&doc), "../document.xml");
    }

    #[test]
    fn test_sibling() {
        let doc = well_known::document();
        assert_eq!(doc.sibling("footer3.xml").unwrap().as_str(), "/word/footer3.xml");
    }

    #[test]
    fn test_names_compare_case_insensitively() {
        use std::collections::HashMap;

        let upper = PartUri::new("/word/Document.xml").unwrap();
        let lower = well_known::document();
        assert_eq!(upper, lower);
        assert_eq!(upper.cmp(&lower), Ordering::Equal);
        assert_eq!(upper.to_string(), "/word/Document.xml");

        let mut parts = HashMap::new();
        parts.insert(upper, "main");
        assert_eq!(parts.get(&lower), Some(&"main"));
    }
}
