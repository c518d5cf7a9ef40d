//! Part representation for OPC packages

use crate::opc::{PartUri, Relationships};

/// A part within an OPC package
#[derive(Clone, Debug)]
pub struct Part {
    /// Part URI
    uri: PartUri,
    /// Content type
    content_type: String,
    /// Part data
    data: Vec<u8>,
    /// Part relationships (if any)
    relationships: Option<Relationships>,
}

impl Part {
    /// Create a new part
    pub fn new(uri: PartUri, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            uri,
            content_type: content_type.into(),
            data,
            relationships: None,
        }
    }

    /// Get the part URI
    pub fn uri(&self) -> &PartUri {
        &self.uri
    }

    /// Get the content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the raw data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get data as UTF-8 string
    pub fn data_as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    /// Replace the data, keeping relationships
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// Get relationships
    pub fn relationships(&self) -> Option<&Relationships> {
        self.relationships.as_ref()
    }

    /// Set relationships
    pub fn set_relationships(&mut self, rels: Relationships) {
        self.relationships = Some(rels);
    }

    /// Ensure relationships exist, creating if needed
    pub fn ensure_relationships(&mut self) -> &mut Relationships {
        self.relationships.get_or_insert_with(Relationships::new)
    }

    /// Get the relationships URI for this part
    pub fn relationships_uri(&self) -> PartUri {
        self.uri.relationships_uri()
    }

    /// Resolve the target of one of this part's relationships
    pub fn related_uri(&self, r_id: &str) -> Option<PartUri> {
        let rel = self.relationships.as_ref()?.get(r_id)?;
        self.uri.resolve(&rel.target).ok()
    }
}
