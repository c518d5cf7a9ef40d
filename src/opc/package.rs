//! OPC Package implementation
//!
//! Handles reading and writing DOCX files as ZIP packages

use crate::error::{Error, Result};
use crate::opc::relationships::rel_types;
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// An OPC package (ZIP-based container for DOCX, XLSX, PPTX, etc.)
///
/// Parts are written back in the order the archive listed them; parts added
/// later follow at the end.
#[derive(Debug)]
pub struct Package {
    /// All parts in the package
    parts: HashMap<PartUri, Part>,
    /// Archive order of the parts
    order: Vec<PartUri>,
    /// Package-level relationships (/_rels/.rels)
    relationships: Relationships,
    /// Content types ([Content_Types].xml)
    content_types: ContentTypes,
}

impl Package {
    /// Create a new empty package
    pub fn new() -> Self {
        Self {
            parts: HashMap::new(),
            order: Vec::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    /// Open a package from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Open a package from a reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut package = Self::new();

        // Step 1: Read [Content_Types].xml
        package.content_types = Self::read_content_types(&mut archive)?;

        // Step 2: Read all parts, setting relationship files aside
        let mut rels = package.read_parts(&mut archive)?;

        // Step 3: Package relationships (/_rels/.rels)
        if let Some(xml) = rels.remove(&PartUri::new("/_rels/.rels")?) {
            package.relationships = Relationships::from_xml(&xml)?;
        }

        // Step 4: Attach part relationships to their source parts
        for part in package.parts.values_mut() {
            if let Some(xml) = rels.remove(&part.relationships_uri()) {
                part.set_relationships(Relationships::from_xml(&xml)?);
            }
        }
        for orphan in rels.keys() {
            log::debug!("Dropping relationships without a source part: {}", orphan);
        }

        log::debug!("Opened package with {} parts", package.parts.len());
        Ok(package)
    }

    /// Save the package to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Save the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(Cursor::new(&mut buf))?;
        Ok(buf)
    }

    /// Write the package to a writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        // Write [Content_Types].xml
        zip.start_file("[Content_Types].xml", options)?;
        self.content_types.write_to(&mut zip)?;

        // Write package relationships
        if !self.relationships.is_empty() {
            zip.start_file("_rels/.rels", options)?;
            self.relationships.write_to(&mut zip)?;
        }

        // Write all parts, each followed by its relationships
        for part in self.parts_in_order() {
            zip.start_file(part.uri().zip_path(), options)?;
            zip.write_all(part.data())?;

            if let Some(rels) = part.relationships().filter(|r| !r.is_empty()) {
                zip.start_file(part.relationships_uri().zip_path(), options)?;
                rels.write_to(&mut zip)?;
            }
        }

        zip.finish()?;
        Ok(())
    }

    /// Get a part by URI
    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.get(uri)
    }

    /// Get a mutable part by URI
    pub fn part_mut(&mut self, uri: &PartUri) -> Option<&mut Part> {
        self.parts.get_mut(uri)
    }

    /// Add a part to the package, registering its content type.
    ///
    /// A part with the same name is replaced in place.
    pub fn add_part(&mut self, part: Part) {
        let uri = part.uri().clone();
        self.content_types.add_override(&uri, part.content_type());
        if self.parts.insert(uri.clone(), part).is_none() {
            self.order.push(uri);
        }
    }

    /// Add `part` and link it from the part at `source` with a relationship
    /// of type `rel_type`; returns the new relationship id
    pub fn add_related_part(&mut self, source: &PartUri, part: Part, rel_type: &str) -> Result<String> {
        let target = part.uri().target_from(source);
        let source_part = self
            .parts
            .get_mut(source)
            .ok_or_else(|| Error::MissingPart(source.to_string()))?;
        let r_id = source_part.ensure_relationships().add(rel_type, &target);

        log::debug!("Added {} ({} from {})", part.uri(), r_id, source);
        self.add_part(part);
        Ok(r_id)
    }

    /// Part URIs in archive order
    pub fn part_uris(&self) -> impl Iterator<Item = &PartUri> {
        self.order.iter()
    }

    /// Get package-level relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Get content types
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// URI of the main document part, from the package relationships
    pub fn main_document_uri(&self) -> Option<PartUri> {
        let rel = self.relationships.by_type(rel_types::OFFICE_DOCUMENT)?;
        PartUri::new(&rel.target).ok()
    }

    /// Get the main document part
    pub fn main_document_part(&self) -> Option<&Part> {
        self.parts.get(&self.main_document_uri()?)
    }

    /// Add a package-level relationship
    pub fn add_relationship(&mut self, rel_type: &str, target: &str) -> String {
        self.relationships.add(rel_type, target)
    }

    /// First free part name `{stem}{n}.{ext}` next to `near`, counting
    /// from 1 (`/word/header1.xml`, `/word/header2.xml`, ...)
    pub fn next_part_uri(&self, near: &PartUri, stem: &str, ext: &str) -> Result<PartUri> {
        let mut n = 1;
        loop {
            let uri = near.sibling(&format!("{}{}.{}", stem, n, ext))?;
            if !self.parts.contains_key(&uri) {
                return Ok(uri);
            }
            n += 1;
        }
    }

    // === Private methods ===

    fn parts_in_order(&self) -> impl Iterator<Item = &Part> {
        self.order.iter().filter_map(|uri| self.parts.get(uri))
    }

    fn read_content_types<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<ContentTypes> {
        let mut file = archive
            .by_name("[Content_Types].xml")
            .map_err(|_| Error::MissingPart("[Content_Types].xml".into()))?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        ContentTypes::from_xml(&content)
    }

    /// Read every entry into a part; relationship files are returned as
    /// XML keyed by their own URI
    fn read_parts<R: Read + Seek>(
        &mut self,
        archive: &mut ZipArchive<R>,
    ) -> Result<HashMap<PartUri, String>> {
        let mut rels = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories and the content types stream
            if name.ends_with('/') || name == "[Content_Types].xml" {
                continue;
            }

            let uri = PartUri::new(&name)?;
            if name.contains("_rels/") && name.ends_with(".rels") {
                let mut content = String::new();
                file.read_to_string(&mut content)?;
                rels.insert(uri, content);
                continue;
            }

            let content_type = self
                .content_types
                .get(&uri)
                .unwrap_or("application/octet-stream")
                .to_string();

            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            self.order.push(uri.clone());
            self.parts.insert(uri.clone(), Part::new(uri, content_type, data));
        }

        Ok(rels)
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}
