//! Document session and file writer.
//!
//! A [`Document`] owns the object directory, the resource registry and
//! every per-document table (location markers, encryption settings). Pages,
//! resources, annotations and form fields are added through methods spread
//! over the builder modules; the final write consumes the document.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::{Document, DocumentConfig};
//! use pdf_scribe::geometry::{Color, ColorTarget};
//!
//! let mut doc = Document::new(DocumentConfig::default());
//! let page = doc.add_page()?;
//! let font = doc.standard_font("Helvetica")?;
//! let contents = doc.add_contents(page)?;
//! doc.contents(contents)?
//!     .set_color(Color::rgb(200, 0, 0), ColorTarget::NonStroking)?
//!     .begin_text()?
//!     .set_font(font, 12.0)?
//!     .move_text(72.0, 720.0)?
//!     .show_text("Hello")?
//!     .end_text()?;
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

use super::binary_writer::PdfBinaryWriter;
use super::destinations::LocationMarkers;
use super::directory::{ObjectDirectory, WriteOptions};
use super::indirect::{IndirectObject, ObjectRole};
use super::page::PageTreeState;
use super::resources::ResourceRegistry;
use super::xref::{self, Trailer};
use crate::dictionary::Dictionary;
use crate::encryption::{generate_file_id, EncryptionConfig, StandardSecurity};
use crate::error::{Error, Result};
use crate::geometry::{PaperType, Size, UnitOfMeasure};
use crate::object::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Binary marker written on the second line of the header.
const BINARY_MARKER: [u8; 4] = [0xE2, 0xE3, 0xCF, 0xD3];

/// Document configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Default page size, in user units
    pub page_size: Size,
    /// User unit of measure
    pub unit: UnitOfMeasure,
    /// Whether streams are Flate-compressed when that shrinks them
    pub compress: bool,
    /// PDF version written in the header (e.g. "1.7")
    pub version: String,
    /// Producer written to the Info dictionary
    pub producer: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_size: PaperType::Letter.size(),
            unit: UnitOfMeasure::Point,
            compress: true,
            version: "1.7".to_string(),
            producer: format!("pdf_scribe {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DocumentConfig {
    /// Default configuration: Letter pages, points, compression on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default page size, in user units.
    pub fn with_page_size(mut self, size: Size) -> Self {
        self.page_size = size;
        self
    }

    /// Set the user unit of measure.
    pub fn with_unit(mut self, unit: UnitOfMeasure) -> Self {
        self.unit = unit;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the PDF version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the producer string.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| Error::invalid(format!("{}: {}", path.display(), e)))
    }
}

/// One PDF document under construction.
#[derive(Debug)]
pub struct Document {
    pub(crate) config: DocumentConfig,
    pub(crate) directory: ObjectDirectory,
    pub(crate) registry: ResourceRegistry,
    pub(crate) catalog: ObjectId,
    pub(crate) page_tree: ObjectId,
    pub(crate) pages: Vec<ObjectId>,
    pub(crate) info: Option<ObjectId>,
    pub(crate) outline_root: Option<ObjectId>,
    pub(crate) acro_form: Option<ObjectId>,
    pub(crate) markers: LocationMarkers,
    /// Layers with their default visibility
    pub(crate) layers: Vec<(ObjectId, bool)>,
    pub(crate) encryption: Option<EncryptionConfig>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}

impl Document {
    /// Create a document with its catalog and page tree root.
    pub fn new(config: DocumentConfig) -> Self {
        let mut directory = ObjectDirectory::new();
        let catalog = directory.register(ObjectKind::Dictionary, Dictionary::with_type("Catalog"), ObjectRole::Catalog);
        let page_tree = directory.register(
            ObjectKind::Dictionary,
            Dictionary::with_type("Pages"),
            ObjectRole::PageTree(PageTreeState::default()),
        );
        let mut doc = Self {
            config,
            directory,
            registry: ResourceRegistry::new(),
            catalog,
            page_tree,
            pages: Vec::new(),
            info: None,
            outline_root: None,
            acro_form: None,
            markers: LocationMarkers::default(),
            layers: Vec::new(),
            encryption: None,
        };
        if let Ok(obj) = doc.directory.get_mut(catalog) {
            obj.dict.add_reference("Pages", page_tree);
        }
        doc
    }

    /// Configuration the document was created with.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Catalog object.
    pub fn catalog(&self) -> ObjectId {
        self.catalog
    }

    /// Page tree root object.
    pub fn page_tree(&self) -> ObjectId {
        self.page_tree
    }

    /// Number of objects registered so far, the free object included.
    pub fn object_count(&self) -> usize {
        self.directory.len()
    }

    /// Dictionary of a registered object.
    pub fn dictionary(&self, id: ObjectId) -> Result<&Dictionary> {
        Ok(&self.directory.get(id)?.dict)
    }

    /// Mutable dictionary of a registered object, for entries the builders
    /// do not cover.
    pub fn dictionary_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary> {
        Ok(&mut self.directory.get_mut(id)?.dict)
    }

    /// Register a plain dictionary object.
    pub fn add_object(&mut self, dict: Dictionary) -> ObjectId {
        self.directory.register(ObjectKind::Dictionary, dict, ObjectRole::Plain)
    }

    /// Register a plain stream object with the given payload.
    pub fn add_stream(&mut self, dict: Dictionary, data: &[u8]) -> Result<ObjectId> {
        let id = self.directory.register(ObjectKind::Stream, dict, ObjectRole::Plain);
        self.directory.get_mut(id)?.append_bytes(data);
        Ok(id)
    }

    /// Encrypt the output with the standard security handler.
    pub fn set_encryption(&mut self, config: EncryptionConfig) {
        self.encryption = Some(config);
    }

    /// Points per user unit.
    pub(crate) fn scale(&self) -> f64 {
        self.config.unit.scale_factor()
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Result<&mut IndirectObject> {
        self.directory.get_mut(id)
    }

    /// Zero-based index of a page, or `GraphIntegrity` when `page` is not
    /// one of this document's pages.
    pub(crate) fn page_index(&self, page: ObjectId) -> Result<usize> {
        self.pages
            .iter()
            .position(|p| *p == page)
            .ok_or_else(|| Error::integrity(format!("object {} is not a page", page.number())))
    }

    /// Write the document to a file.
    pub fn create_file(self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(BufWriter::new(file))
    }

    /// Write the document to memory.
    pub fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Close every object and write the complete file to `sink`.
    ///
    /// On error the partial output must be discarded.
    pub fn write_to<W: Write>(mut self, sink: W) -> Result<()> {
        let (security, encrypt, file_id) = match self.encryption.take() {
            Some(config) => {
                let file_id = generate_file_id();
                // the metadata stream is always written in cleartext
                let encrypt_metadata = !self.directory.get(self.catalog)?.dict.contains("Metadata");
                let security = StandardSecurity::new(&config, &file_id, encrypt_metadata);
                let id = self.directory.register(
                    ObjectKind::Dictionary,
                    security.encrypt_dictionary(),
                    ObjectRole::Plain,
                );
                self.directory.get_mut(id)?.no_encryption = true;
                (Some(security), Some(id), Some(file_id))
            },
            None => (None, None, None),
        };

        log::debug!(
            "Closing {} objects ({} shared resources, {} location markers)",
            self.directory.len(),
            self.registry.len(),
            self.markers.len()
        );
        self.directory.close_all(&self.markers)?;

        let mut w = PdfBinaryWriter::new(sink);
        w.write_str(&format!("%PDF-{}\n%", self.config.version))?;
        w.write_bytes(&BINARY_MARKER)?;
        w.write_str("\n")?;

        let options = WriteOptions {
            compress: self.config.compress,
            security: security.as_ref(),
        };
        self.directory.write_all(&mut w, options, self.catalog)?;
        self.directory.write_object(self.catalog, &mut w, options)?;

        let trailer = Trailer {
            root: self.catalog,
            info: self.info,
            encrypt,
            file_id,
        };
        xref::write_xref_and_trailer(&mut w, &self.directory, &trailer)?;
        w.flush()?;
        log::info!(
            "PDF written: {} objects, {} bytes",
            self.directory.len(),
            w.position()
        );
        Ok(())
    }
}
