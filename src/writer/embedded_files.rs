//! Embedded files.
//!
//! An embedded file is an `/EmbeddedFile` stream plus a `/Filespec`
//! dictionary that names it. File attachment annotations point at the
//! file specification.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::{Document, EmbeddedFile};
//!
//! let mut doc = Document::default();
//! let spec = doc.add_embedded(
//!     EmbeddedFile::new("data.csv", b"a,b\n1,2\n".to_vec())
//!         .with_description("Monthly sales data")
//!         .with_mime_type("text/csv"),
//! )?;
//! # let _ = spec;
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

use super::document::Document;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectId};
use md5::{Digest, Md5};
use std::path::Path;

/// A file to embed.
#[derive(Debug, Clone)]
pub struct EmbeddedFile {
    /// File name shown by readers
    pub name: String,
    /// File contents
    pub data: Vec<u8>,
    /// Optional description
    pub description: Option<String>,
    /// MIME type (e.g. "text/plain")
    pub mime_type: Option<String>,
}

impl EmbeddedFile {
    /// File with a name and contents.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            description: None,
            mime_type: None,
        }
    }

    /// Set the description (`/Desc`).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the MIME type (`/Subtype`).
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    fn stream_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::with_type("EmbeddedFile");
        if let Some(mime) = &self.mime_type {
            // MIME types are names with '/' escaped as #2F
            dict.add_name("Subtype", mime);
        }
        let mut params = Dictionary::new();
        params.add_integer("Size", self.data.len() as i64);
        params.insert("CheckSum", Object::HexString(Md5::digest(&self.data).to_vec()));
        dict.add_dictionary("Params", params);
        dict
    }

    fn file_spec(&self, stream: ObjectId) -> Result<Dictionary> {
        let mut dict = Dictionary::with_type("Filespec");
        dict.add_pdf_string("F", &self.name)?;
        dict.add_pdf_string("UF", &self.name)?;
        if let Some(desc) = &self.description {
            dict.add_pdf_string("Desc", desc)?;
        }
        let mut ef = Dictionary::new();
        ef.add_reference("F", stream);
        dict.add_dictionary("EF", ef);
        Ok(dict)
    }
}

impl Document {
    /// Embed `data` under `name`. Returns the file specification.
    pub fn add_embedded_file(&mut self, name: &str, data: &[u8]) -> Result<ObjectId> {
        self.add_embedded(EmbeddedFile::new(name, data.to_vec()))
    }

    /// Embed a file read from disk, named after its file name.
    pub fn add_embedded_file_from_path(&mut self, path: impl AsRef<Path>) -> Result<ObjectId> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| Error::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.add_embedded(EmbeddedFile::new(name, data))
    }

    /// Embed a file described by an [`EmbeddedFile`]. Returns the file
    /// specification.
    pub fn add_embedded(&mut self, file: EmbeddedFile) -> Result<ObjectId> {
        let stream = self.add_stream(file.stream_dictionary(), &file.data)?;
        let spec = file.file_spec(stream)?;
        let id = self.add_object(spec);
        log::debug!("Embedded {} ({} bytes) as object {}", file.name, file.data.len(), id.number());
        Ok(id)
    }
}
