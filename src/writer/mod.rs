//! PDF writing.
//!
//! ## Architecture
//!
//! ```text
//! Document (pages, resources, annotations, forms, outline ...)
//!     ↓ registers
//! [ObjectDirectory] (arena of indirect objects, numbered 1..n)
//!     ↓ close_all: every object role computes its deferred entries
//!     ↓ write_all: stream pipeline (compress → encrypt → /Length)
//! [ObjectSerializer] → [PdfBinaryWriter] (byte offsets)
//!     ↓
//! xref table + trailer
//! ```
//!
//! Builders live in their own modules as `impl Document` blocks; every
//! handle they return is an [`ObjectId`](crate::object::ObjectId).
//!
//! ```
//! use pdf_scribe::writer::{Document, DocumentConfig, OutlineStyle};
//!
//! let mut doc = Document::new(DocumentConfig::default().with_compression(false));
//! let page = doc.add_page()?;
//! doc.set_title("Minimal")?;
//! let root = doc.bookmarks_root()?;
//! doc.add_bookmark(root, OutlineStyle::new(), "Start", page, 0.0, 792.0)?;
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.ends_with(b"%%EOF\n"));
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

mod acroform;
mod annotation_builder;
mod binary_writer;
mod compression;
mod destinations;
mod directory;
mod document;
mod embedded_files;
mod font;
pub mod form_fields;
mod graphics_state;
mod indirect;
mod info;
mod layers;
mod object_serializer;
mod outline_builder;
mod page;
mod resources;
mod shading;
mod xmp_metadata;
mod xobject;
mod xref;

pub use acroform::AppearanceKind;
pub use annotation_builder::{encode_uri, FileAttachIcon, StickyNoteIcon};
pub use binary_writer::PdfBinaryWriter;
pub use compression::{compress_data, compress_if_smaller};
pub use destinations::{DestFit, MarkerScope};
pub use document::{Document, DocumentConfig};
pub use embedded_files::EmbeddedFile;
pub use font::STANDARD_FONTS;
pub use graphics_state::{BlendMode, ExtGStateBuilder};
pub use info::pdf_date;
pub use layers::Layer;
pub use object_serializer::ObjectSerializer;
pub use outline_builder::OutlineStyle;
pub use page::ContentsWriter;
pub use resources::{
    Real, ResourceCode, ResourceKind, ResourceList, ResourceRef, ResourceSignature, SignatureValue,
};
pub use shading::{AxialShading, ShadingMapping};
pub use xmp_metadata::{xmp_date, XmpWriter};
