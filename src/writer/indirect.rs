//! Indirect objects and the close-phase hook.
//!
//! Every object in the directory carries an [`ObjectRole`]: the state it
//! needs to compute the dictionary entries that depend on the complete
//! graph (kids arrays, counts, selected values, merged resources). The
//! directory calls [`Finalize::finalize`] on every role once, with a
//! read-only view of all objects, before any byte is written.

use super::acroform::{AcroFormState, FieldState, PageNodeState, RadioGroupState};
use super::annotation_builder::LinkActionState;
use super::destinations::LocationMarkers;
use super::outline_builder::OutlineState;
use super::page::{ContentsState, PageState, PageTreeState};
use super::resources::ResourceCode;
use super::shading::AxialShadingState;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::object::{ObjectId, ObjectKind};
use bytes::BytesMut;

/// Computes close-time dictionary entries for one object.
pub(crate) trait Finalize {
    /// Return the entries to merge into the owning object's dictionary.
    fn finalize(&self, ctx: &CloseContext<'_>) -> Result<Dictionary>;
}

/// Read-only view of the document handed to every close hook.
pub(crate) struct CloseContext<'a> {
    objects: &'a [IndirectObject],
    markers: &'a LocationMarkers,
}

impl<'a> CloseContext<'a> {
    pub(crate) fn new(objects: &'a [IndirectObject], markers: &'a LocationMarkers) -> Self {
        Self { objects, markers }
    }

    /// Look up a registered object.
    pub(crate) fn object(&self, id: ObjectId) -> Result<&'a IndirectObject> {
        self.objects
            .get(id.index())
            .ok_or_else(|| Error::integrity(format!("object {} is not registered", id.number())))
    }

    /// Location markers defined for the document.
    pub(crate) fn markers(&self) -> &'a LocationMarkers {
        self.markers
    }
}

/// Per-kind state used by the close hook.
#[derive(Debug, Clone, Default)]
pub(crate) enum ObjectRole {
    /// Nothing deferred
    #[default]
    Plain,
    /// Document catalog (named destinations)
    Catalog,
    /// Page tree root
    PageTree(PageTreeState),
    /// Page
    Page(PageState),
    /// Content stream or form XObject
    Contents(ContentsState),
    /// Outline root or bookmark
    Outline(OutlineState),
    /// Interactive form dictionary
    AcroForm(AcroFormState),
    /// Per-page node grouping form fields
    AcroPageNode(PageNodeState),
    /// Radio button group field
    RadioGroup(RadioGroupState),
    /// Form field widget
    Field(FieldState),
    /// Axial shading
    AxialShading(AxialShadingState),
    /// Link annotation pointing at a location marker
    LinkAction(LinkActionState),
}

impl Finalize for ObjectRole {
    fn finalize(&self, ctx: &CloseContext<'_>) -> Result<Dictionary> {
        match self {
            ObjectRole::Plain => Ok(Dictionary::new()),
            ObjectRole::Catalog => ctx.markers().named_destinations(),
            ObjectRole::PageTree(state) => state.finalize(ctx),
            ObjectRole::Page(state) => state.finalize(ctx),
            ObjectRole::Contents(state) => state.finalize(ctx),
            ObjectRole::Outline(state) => state.finalize(ctx),
            ObjectRole::AcroForm(state) => state.finalize(ctx),
            ObjectRole::AcroPageNode(state) => state.finalize(ctx),
            ObjectRole::RadioGroup(state) => state.finalize(ctx),
            ObjectRole::Field(state) => state.finalize(ctx),
            ObjectRole::AxialShading(state) => state.finalize(ctx),
            ObjectRole::LinkAction(state) => state.finalize(ctx),
        }
    }
}

/// One indirect object in the directory.
#[derive(Debug)]
pub(crate) struct IndirectObject {
    pub(crate) id: ObjectId,
    pub(crate) kind: ObjectKind,
    pub(crate) dict: Dictionary,
    /// Stream payload, before compression and encryption
    pub(crate) payload: BytesMut,
    pub(crate) resource_code: Option<ResourceCode>,
    /// File offset of the `n 0 obj` header, set once when written
    pub(crate) offset: Option<u64>,
    pub(crate) no_compression: bool,
    pub(crate) no_encryption: bool,
    pub(crate) role: ObjectRole,
}

impl IndirectObject {
    pub(crate) fn new(id: ObjectId, kind: ObjectKind, dict: Dictionary, role: ObjectRole) -> Self {
        Self {
            id,
            kind,
            dict,
            payload: BytesMut::new(),
            resource_code: None,
            offset: None,
            no_compression: false,
            no_encryption: false,
            role,
        }
    }

    /// Whether the object has been written to the output.
    pub(crate) fn is_written(&self) -> bool {
        self.offset.is_some()
    }

    /// Append operator text to the stream payload.
    pub(crate) fn append_str(&mut self, text: &str) {
        self.payload.extend_from_slice(text.as_bytes());
    }

    /// Append raw bytes to the stream payload.
    pub(crate) fn append_bytes(&mut self, data: &[u8]) {
        self.payload.extend_from_slice(data);
    }
}
