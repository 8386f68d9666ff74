//! Indirect object directory.
//!
//! Owns every object of a document, assigns object numbers in
//! registration order and drives the close and write phases:
//!
//! 1. [`ObjectDirectory::close_all`] runs the close hook of every object
//!    against a read-only view of the whole graph, merges the results and
//!    validates every reference.
//! 2. [`ObjectDirectory::write_all`] writes each object once, in number
//!    order, recording the file offset of its header.

use super::binary_writer::PdfBinaryWriter;
use super::compression;
use super::destinations::LocationMarkers;
use super::indirect::{CloseContext, Finalize, IndirectObject, ObjectRole};
use super::object_serializer::ObjectSerializer;
use crate::dictionary::Dictionary;
use crate::encryption::StandardSecurity;
use crate::error::{Error, Result};
use crate::object::{ObjectId, ObjectKind};
use std::io::Write;

/// Settings that apply while objects are written.
#[derive(Clone, Copy)]
pub(crate) struct WriteOptions<'a> {
    pub(crate) compress: bool,
    pub(crate) security: Option<&'a StandardSecurity>,
}

/// Arena of indirect objects. Object number equals directory index; slot 0
/// is the free object.
#[derive(Debug)]
pub(crate) struct ObjectDirectory {
    objects: Vec<IndirectObject>,
    closed: bool,
}

impl ObjectDirectory {
    pub(crate) fn new() -> Self {
        let free = IndirectObject::new(ObjectId(0), ObjectKind::Free, Dictionary::new(), ObjectRole::Plain);
        Self {
            objects: vec![free],
            closed: false,
        }
    }

    /// Append an object and return its number. Numbers are never reused.
    pub(crate) fn register(&mut self, kind: ObjectKind, dict: Dictionary, role: ObjectRole) -> ObjectId {
        debug_assert!(!self.closed, "object registered after the close phase");
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(IndirectObject::new(id, kind, dict, role));
        id
    }

    /// Number of objects, the free object included.
    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn get(&self, id: ObjectId) -> Result<&IndirectObject> {
        self.objects
            .get(id.index())
            .ok_or_else(|| Error::integrity(format!("object {} is not registered", id.number())))
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Result<&mut IndirectObject> {
        self.objects
            .get_mut(id.index())
            .ok_or_else(|| Error::integrity(format!("object {} is not registered", id.number())))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &IndirectObject> {
        self.objects.iter()
    }

    /// Run every close hook, then validate all references.
    ///
    /// Hooks see the graph as it was before any of them ran; their entries
    /// are merged only after all of them succeeded.
    pub(crate) fn close_all(&mut self, markers: &LocationMarkers) -> Result<()> {
        if self.closed {
            return Err(Error::AlreadyFinalized);
        }
        log::debug!("Closing {} objects", self.objects.len());

        let updates = {
            let ctx = CloseContext::new(&self.objects, markers);
            self.objects
                .iter()
                .map(|obj| obj.role.finalize(&ctx))
                .collect::<Result<Vec<Dictionary>>>()?
        };
        for (obj, update) in self.objects.iter_mut().zip(updates) {
            obj.dict.extend(update);
        }
        self.closed = true;

        self.validate_references()
    }

    /// Every reference must name a registered object that is not free.
    pub(crate) fn validate_references(&self) -> Result<()> {
        for obj in &self.objects {
            for target in obj.dict.references() {
                match self.objects.get(target.index()) {
                    Some(found) if found.kind != ObjectKind::Free => {},
                    Some(_) => {
                        return Err(Error::integrity(format!(
                            "object {} references the free object {}",
                            obj.id.number(),
                            target.number()
                        )))
                    },
                    None => {
                        return Err(Error::integrity(format!(
                            "object {} references object {} beyond the directory ({} objects)",
                            obj.id.number(),
                            target.number(),
                            self.objects.len()
                        )))
                    },
                }
            }
        }
        Ok(())
    }

    /// Write every object except `deferred`, in number order.
    ///
    /// Objects already written are skipped, so a second call writes
    /// nothing.
    pub(crate) fn write_all<W: Write>(
        &mut self,
        w: &mut PdfBinaryWriter<W>,
        options: WriteOptions<'_>,
        deferred: ObjectId,
    ) -> Result<()> {
        log::debug!("Writing {} objects", self.objects.len());
        for index in 0..self.objects.len() {
            let id = ObjectId(index as u32);
            if id != deferred {
                self.write_object(id, w, options)?;
            }
        }
        Ok(())
    }

    /// Write one object. Returns `false` when it was skipped (free or
    /// already written).
    pub(crate) fn write_object<W: Write>(
        &mut self,
        id: ObjectId,
        w: &mut PdfBinaryWriter<W>,
        options: WriteOptions<'_>,
    ) -> Result<bool> {
        let obj = self.get_mut(id)?;
        if obj.kind == ObjectKind::Free || obj.is_written() {
            return Ok(false);
        }

        let handler = match options.security {
            Some(security) if !obj.no_encryption => Some(security.handler()),
            _ => None,
        };

        let payload = if obj.kind == ObjectKind::Stream {
            Some(encode_stream(obj, options.compress, handler)?)
        } else {
            None
        };

        let serializer = match handler {
            Some(handler) => ObjectSerializer::encrypted(handler, id),
            None => ObjectSerializer::plain(),
        };
        let dict_bytes = serializer.serialize_dictionary(&obj.dict)?;

        let offset = w.position();
        obj.offset = Some(offset);
        log::trace!("Object {} at offset {}", id.number(), offset);

        w.write_str(&format!("{} 0 obj\n", id.number()))?;
        w.write_bytes(&dict_bytes)?;
        if let Some(data) = payload {
            w.write_str("\nstream\n")?;
            w.write_bytes(&data)?;
            w.write_str("\nendstream")?;
        }
        w.write_str("\nendobj\n")?;
        Ok(true)
    }
}

/// Stream payload pipeline: compress, then encrypt, then set `/Length`.
fn encode_stream(
    obj: &mut IndirectObject,
    compress: bool,
    handler: Option<&crate::encryption::EncryptionWriteHandler>,
) -> Result<Vec<u8>> {
    let mut data = obj.payload.split().freeze().to_vec();

    if compress && !obj.no_compression && !obj.dict.contains("Filter") {
        match compression::compress_if_smaller(&data)? {
            Some(compressed) => {
                data = compressed;
                obj.dict.add_name("Filter", "FlateDecode");
            },
            None => log::trace!("Object {}: compression skipped, payload did not shrink", obj.id.number()),
        }
    }

    if let Some(handler) = handler {
        data = handler.encrypt(&data, obj.id)?;
    }

    obj.dict.add_integer("Length", data.len() as i64);
    Ok(data)
}
