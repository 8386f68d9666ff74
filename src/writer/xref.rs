//! Cross-reference table and trailer.
//!
//! Written after every object, in object-number order. Each record is
//! exactly 20 bytes: a 10-digit offset, a 5-digit generation, the entry
//! type and a two-byte line end.

use super::binary_writer::PdfBinaryWriter;
use super::directory::ObjectDirectory;
use super::object_serializer::ObjectSerializer;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::object::{Object, ObjectId, ObjectKind};
use std::io::Write;

const FREE_ENTRY: &str = "0000000000 65535 f\r\n";

/// Entries of the trailer dictionary.
#[derive(Debug, Clone)]
pub(crate) struct Trailer {
    pub(crate) root: ObjectId,
    pub(crate) info: Option<ObjectId>,
    pub(crate) encrypt: Option<ObjectId>,
    pub(crate) file_id: Option<[u8; 16]>,
}

impl Trailer {
    fn to_dictionary(&self, size: usize) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.add_integer("Size", size as i64);
        dict.add_reference("Root", self.root);
        if let Some(info) = self.info {
            dict.add_reference("Info", info);
        }
        if let Some(encrypt) = self.encrypt {
            dict.add_reference("Encrypt", encrypt);
        }
        if let Some(id) = self.file_id {
            dict.add_array("ID", vec![Object::HexString(id.to_vec()), Object::HexString(id.to_vec())]);
        }
        dict
    }
}

/// Write the xref section, trailer, `startxref` and `%%EOF`.
///
/// Returns the offset of the `xref` keyword.
pub(crate) fn write_xref_and_trailer<W: Write>(
    w: &mut PdfBinaryWriter<W>,
    directory: &ObjectDirectory,
    trailer: &Trailer,
) -> Result<u64> {
    let xref_offset = w.position();
    let size = directory.len();
    log::debug!("Writing xref with {} entries at offset {}", size, xref_offset);

    w.write_str(&format!("xref\n0 {}\n", size))?;
    for obj in directory.iter() {
        match obj.offset {
            Some(offset) if obj.kind != ObjectKind::Free => {
                w.write_str(&format!("{:010} 00000 n\r\n", offset))?;
            },
            _ => w.write_str(FREE_ENTRY)?,
        }
    }

    let dict = ObjectSerializer::plain().serialize_dictionary(&trailer.to_dictionary(size))?;
    w.write_str("trailer\n")?;
    w.write_bytes(&dict)?;
    w.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))?;
    Ok(xref_offset)
}
