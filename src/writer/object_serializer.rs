//! PDF object serialization.
//!
//! Serializes object values to their byte representation according to
//! PDF specification ISO 32000-1:2008, Section 7.3.

use crate::dictionary::Dictionary;
use crate::encryption::EncryptionWriteHandler;
use crate::error::Result;
use crate::geometry::format_number;
use crate::object::{escape_literal, Object, ObjectId};
use std::io::Write;

/// Serializer for the values of one indirect object.
///
/// When built with [`ObjectSerializer::encrypted`], every string is
/// encrypted with the key of the owning object before it is written.
#[derive(Clone, Copy, Default)]
pub struct ObjectSerializer<'a> {
    cipher: Option<(&'a EncryptionWriteHandler, ObjectId)>,
}

impl<'a> ObjectSerializer<'a> {
    /// Serializer that writes strings in cleartext.
    pub fn plain() -> Self {
        Self { cipher: None }
    }

    /// Serializer that encrypts strings for object `owner`.
    pub fn encrypted(handler: &'a EncryptionWriteHandler, owner: ObjectId) -> Self {
        Self {
            cipher: Some((handler, owner)),
        }
    }

    /// Serialize a value to bytes.
    pub fn serialize(&self, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Serialize the top-level dictionary of an indirect object.
    ///
    /// One entry per line: `<<\n/Type /Page\n/Parent 2 0 R\n>>`.
    pub fn serialize_dictionary(&self, dict: &Dictionary) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"<<\n");
        for (key, value) in dict.iter() {
            write_name(&mut buf, key)?;
            buf.push(b' ');
            self.write_object(&mut buf, value)?;
            buf.push(b'\n');
        }
        buf.extend_from_slice(b">>");
        Ok(buf)
    }

    /// Write a value to a buffer.
    fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> Result<()> {
        match obj {
            Object::Null => write!(w, "null")?,
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" })?,
            Object::Integer(i) => write!(w, "{}", i)?,
            Object::Real(r) => write!(w, "{}", format_number(*r))?,
            Object::Name(n) => write_name(w, n)?,
            Object::String(s) => {
                let bytes = self.encrypt(s)?;
                w.write_all(b"(")?;
                w.write_all(&escape_literal(&bytes))?;
                w.write_all(b")")?;
            },
            Object::HexString(s) => {
                let bytes = self.encrypt(s)?;
                write_hex_string(w, &bytes)?;
            },
            Object::Array(arr) => {
                w.write_all(b"[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        w.write_all(b" ")?;
                    }
                    self.write_object(w, item)?;
                }
                w.write_all(b"]")?;
            },
            Object::Dictionary(dict) => {
                w.write_all(b"<<")?;
                for (key, value) in dict.iter() {
                    w.write_all(b" ")?;
                    write_name(w, key)?;
                    w.write_all(b" ")?;
                    self.write_object(w, value)?;
                }
                w.write_all(b" >>")?;
            },
            Object::Reference(id) => write!(w, "{}", id)?,
        }
        Ok(())
    }

    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.cipher {
            Some((handler, owner)) => handler.encrypt(data, owner),
            None => Ok(data.to_vec()),
        }
    }
}

/// Write a PDF name.
///
/// Names start with `/` and escape delimiters, whitespace and non-ASCII
/// bytes with `#xx`.
pub fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    w.write_all(b"/")?;
    for byte in name.bytes() {
        match byte {
            b'!'
            | b'"'
            | b'$'
            | b'&'
            | b'\''
            | b'*'..=b'.'
            | b'0'..=b'9'
            | b';'
            | b'='
            | b'?'
            | b'@'
            | b'A'..=b'Z'
            | b'^'..=b'z'
            | b'|'
            | b'~' => w.write_all(&[byte])?,
            _ => write!(w, "#{:02X}", byte)?,
        }
    }
    Ok(())
}

/// Write bytes as a hex string `<...>`.
pub fn write_hex_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    w.write_all(b"<")?;
    for byte in data {
        write!(w, "{:02x}", byte)?;
    }
    w.write_all(b">")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::EncryptionAlgorithm;

    fn render(obj: &Object) -> String {
        String::from_utf8(ObjectSerializer::plain().serialize(obj).unwrap()).unwrap()
    }

    #[test]
    fn test_serialize_simple_values() {
        assert_eq!(render(&Object::Null), "null");
        assert_eq!(render(&Object::Boolean(true)), "true");
        assert_eq!(render(&Object::Integer(-42)), "-42");
        assert_eq!(render(&Object::Real(1.00005)), "1.0001");
        assert_eq!(render(&Object::Real(-0.00001)), "0");
        assert_eq!(render(&Object::Reference(ObjectId(12))), "12 0 R");
    }

    #[test]
    fn test_serialize_string_escapes() {
        assert_eq!(render(&Object::bytes("a(b)\\c")), "(a\\(b\\)\\\\c)");
        assert_eq!(render(&Object::bytes("x\r\ny")), "(x\\r\\ny)");
        assert_eq!(render(&Object::HexString(vec![0xAB, 0x01])), "<ab01>");
    }

    #[test]
    fn test_serialize_name_escapes() {
        assert_eq!(render(&Object::name("Type")), "/Type");
        assert_eq!(render(&Object::name("A B")), "/A#20B");
        assert_eq!(render(&Object::name("a/b(c)")), "/a#2Fb#28c#29");
        assert_eq!(render(&Object::name("Off")), "/Off");
    }

    #[test]
    fn test_serialize_nested() {
        let mut inner = Dictionary::new();
        inner.add_name("S", "Named");
        inner.add_name("N", "NextPage");
        let obj = Object::Array(vec![Object::Integer(0), Object::Dictionary(inner)]);
        assert_eq!(render(&obj), "[0 << /S /Named /N /NextPage >>]");
    }

    #[test]
    fn test_top_level_dictionary_layout() {
        let mut dict = Dictionary::with_type("Page");
        dict.add_reference("Parent", ObjectId(2));
        let bytes = ObjectSerializer::plain().serialize_dictionary(&dict).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "<<\n/Type /Page\n/Parent 2 0 R\n>>");
    }

    #[test]
    fn test_encrypted_strings_differ_from_plain() {
        let handler = EncryptionWriteHandler::from_key(vec![1u8; 16], EncryptionAlgorithm::Rc4_128);
        let serializer = ObjectSerializer::encrypted(&handler, ObjectId(3));
        let plain = ObjectSerializer::plain().serialize(&Object::bytes("Title")).unwrap();
        let encrypted = serializer.serialize(&Object::bytes("Title")).unwrap();
        assert_ne!(plain, encrypted);
        // names are never encrypted
        assert_eq!(serializer.serialize(&Object::name("Title")).unwrap(), b"/Title".to_vec());
    }
}
