//! PDF object values and indirect object identity.
//!
//! [`Object`] is the direct value model used inside dictionaries and arrays.
//! [`ObjectId`] is the stable number of an indirect object; it is assigned
//! once at registration and rendered as `n 0 R` wherever it is referenced.

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Stable number of an indirect object (generation is always 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Object number.
    pub fn number(&self) -> u32 {
        self.0
    }

    /// Directory index of this object.
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

/// Kind of an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Free slot (object 0). Never written, listed as free in the xref table.
    Free,
    /// Dictionary-only object
    Dictionary,
    /// Dictionary followed by a stream payload
    Stream,
}

/// PDF direct object value.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real value, written with 4 decimal places at most
    Real(f64),
    /// Name (stored without the leading slash)
    Name(String),
    /// String (byte array), written as a literal string
    String(Vec<u8>),
    /// String written in hex form (`<0a1b>`), used for binary values
    HexString(Vec<u8>),
    /// Array of objects
    Array(Vec<Object>),
    /// Nested dictionary
    Dictionary(Dictionary),
    /// Indirect object reference
    Reference(ObjectId),
}

impl Object {
    /// Create a Name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Create a String object from raw bytes.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Object::String(data.into())
    }

    /// Create a String object from text, applying the PDF text string rules.
    pub fn text(text: &str) -> Result<Self> {
        Ok(Object::String(text_string_bytes(text)?))
    }

    /// Create a `[left bottom right top]` array.
    pub fn rect(rect: Rect) -> Self {
        Object::Array(vec![
            Object::Real(rect.left),
            Object::Real(rect.bottom),
            Object::Real(rect.right),
            Object::Real(rect.top),
        ])
    }

    /// Create an array of references.
    pub fn reference_array(ids: impl IntoIterator<Item = ObjectId>) -> Self {
        Object::Array(ids.into_iter().map(Object::Reference).collect())
    }

    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::HexString(_) => "HexString",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) | Object::HexString(s) => Some(s),
            _ => None,
        }
    }

    /// Append every indirect reference reachable from this value.
    pub(crate) fn collect_references(&self, out: &mut Vec<ObjectId>) {
        match self {
            Object::Reference(id) => out.push(*id),
            Object::Array(items) => {
                for item in items {
                    item.collect_references(out);
                }
            },
            Object::Dictionary(dict) => dict.collect_references(out),
            _ => {},
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Real(value)
    }
}

impl From<ObjectId> for Object {
    fn from(value: ObjectId) -> Self {
        Object::Reference(value)
    }
}

impl From<Dictionary> for Object {
    fn from(value: Dictionary) -> Self {
        Object::Dictionary(value)
    }
}

/// Convert text to the byte form of a PDF text string.
///
/// Control characters (below 0x20 and 0x7F..0xA0) are rejected. Text that
/// fits in one byte per character is stored as is; anything else is stored
/// as UTF-16BE behind the `FE FF` byte order mark.
pub fn text_string_bytes(text: &str) -> Result<Vec<u8>> {
    let mut single_byte = true;
    for ch in text.chars() {
        let code = ch as u32;
        if code < 0x20 || (0x7F..0xA0).contains(&code) {
            return Err(Error::invalid(format!(
                "PDF string contains non-printable character U+{:04X}",
                code
            )));
        }
        if code > 0xFF {
            single_byte = false;
        }
    }

    if single_byte {
        return Ok(text.chars().map(|ch| ch as u8).collect());
    }

    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Ok(bytes)
}

/// Escape bytes for a literal string body (without the parentheses).
///
/// `\r` and `\n` become `\r` and `\n` escapes, and `\`, `(`, `)` get a
/// backslash. All other bytes pass through.
pub fn escape_literal(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 8);
    for &byte in data {
        match byte {
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\\' | b'(' | b')' => {
                out.push(b'\\');
                out.push(byte);
            },
            _ => out.push(byte),
        }
    }
    out
}

/// Reverse [`escape_literal`].
pub fn unescape_literal(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter().copied();
    while let Some(byte) = iter.next() {
        if byte != b'\\' {
            out.push(byte);
            continue;
        }
        match iter.next() {
            Some(b'r') => out.push(b'\r'),
            Some(b'n') => out.push(b'\n'),
            Some(other) => out.push(other),
            None => out.push(b'\\'),
        }
    }
    out
}
