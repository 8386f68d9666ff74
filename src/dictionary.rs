//! Ordered PDF dictionary with typed setters.

use crate::error::Result;
use crate::geometry::{Color, Rect};
use crate::object::{text_string_bytes, Object, ObjectId};
use indexmap::IndexMap;

/// Ordered mapping from name keys to values.
///
/// Keys are stored without the leading `/`. Inserting an existing key
/// replaces its value in place, so a key never appears twice in output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, Object>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary holding `/Type /<type_name>`.
    pub fn with_type(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.add_name("Type", type_name);
        dict
    }

    /// Insert a value, replacing any previous value of the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Add `/key /name`.
    pub fn add_name(&mut self, key: &str, name: &str) {
        self.insert(key, Object::name(name));
    }

    /// Add an integer.
    pub fn add_integer(&mut self, key: &str, value: i64) {
        self.insert(key, Object::Integer(value));
    }

    /// Add a real number.
    pub fn add_real(&mut self, key: &str, value: f64) {
        self.insert(key, Object::Real(value));
    }

    /// Add a boolean.
    pub fn add_boolean(&mut self, key: &str, value: bool) {
        self.insert(key, Object::Boolean(value));
    }

    /// Add a text string. Fails on non-printable characters.
    pub fn add_pdf_string(&mut self, key: &str, text: &str) -> Result<()> {
        let bytes = text_string_bytes(text)?;
        self.insert(key, Object::String(bytes));
        Ok(())
    }

    /// Add a string from raw bytes (no character validation).
    pub fn add_byte_string(&mut self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.insert(key, Object::String(bytes.into()));
    }

    /// Add an indirect reference, rendered as `n 0 R`.
    pub fn add_reference(&mut self, key: &str, target: ObjectId) {
        self.insert(key, Object::Reference(target));
    }

    /// Add `[left bottom right top]`.
    pub fn add_rectangle(&mut self, key: &str, rect: Rect) {
        self.insert(key, Object::rect(rect));
    }

    /// Add a nested dictionary.
    pub fn add_dictionary(&mut self, key: &str, dict: Dictionary) {
        self.insert(key, Object::Dictionary(dict));
    }

    /// Add an array.
    pub fn add_array(&mut self, key: &str, items: Vec<Object>) {
        self.insert(key, Object::Array(items));
    }

    /// Add an array of references.
    pub fn add_reference_array(&mut self, key: &str, ids: &[ObjectId]) {
        self.insert(key, Object::reference_array(ids.iter().copied()));
    }

    /// Add a color as an array (`[r g b]` or `[gray]`).
    pub fn add_color(&mut self, key: &str, color: Color) {
        let channels = if color.r == color.g && color.g == color.b {
            vec![color.r]
        } else {
            vec![color.r, color.g, color.b]
        };
        let items = channels
            .into_iter()
            .map(|c| Object::Real(f64::from(c) / 255.0))
            .collect();
        self.insert(key, Object::Array(items));
    }

    /// Whether the key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    /// Get a mutable value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.entries.get_mut(key)
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Object> {
        self.entries.shift_remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Object)> {
        self.entries.iter()
    }

    /// Move every entry of `other` into this dictionary.
    pub fn extend(&mut self, other: Dictionary) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }

    /// Every indirect reference held by this dictionary, nested values included.
    pub fn references(&self) -> Vec<ObjectId> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    pub(crate) fn collect_references(&self, out: &mut Vec<ObjectId>) {
        for value in self.entries.values() {
            value.collect_references(out);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Object)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (K, Object)>>(iter: T) -> Self {
        let mut dict = Dictionary::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}
