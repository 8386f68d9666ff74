//! Shared resource registry and per-stream resource lists.
//!
//! Resources (fonts, graphics states, shadings, XObjects, layers) are
//! referenced from content streams by a short code such as `/F1` or `/G3`. The
//! registry hands out those codes per kind and deduplicates resources whose
//! definitions are structurally identical, so each distinct definition is
//! written exactly once.
//!
//! Deduplication keys are exact structural values ([`ResourceSignature`])
//! with a total order, kept in a sorted vector and found by binary search.

use super::directory::ObjectDirectory;
use super::indirect::ObjectRole;
use crate::dictionary::Dictionary;
use crate::object::{Object, ObjectId, ObjectKind};
use std::cmp::Ordering;
use std::fmt;

/// Kind of a resource, in `/Resources` sub-dictionary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// `/Font`
    Font,
    /// `/Shading`
    Shading,
    /// `/XObject`
    XObject,
    /// `/ExtGState`
    ExtGState,
    /// `/Properties` (optional content)
    Properties,
}

impl ResourceKind {
    const ALL: [ResourceKind; 5] = [
        ResourceKind::Font,
        ResourceKind::Shading,
        ResourceKind::XObject,
        ResourceKind::ExtGState,
        ResourceKind::Properties,
    ];

    /// Letter prefix of the resource code.
    pub fn letter(&self) -> char {
        match self {
            ResourceKind::Font => 'F',
            ResourceKind::Shading => 'S',
            ResourceKind::XObject => 'X',
            ResourceKind::ExtGState => 'G',
            ResourceKind::Properties => 'O',
        }
    }

    /// Key of the sub-dictionary in `/Resources`.
    pub fn dictionary_key(&self) -> &'static str {
        match self {
            ResourceKind::Font => "Font",
            ResourceKind::Shading => "Shading",
            ResourceKind::XObject => "XObject",
            ResourceKind::ExtGState => "ExtGState",
            ResourceKind::Properties => "Properties",
        }
    }

    fn slot(&self) -> usize {
        *self as usize
    }
}

/// Short tag naming a resource inside content streams (`F1`, `G2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceCode {
    /// Resource kind
    pub kind: ResourceKind,
    /// Sequence number within the kind, starting at 1
    pub number: u32,
}

impl ResourceCode {
    /// Name form without the leading slash.
    pub fn name(&self) -> String {
        format!("{}{}", self.kind.letter(), self.number)
    }
}

impl fmt::Display for ResourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}{}", self.kind.letter(), self.number)
    }
}

/// Class used to partition the deduplication table.
///
/// Web links are deduplicated like resources but never get a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ResourceClass {
    Font,
    ExtGState,
    WebLink,
}

/// Real number with a total order (`f64::total_cmp`).
#[derive(Debug, Clone, Copy)]
pub struct Real(pub f64);

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// One typed value inside a resource signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignatureValue {
    /// Boolean
    Boolean(bool),
    /// Integer
    Integer(i64),
    /// Real
    Real(Real),
    /// Name (without slash)
    Name(String),
    /// Text
    Text(String),
}

impl SignatureValue {
    /// Name value.
    pub fn name(name: impl Into<String>) -> Self {
        SignatureValue::Name(name.into())
    }

    /// Render as a dictionary value.
    pub fn to_object(&self) -> crate::error::Result<Object> {
        Ok(match self {
            SignatureValue::Boolean(b) => Object::Boolean(*b),
            SignatureValue::Integer(i) => Object::Integer(*i),
            SignatureValue::Real(r) => Object::Real(r.0),
            SignatureValue::Name(n) => Object::Name(n.clone()),
            SignatureValue::Text(t) => Object::text(t)?,
        })
    }
}

impl From<bool> for SignatureValue {
    fn from(value: bool) -> Self {
        SignatureValue::Boolean(value)
    }
}

impl From<i64> for SignatureValue {
    fn from(value: i64) -> Self {
        SignatureValue::Integer(value)
    }
}

impl From<f64> for SignatureValue {
    fn from(value: f64) -> Self {
        SignatureValue::Real(Real(value))
    }
}

impl From<&str> for SignatureValue {
    fn from(value: &str) -> Self {
        SignatureValue::Text(value.to_string())
    }
}

/// Exact structural identity of a shared resource definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResourceSignature(Vec<(String, SignatureValue)>);

impl ResourceSignature {
    /// Empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; entry order is part of the identity.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SignatureValue>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(String, SignatureValue)] {
        &self.0
    }
}

type RegistryKey = (ResourceClass, ResourceSignature);

/// Deduplication table plus per-kind code counters.
#[derive(Debug, Default)]
pub(crate) struct ResourceRegistry {
    entries: Vec<(RegistryKey, ObjectId)>,
    counters: [u32; ResourceKind::ALL.len()],
}

impl ResourceRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate the next code of `kind`.
    pub(crate) fn next_code(&mut self, kind: ResourceKind) -> ResourceCode {
        let counter = &mut self.counters[kind.slot()];
        *counter += 1;
        ResourceCode {
            kind,
            number: *counter,
        }
    }

    fn search(&self, class: ResourceClass, signature: &ResourceSignature) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|((c, s), _)| c.cmp(&class).then_with(|| s.cmp(signature)))
    }

    /// Return the resource registered for `(class, signature)`, or build,
    /// register and record a new one.
    ///
    /// `build` receives the signature and returns the object dictionary.
    /// When `kind` is given the new object also gets a resource code.
    pub(crate) fn get_or_create<F>(
        &mut self,
        directory: &mut ObjectDirectory,
        class: ResourceClass,
        kind: Option<ResourceKind>,
        signature: ResourceSignature,
        build: F,
    ) -> crate::error::Result<ObjectId>
    where
        F: FnOnce(&ResourceSignature) -> crate::error::Result<Dictionary>,
    {
        let slot = match self.search(class, &signature) {
            Ok(i) => {
                let id = self.entries[i].1;
                log::trace!("Resource {:?} reused as object {}", class, id.number());
                return Ok(id);
            },
            Err(slot) => slot,
        };

        let dict = build(&signature)?;
        let id = directory.register(ObjectKind::Dictionary, dict, ObjectRole::Plain);
        if let Some(kind) = kind {
            let code = self.next_code(kind);
            directory.get_mut(id)?.resource_code = Some(code);
        }
        self.entries.insert(slot, ((class, signature), id));
        Ok(id)
    }

    /// Number of deduplicated entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A resource used by one content stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResourceRef {
    /// Code used inside the stream
    pub code: ResourceCode,
    /// Object defining the resource
    pub id: ObjectId,
}

/// Sorted, code-unique list of resources used by a content stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceList {
    items: Vec<ResourceRef>,
}

impl ResourceList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource unless its code is already present. Returns whether
    /// it was inserted.
    pub fn add(&mut self, item: ResourceRef) -> bool {
        match self.items.binary_search_by(|r| r.code.cmp(&item.code)) {
            Ok(_) => false,
            Err(slot) => {
                self.items.insert(slot, item);
                true
            },
        }
    }

    /// Merge several lists, dropping duplicate codes and keeping order.
    pub fn merge<'a>(lists: impl IntoIterator<Item = &'a ResourceList>) -> ResourceList {
        let mut merged = ResourceList::new();
        for list in lists {
            for item in &list.items {
                merged.add(*item);
            }
        }
        merged
    }

    /// Items in code order.
    pub fn items(&self) -> &[ResourceRef] {
        &self.items
    }

    /// Whether no resource is used.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build the `/Resources` dictionary.
    ///
    /// An empty list still yields a valid dictionary holding only the
    /// text procedure set.
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        if self.items.is_empty() {
            dict.add_array("ProcSet", vec![Object::name("PDF"), Object::name("Text")]);
            return dict;
        }

        dict.add_array(
            "ProcSet",
            ["PDF", "Text", "ImageB", "ImageC", "ImageI"]
                .iter()
                .map(|n| Object::name(*n))
                .collect(),
        );
        for kind in ResourceKind::ALL {
            let group: Dictionary = self
                .items
                .iter()
                .filter(|r| r.code.kind == kind)
                .map(|r| (r.code.name(), Object::Reference(r.id)))
                .collect();
            if !group.is_empty() {
                dict.add_dictionary(kind.dictionary_key(), group);
            }
        }
        dict
    }
}
