//! Location markers (destinations).
//!
//! A location marker names a view of a page. Link annotations point at
//! markers by name; markers with [`MarkerScope::NamedDest`] are also
//! published in the catalog's `/Names` tree so other documents can link
//! to them.

use super::document::Document;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::object::{text_string_bytes, Object, ObjectId};

/// Visibility of a location marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerScope {
    /// Usable from links inside this document only
    LocalDest,
    /// Also listed as a named destination in the catalog
    NamedDest,
}

/// Page view of a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestFit {
    /// Whole page; no arguments
    Fit,
    /// Fit width; argument: top
    FitH,
    /// Fit height; argument: left
    FitV,
    /// Fit rectangle; arguments: left, bottom, right, top
    FitR,
    /// Fit bounding box; no arguments
    FitB,
    /// Fit bounding box width; argument: top
    FitBH,
    /// Fit bounding box height; argument: left
    FitBV,
}

impl DestFit {
    /// PDF name of the fit type.
    pub fn as_name(&self) -> &'static str {
        match self {
            DestFit::Fit => "Fit",
            DestFit::FitH => "FitH",
            DestFit::FitV => "FitV",
            DestFit::FitR => "FitR",
            DestFit::FitB => "FitB",
            DestFit::FitBH => "FitBH",
            DestFit::FitBV => "FitBV",
        }
    }

    /// Number of numeric arguments the fit type takes.
    pub fn argument_count(&self) -> usize {
        match self {
            DestFit::Fit | DestFit::FitB => 0,
            DestFit::FitH | DestFit::FitV | DestFit::FitBH | DestFit::FitBV => 1,
            DestFit::FitR => 4,
        }
    }
}

/// One marker; arguments are stored in points.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LocationMarker {
    pub(crate) name: String,
    pub(crate) page: ObjectId,
    pub(crate) scope: MarkerScope,
    pub(crate) fit: DestFit,
    pub(crate) args: Vec<f64>,
}

impl LocationMarker {
    /// `[page /Fit args...]`
    pub(crate) fn destination(&self) -> Object {
        let mut items = vec![Object::Reference(self.page), Object::name(self.fit.as_name())];
        items.extend(self.args.iter().map(|a| Object::Real(*a)));
        Object::Array(items)
    }
}

/// Markers of one document, sorted by name.
#[derive(Debug, Clone, Default)]
pub(crate) struct LocationMarkers {
    markers: Vec<LocationMarker>,
}

impl LocationMarkers {
    pub(crate) fn insert(&mut self, marker: LocationMarker) -> Result<()> {
        match self.markers.binary_search_by(|m| m.name.as_str().cmp(&marker.name)) {
            Ok(_) => Err(Error::integrity(format!(
                "location marker {:?} is already defined",
                marker.name
            ))),
            Err(slot) => {
                self.markers.insert(slot, marker);
                Ok(())
            },
        }
    }

    pub(crate) fn find(&self, name: &str) -> Option<&LocationMarker> {
        self.markers
            .binary_search_by(|m| m.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.markers[i])
    }

    pub(crate) fn len(&self) -> usize {
        self.markers.len()
    }

    /// Catalog entries for the named destinations:
    /// `/Names << /Dests << /Names [(name) [..] ...] >> >>`. Empty when no
    /// marker is named.
    pub(crate) fn named_destinations(&self) -> Result<Dictionary> {
        let mut names = Vec::new();
        for marker in self.markers.iter().filter(|m| m.scope == MarkerScope::NamedDest) {
            names.push(Object::String(text_string_bytes(&marker.name)?));
            names.push(marker.destination());
        }

        let mut dict = Dictionary::new();
        if names.is_empty() {
            return Ok(dict);
        }
        let mut dests = Dictionary::new();
        dests.add_array("Names", names);
        let mut tree = Dictionary::new();
        tree.add_dictionary("Dests", dests);
        dict.add_dictionary("Names", tree);
        Ok(dict)
    }
}

impl Document {
    /// Define a location marker on `page`. `args` are in user units and
    /// their count must match `fit`.
    pub fn add_location_marker(
        &mut self,
        name: &str,
        page: ObjectId,
        scope: MarkerScope,
        fit: DestFit,
        args: &[f64],
    ) -> Result<()> {
        if args.len() != fit.argument_count() {
            return Err(Error::invalid(format!(
                "/{} takes {} arguments, got {}",
                fit.as_name(),
                fit.argument_count(),
                args.len()
            )));
        }
        text_string_bytes(name)?;
        self.page_index(page)?;
        let scale = self.scale();
        self.markers.insert(LocationMarker {
            name: name.to_string(),
            page,
            scope,
            fit,
            args: args.iter().map(|a| a * scale).collect(),
        })
    }
}
