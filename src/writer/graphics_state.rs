//! Extended graphics state (ExtGState) resources.
//!
//! Graphics states are deduplicated: requesting the same set of entries
//! twice returns the same object, so the file holds one `/ExtGState`
//! definition per distinct combination.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::{Document, ExtGStateBuilder, BlendMode};
//!
//! let mut doc = Document::default();
//! let a = doc.ext_gstate("CA", 0.5)?;
//! let b = doc.ext_gstate("CA", 0.5)?;
//! assert_eq!(a, b);
//!
//! let gs = doc.ext_gstate_with(ExtGStateBuilder::new().fill_alpha(0.3).blend_mode(BlendMode::Multiply))?;
//! assert_ne!(gs, a);
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

use super::document::Document;
use super::resources::{ResourceClass, ResourceKind, ResourceSignature, SignatureValue};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::object::ObjectId;

/// Blend modes for `/BM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal
    Normal,
    /// Multiply
    Multiply,
    /// Screen
    Screen,
    /// Overlay
    Overlay,
    /// Darken
    Darken,
    /// Lighten
    Lighten,
    /// Difference
    Difference,
}

impl BlendMode {
    /// PDF name of the blend mode.
    pub fn as_name(&self) -> &'static str {
        match self {
            BlendMode::Normal => "Normal",
            BlendMode::Multiply => "Multiply",
            BlendMode::Screen => "Screen",
            BlendMode::Overlay => "Overlay",
            BlendMode::Darken => "Darken",
            BlendMode::Lighten => "Lighten",
            BlendMode::Difference => "Difference",
        }
    }
}

/// Builder for a multi-entry graphics state.
///
/// Entries are kept in the order they were set; that order is part of the
/// deduplication identity.
#[derive(Debug, Clone, Default)]
pub struct ExtGStateBuilder {
    signature: ResourceSignature,
}

impl ExtGStateBuilder {
    /// Empty graphics state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill alpha (`/ca`), clamped to 0..=1.
    pub fn fill_alpha(self, alpha: f64) -> Self {
        self.entry("ca", alpha.clamp(0.0, 1.0))
    }

    /// Stroke alpha (`/CA`), clamped to 0..=1.
    pub fn stroke_alpha(self, alpha: f64) -> Self {
        self.entry("CA", alpha.clamp(0.0, 1.0))
    }

    /// Blend mode (`/BM`).
    pub fn blend_mode(self, mode: BlendMode) -> Self {
        self.entry("BM", SignatureValue::name(mode.as_name()))
    }

    /// Line width (`/LW`) in points.
    pub fn line_width(self, width: f64) -> Self {
        self.entry("LW", width)
    }

    /// Stroke adjustment (`/SA`).
    pub fn stroke_adjustment(self, on: bool) -> Self {
        self.entry("SA", on)
    }

    /// Arbitrary entry.
    pub fn entry(mut self, key: &str, value: impl Into<SignatureValue>) -> Self {
        self.signature = self.signature.with(key, value);
        self
    }
}

impl Document {
    /// Single-entry graphics state, e.g. `ext_gstate("CA", 0.5)`.
    pub fn ext_gstate(&mut self, key: &str, value: impl Into<SignatureValue>) -> Result<ObjectId> {
        self.ext_gstate_with(ExtGStateBuilder::new().entry(key, value))
    }

    /// Graphics state from a builder.
    pub fn ext_gstate_with(&mut self, builder: ExtGStateBuilder) -> Result<ObjectId> {
        if builder.signature.entries().is_empty() {
            return Err(Error::invalid("graphics state without entries"));
        }
        self.registry.get_or_create(
            &mut self.directory,
            ResourceClass::ExtGState,
            Some(ResourceKind::ExtGState),
            builder.signature,
            |signature| {
                let mut dict = Dictionary::with_type("ExtGState");
                for (key, value) in signature.entries() {
                    dict.insert(key.as_str(), value.to_object()?);
                }
                Ok(dict)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;

    #[test]
    fn test_same_state_is_shared() {
        let mut doc = Document::default();
        let a = doc.ext_gstate("CA", 0.5).unwrap();
        let b = doc.ext_gstate("CA", 0.5).unwrap();
        let c = doc.ext_gstate("ca", 0.5).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_dictionary_entries() {
        let mut doc = Document::default();
        let gs = doc
            .ext_gstate_with(
                ExtGStateBuilder::new()
                    .stroke_alpha(2.0)
                    .blend_mode(BlendMode::Screen)
                    .stroke_adjustment(true),
            )
            .unwrap();
        let dict = doc.dictionary(gs).unwrap();
        assert_eq!(dict.get("Type").and_then(|o| o.as_name()), Some("ExtGState"));
        assert_eq!(dict.get("CA"), Some(&Object::Real(1.0)));
        assert_eq!(dict.get("BM").and_then(|o| o.as_name()), Some("Screen"));
        assert_eq!(dict.get("SA"), Some(&Object::Boolean(true)));
        let code = doc.directory.get(gs).unwrap().resource_code.unwrap();
        assert_eq!(code.name(), "G1");
    }

    #[test]
    fn test_empty_state_is_rejected() {
        let mut doc = Document::default();
        assert!(doc.ext_gstate_with(ExtGStateBuilder::new()).is_err());
    }
}
