//! Standard (base-14) Type1 font resources.

use super::document::Document;
use super::resources::{ResourceClass, ResourceKind, ResourceSignature, SignatureValue};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::object::ObjectId;

/// Names of the 14 standard fonts every reader provides.
pub const STANDARD_FONTS: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-BoldOblique",
    "Courier-Oblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-BoldOblique",
    "Helvetica-Oblique",
    "Symbol",
    "Times-Bold",
    "Times-BoldItalic",
    "Times-Italic",
    "Times-Roman",
    "ZapfDingbats",
];

/// Symbolic fonts use their built-in encoding.
fn is_symbolic(name: &str) -> bool {
    matches!(name, "Symbol" | "ZapfDingbats")
}

impl Document {
    /// Font resource for a standard font, shared by every caller asking for
    /// the same name.
    pub fn standard_font(&mut self, name: &str) -> Result<ObjectId> {
        if !STANDARD_FONTS.contains(&name) {
            return Err(Error::invalid(format!("{} is not a standard font", name)));
        }
        let signature = ResourceSignature::new().with("BaseFont", SignatureValue::name(name));
        self.registry.get_or_create(
            &mut self.directory,
            ResourceClass::Font,
            Some(ResourceKind::Font),
            signature,
            |_| {
                let mut dict = Dictionary::with_type("Font");
                dict.add_name("Subtype", "Type1");
                dict.add_name("BaseFont", name);
                if !is_symbolic(name) {
                    dict.add_name("Encoding", "WinAnsiEncoding");
                }
                Ok(dict)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_is_shared_and_coded() {
        let mut doc = Document::default();
        let a = doc.standard_font("Times-Roman").unwrap();
        let b = doc.standard_font("Helvetica").unwrap();
        let again = doc.standard_font("Times-Roman").unwrap();
        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(doc.directory.get(b).unwrap().resource_code.unwrap().name(), "F2");

        let dict = doc.dictionary(a).unwrap();
        assert_eq!(dict.get("Subtype").and_then(|o| o.as_name()), Some("Type1"));
        assert_eq!(dict.get("Encoding").and_then(|o| o.as_name()), Some("WinAnsiEncoding"));
    }

    #[test]
    fn test_symbolic_font_has_no_encoding() {
        let mut doc = Document::default();
        let id = doc.standard_font("ZapfDingbats").unwrap();
        assert!(!doc.dictionary(id).unwrap().contains("Encoding"));
    }

    #[test]
    fn test_unknown_font_is_rejected() {
        let mut doc = Document::default();
        assert!(matches!(doc.standard_font("Arial"), Err(Error::InvalidInput(_))));
    }
}
