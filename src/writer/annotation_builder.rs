//! Page annotations: links, sticky notes and file attachments.
//!
//! Every annotation is an indirect `/Type /Annot` object with `/Rect` and
//! `/P`, registered in its page's `/Annots`. Link actions to location
//! markers are resolved when the document is closed, so the marker may be
//! defined after the link.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::{Document, DestFit, MarkerScope};
//! use pdf_scribe::geometry::Rect;
//!
//! let mut doc = Document::default();
//! let first = doc.add_page()?;
//! let second = doc.add_page()?;
//! doc.add_web_link(first, Rect::new(72.0, 700.0, 200.0, 716.0), "https://example.com/a b")?;
//! doc.add_link_action(first, Rect::new(72.0, 650.0, 200.0, 666.0), "part2")?;
//! doc.add_location_marker("part2", second, MarkerScope::LocalDest, DestFit::Fit, &[])?;
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

use super::destinations::MarkerScope;
use super::document::Document;
use super::indirect::{CloseContext, Finalize, ObjectRole};
use super::page::ContentsState;
use super::resources::{ResourceClass, ResourceSignature, SignatureValue};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::geometry::{Color, Rect};
use crate::object::{Object, ObjectId, ObjectKind};

/// Sticky note icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickyNoteIcon {
    /// Comment
    Comment,
    /// Key
    Key,
    /// Note
    Note,
    /// Help
    Help,
    /// New paragraph
    NewParagraph,
    /// Paragraph
    Paragraph,
    /// Insert
    Insert,
}

impl StickyNoteIcon {
    fn as_name(&self) -> &'static str {
        match self {
            StickyNoteIcon::Comment => "Comment",
            StickyNoteIcon::Key => "Key",
            StickyNoteIcon::Note => "Note",
            StickyNoteIcon::Help => "Help",
            StickyNoteIcon::NewParagraph => "NewParagraph",
            StickyNoteIcon::Paragraph => "Paragraph",
            StickyNoteIcon::Insert => "Insert",
        }
    }
}

/// File attachment icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAttachIcon {
    /// Push pin
    PushPin,
    /// Graph
    Graph,
    /// Paperclip
    Paperclip,
    /// Tag
    Tag,
}

impl FileAttachIcon {
    fn as_name(&self) -> &'static str {
        match self {
            FileAttachIcon::PushPin => "PushPin",
            FileAttachIcon::Graph => "Graph",
            FileAttachIcon::Paperclip => "Paperclip",
            FileAttachIcon::Tag => "Tag",
        }
    }
}

/// Link annotation waiting for its location marker.
#[derive(Debug, Clone, Default)]
pub(crate) struct LinkActionState {
    pub(crate) marker: String,
}

impl Finalize for LinkActionState {
    fn finalize(&self, ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let marker = ctx
            .markers()
            .find(&self.marker)
            .ok_or_else(|| Error::integrity(format!("location marker {:?} is not defined", self.marker)))?;
        let mut dict = Dictionary::new();
        match marker.scope {
            MarkerScope::LocalDest => dict.insert("Dest", marker.destination()),
            MarkerScope::NamedDest => dict.add_pdf_string("Dest", &marker.name)?,
        }
        Ok(dict)
    }
}

/// Percent-encode a URI: bytes up to space and from DEL to 0xFF become
/// `%xx`; characters beyond Latin-1 are encoded as their UTF-8 bytes.
pub fn encode_uri(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    for ch in uri.chars() {
        let code = u32::from(ch);
        if code > 0x20 && code < 0x7F {
            out.push(ch);
        } else if code <= 0xFF {
            out.push_str(&format!("%{:02x}", code));
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02x}", byte));
            }
        }
    }
    out
}

impl Document {
    fn add_annotation(
        &mut self,
        page: ObjectId,
        subtype: &str,
        rect: Rect,
        mut dict: Dictionary,
        role: ObjectRole,
    ) -> Result<ObjectId> {
        self.page_index(page)?;
        dict.add_name("Type", "Annot");
        dict.add_name("Subtype", subtype);
        dict.add_rectangle("Rect", rect.scale(self.scale()));
        dict.add_reference("P", page);
        let id = self.directory.register(ObjectKind::Dictionary, dict, role);
        self.attach_annotation(page, id)?;
        Ok(id)
    }

    /// Empty appearance used by icon-less notes and attachments.
    fn empty_appearance(&mut self) -> ObjectId {
        let mut dict = Dictionary::with_type("XObject");
        dict.add_name("Subtype", "Form");
        dict.add_rectangle("BBox", Rect::default());
        let state = ContentsState {
            form: true,
            ..ContentsState::default()
        };
        self.directory.register(ObjectKind::Stream, dict, ObjectRole::Contents(state))
    }

    /// URI action for `uri`, shared by every link to the same address.
    pub fn web_link(&mut self, uri: &str) -> Result<ObjectId> {
        let encoded = encode_uri(uri);
        let signature = ResourceSignature::new().with("URI", SignatureValue::Text(encoded));
        self.registry
            .get_or_create(&mut self.directory, ResourceClass::WebLink, None, signature, |sig| {
                let mut dict = Dictionary::with_type("Action");
                dict.add_name("S", "URI");
                for (key, value) in sig.entries() {
                    dict.insert(key.as_str(), value.to_object()?);
                }
                Ok(dict)
            })
    }

    /// Link annotation opening `uri`.
    pub fn add_web_link(&mut self, page: ObjectId, rect: Rect, uri: &str) -> Result<ObjectId> {
        let action = self.web_link(uri)?;
        let mut dict = Dictionary::new();
        dict.add_reference("A", action);
        self.add_annotation(page, "Link", rect, dict, ObjectRole::Plain)
    }

    /// Link annotation jumping to the location marker `marker`. Resolved
    /// at close; an undefined marker fails the write.
    pub fn add_link_action(&mut self, page: ObjectId, rect: Rect, marker: &str) -> Result<ObjectId> {
        let state = LinkActionState {
            marker: marker.to_string(),
        };
        self.add_annotation(page, "Link", rect, Dictionary::new(), ObjectRole::LinkAction(state))
    }

    /// Sticky note. Without an icon the note gets an empty appearance.
    pub fn add_sticky_note(
        &mut self,
        page: ObjectId,
        rect: Rect,
        note: &str,
        icon: Option<StickyNoteIcon>,
    ) -> Result<ObjectId> {
        let mut dict = Dictionary::new();
        dict.add_pdf_string("Contents", note)?;
        self.add_icon(&mut dict, icon.map(|i| i.as_name()));
        self.add_annotation(page, "Text", rect, dict, ObjectRole::Plain)
    }

    /// File attachment pointing at a file specification from
    /// [`Document::add_embedded_file`].
    pub fn add_file_attachment(
        &mut self,
        page: ObjectId,
        rect: Rect,
        file_spec: ObjectId,
        icon: Option<FileAttachIcon>,
    ) -> Result<ObjectId> {
        let is_spec = self.directory.get(file_spec)?.dict.get("Type").and_then(|o| o.as_name()) == Some("Filespec");
        if !is_spec {
            return Err(Error::invalid(format!(
                "object {} is not a file specification",
                file_spec.number()
            )));
        }
        let mut dict = Dictionary::new();
        dict.add_reference("FS", file_spec);
        self.add_icon(&mut dict, icon.map(|i| i.as_name()));
        self.add_annotation(page, "FileAttachment", rect, dict, ObjectRole::Plain)
    }

    fn add_icon(&mut self, dict: &mut Dictionary, icon: Option<&str>) {
        match icon {
            Some(name) => dict.add_name("Name", name),
            None => {
                let appearance = self.empty_appearance();
                let mut ap = Dictionary::new();
                ap.add_reference("N", appearance);
                dict.add_dictionary("AP", ap);
            },
        }
    }

    /// Border width of an annotation (`/Border [0 0 w]`), in points.
    pub fn set_annotation_border(&mut self, annotation: ObjectId, width: f64) -> Result<()> {
        if width < 0.0 {
            return Err(Error::invalid(format!("border width must not be negative, got {}", width)));
        }
        let obj = self.object_mut(annotation)?;
        obj.dict.add_array("Border", vec![Object::Integer(0), Object::Integer(0), Object::Real(width)]);
        Ok(())
    }

    /// Color of an annotation (`/C`).
    pub fn set_annotation_color(&mut self, annotation: ObjectId, color: Color) -> Result<()> {
        self.object_mut(annotation)?.dict.add_color("C", color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::destinations::DestFit;
    use crate::writer::DocumentConfig;

    fn rect() -> Rect {
        Rect::new(10.0, 10.0, 50.0, 30.0)
    }

    #[test]
    fn test_encode_uri() {
        assert_eq!(encode_uri("http://x.org/a b"), "http://x.org/a%20b");
        assert_eq!(encode_uri("caf\u{e9}"), "caf%e9");
        assert_eq!(encode_uri("\u{0416}"), "%d0%96");
        assert_eq!(encode_uri("a\u{7f}"), "a%7f");
    }

    #[test]
    fn test_web_links_share_action() {
        let mut doc = Document::default();
        let page = doc.add_page().unwrap();
        let a = doc.add_web_link(page, rect(), "https://example.com").unwrap();
        let b = doc.add_web_link(page, rect(), "https://example.com").unwrap();
        let action_a = doc.dictionary(a).unwrap().get("A").and_then(|o| o.as_reference());
        let action_b = doc.dictionary(b).unwrap().get("A").and_then(|o| o.as_reference());
        assert_eq!(action_a, action_b);
        assert_ne!(doc.web_link("https://example.org").unwrap(), action_a.unwrap());
    }

    #[test]
    fn test_link_action_resolves_local_and_named() {
        let mut doc = Document::new(DocumentConfig::default().with_compression(false));
        let page = doc.add_page().unwrap();
        doc.add_link_action(page, rect(), "local").unwrap();
        doc.add_link_action(page, rect(), "named").unwrap();
        doc.add_location_marker("local", page, MarkerScope::LocalDest, DestFit::FitH, &[500.0])
            .unwrap();
        doc.add_location_marker("named", page, MarkerScope::NamedDest, DestFit::Fit, &[])
            .unwrap();
        let text = String::from_utf8_lossy(&doc.to_bytes().unwrap()).into_owned();
        assert!(text.contains("/Dest [3 0 R /FitH 500]"));
        assert!(text.contains("/Dest (named)"));
        assert!(text.contains("/Annots [4 0 R 5 0 R]"));
    }

    #[test]
    fn test_unknown_marker_fails_write() {
        let mut doc = Document::default();
        let page = doc.add_page().unwrap();
        doc.add_link_action(page, rect(), "nowhere").unwrap();
        assert!(matches!(doc.to_bytes(), Err(Error::GraphIntegrity(_))));
    }

    #[test]
    fn test_sticky_note_icon_and_appearance() {
        let mut doc = Document::default();
        let page = doc.add_page().unwrap();
        let with_icon = doc.add_sticky_note(page, rect(), "hi", Some(StickyNoteIcon::Help)).unwrap();
        let without = doc.add_sticky_note(page, rect(), "hi", None).unwrap();
        assert_eq!(doc.dictionary(with_icon).unwrap().get("Name").and_then(|o| o.as_name()), Some("Help"));
        assert!(doc.dictionary(without).unwrap().contains("AP"));
        assert_eq!(doc.dictionary(without).unwrap().get("Subtype").and_then(|o| o.as_name()), Some("Text"));
    }

    #[test]
    fn test_file_attachment_requires_filespec() {
        let mut doc = Document::default();
        let page = doc.add_page().unwrap();
        let spec = doc.add_embedded_file("a.txt", b"abc").unwrap();
        let annot = doc
            .add_file_attachment(page, rect(), spec, Some(FileAttachIcon::Paperclip))
            .unwrap();
        assert_eq!(doc.dictionary(annot).unwrap().get("FS").and_then(|o| o.as_reference()), Some(spec));
        assert!(doc.add_file_attachment(page, rect(), page, None).is_err());
    }

    #[test]
    fn test_border_and_color() {
        let mut doc = Document::default();
        let page = doc.add_page().unwrap();
        let annot = doc.add_sticky_note(page, rect(), "x", Some(StickyNoteIcon::Note)).unwrap();
        doc.set_annotation_border(annot, 1.5).unwrap();
        doc.set_annotation_color(annot, Color::rgb(0, 0, 255)).unwrap();
        let dict = doc.dictionary(annot).unwrap();
        assert_eq!(
            dict.get("Border"),
            Some(&Object::Array(vec![Object::Integer(0), Object::Integer(0), Object::Real(1.5)]))
        );
        assert!(dict.contains("C"));
        assert!(doc.set_annotation_border(annot, -1.0).is_err());
    }

    #[test]
    fn test_annotation_needs_page() {
        let mut doc = Document::default();
        let catalog = doc.catalog();
        assert!(doc.add_sticky_note(catalog, rect(), "x", None).is_err());
    }
}
