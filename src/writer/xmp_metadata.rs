//! XMP metadata stream.
//!
//! [`XmpWriter`] builds a minimal XMP packet (Dublin Core title, creator and
//! description, XMP dates, PDF producer and keywords). The packet is stored
//! in a `/Type /Metadata /Subtype /XML` stream referenced from the catalog.
//! The stream is never compressed or encrypted.

use super::document::Document;
use super::indirect::ObjectRole;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::object::{ObjectId, ObjectKind};
use chrono::{DateTime, Local};
use quick_xml::escape::escape;
use std::path::Path;

const NS_X: &str = "adobe:ns:meta/";
const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_XMP: &str = "http://ns.adobe.com/xap/1.0/";
const NS_PDF: &str = "http://ns.adobe.com/pdf/1.3/";

/// Lines of whitespace after the packet body, leaving room for in-place edits.
const PADDING_LINES: usize = 20;

/// XMP packet builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmpWriter {
    title: Option<String>,
    authors: Vec<String>,
    subject: Option<String>,
    keywords: Option<String>,
    producer: Option<String>,
    create_date: Option<DateTime<Local>>,
    modify_date: Option<DateTime<Local>>,
}

impl XmpWriter {
    /// Empty packet.
    pub fn new() -> Self {
        Self::default()
    }

    /// `dc:title`
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a `dc:creator` entry.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// `dc:description`
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// `pdf:Keywords`
    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// `pdf:Producer`
    pub fn producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    /// `xmp:CreateDate`
    pub fn create_date(mut self, date: DateTime<Local>) -> Self {
        self.create_date = Some(date);
        self
    }

    /// `xmp:ModifyDate`
    pub fn modify_date(mut self, date: DateTime<Local>) -> Self {
        self.modify_date = Some(date);
        self
    }

    /// The packet as XML text.
    pub fn build(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n");
        xml.push_str(&format!("<x:xmpmeta xmlns:x=\"{}\">\n", NS_X));
        xml.push_str(&format!("  <rdf:RDF xmlns:rdf=\"{}\">\n", NS_RDF));
        xml.push_str("    <rdf:Description rdf:about=\"\"\n");
        xml.push_str(&format!("        xmlns:dc=\"{}\"\n", NS_DC));
        xml.push_str(&format!("        xmlns:xmp=\"{}\"\n", NS_XMP));
        xml.push_str(&format!("        xmlns:pdf=\"{}\">\n", NS_PDF));

        if let Some(title) = &self.title {
            push_alt(&mut xml, "dc:title", title);
        }
        if !self.authors.is_empty() {
            xml.push_str("      <dc:creator>\n        <rdf:Seq>\n");
            for author in &self.authors {
                xml.push_str(&format!("          <rdf:li>{}</rdf:li>\n", escape(author.as_str())));
            }
            xml.push_str("        </rdf:Seq>\n      </dc:creator>\n");
        }
        if let Some(subject) = &self.subject {
            push_alt(&mut xml, "dc:description", subject);
        }
        if let Some(date) = &self.create_date {
            push_simple(&mut xml, "xmp:CreateDate", &xmp_date(date));
        }
        if let Some(date) = &self.modify_date {
            push_simple(&mut xml, "xmp:ModifyDate", &xmp_date(date));
        }
        if let Some(producer) = &self.producer {
            push_simple(&mut xml, "pdf:Producer", producer);
        }
        if let Some(keywords) = &self.keywords {
            push_simple(&mut xml, "pdf:Keywords", keywords);
        }

        xml.push_str("    </rdf:Description>\n  </rdf:RDF>\n</x:xmpmeta>\n");
        for _ in 0..PADDING_LINES {
            xml.push_str(&" ".repeat(100));
            xml.push('\n');
        }
        xml.push_str("<?xpacket end=\"w\"?>");
        xml
    }

    /// The packet as UTF-8 bytes.
    pub fn build_bytes(&self) -> Vec<u8> {
        self.build().into_bytes()
    }
}

fn push_simple(xml: &mut String, tag: &str, value: &str) {
    xml.push_str(&format!("      <{tag}>{}</{tag}>\n", escape(value)));
}

fn push_alt(xml: &mut String, tag: &str, value: &str) {
    xml.push_str(&format!(
        "      <{tag}>\n        <rdf:Alt>\n          <rdf:li xml:lang=\"x-default\">{}</rdf:li>\n        </rdf:Alt>\n      </{tag}>\n",
        escape(value)
    ));
}

/// ISO 8601 date with offset, as XMP expects.
pub fn xmp_date(date: &DateTime<Local>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

impl Document {
    /// Attach an XMP packet to the catalog. Only one is allowed.
    pub fn add_metadata(&mut self, packet: &[u8]) -> Result<ObjectId> {
        let catalog = self.catalog;
        if self.directory.get(catalog)?.dict.contains("Metadata") {
            return Err(Error::AlreadyDefined("Metadata".to_string()));
        }
        let mut dict = Dictionary::with_type("Metadata");
        dict.add_name("Subtype", "XML");
        let id = self.directory.register(ObjectKind::Stream, dict, ObjectRole::Plain);
        let obj = self.object_mut(id)?;
        obj.no_compression = true;
        obj.no_encryption = true;
        obj.append_bytes(packet);
        self.object_mut(catalog)?.dict.add_reference("Metadata", id);
        log::debug!("XMP metadata ({} bytes) stored as object {}", packet.len(), id.number());
        Ok(id)
    }

    /// Attach an XMP packet read from a file.
    pub fn add_metadata_file(&mut self, path: impl AsRef<Path>) -> Result<ObjectId> {
        let path = path.as_ref();
        let packet = std::fs::read(path).map_err(|source| Error::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_metadata(&packet)
    }

    /// Attach the packet built by `writer`.
    pub fn add_xmp(&mut self, writer: &XmpWriter) -> Result<ObjectId> {
        self.add_metadata(&writer.build_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_packet_contents() {
        let date = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let xml = XmpWriter::new()
            .title("Q1 & Q2 <draft>")
            .author("Ann")
            .author("Bob")
            .subject("Sales")
            .producer("pdf_scribe")
            .create_date(date)
            .build();
        assert!(xml.starts_with("<?xpacket begin="));
        assert!(xml.ends_with("<?xpacket end=\"w\"?>"));
        assert!(xml.contains("Q1 &amp; Q2 &lt;draft&gt;"));
        assert!(xml.contains("<rdf:li>Ann</rdf:li>"));
        assert!(xml.contains("<rdf:li>Bob</rdf:li>"));
        assert!(xml.contains("<pdf:Producer>pdf_scribe</pdf:Producer>"));
        assert!(xml.contains("<xmp:CreateDate>2024-01-15T10:30:00"));
        assert!(!xml.contains("ModifyDate"));
    }

    #[test]
    fn test_metadata_stream_is_plain() {
        let mut doc = Document::default();
        let packet = XmpWriter::new().title("Plain").build_bytes();
        let id = doc.add_xmp(&XmpWriter::new().title("Plain")).unwrap();
        let obj = doc.directory.get(id).unwrap();
        assert!(obj.no_compression);
        assert!(obj.no_encryption);
        assert_eq!(obj.payload.to_vec(), packet);

        let bytes = doc.to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("<dc:title>"));
        assert!(text.contains("/Subtype /XML"));
        assert!(!text.contains(&format!("{} 0 obj\n<< /Type /Metadata /Subtype /XML /Filter", id.number())));
    }

    #[test]
    fn test_second_metadata_rejected() {
        let mut doc = Document::default();
        doc.add_metadata(b"<x/>").unwrap();
        assert!(matches!(doc.add_metadata(b"<y/>"), Err(Error::AlreadyDefined(_))));
    }

    #[test]
    fn test_metadata_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<x:xmpmeta/>").unwrap();
        let mut doc = Document::default();
        let id = doc.add_metadata_file(file.path()).unwrap();
        assert_eq!(doc.directory.get(id).unwrap().payload.len(), 12);
        assert!(matches!(
            Document::default().add_metadata_file("/no/such/file.xmp"),
            Err(Error::ResourceLoad { .. })
        ));
    }
}
