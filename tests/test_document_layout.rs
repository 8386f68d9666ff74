//! Integration tests for the overall file layout.
//!
//! Covers:
//! - Header, binary marker and `%%EOF`
//! - Catalog written last, after every other object
//! - Page tree `/Kids` and `/Count`
//! - Merged page `/Resources`
//! - Compression on and off

use flate2::read::ZlibDecoder;
use pdf_scribe::geometry::{Color, ColorTarget, PaperType, Rect, Size, UnitOfMeasure};
use pdf_scribe::writer::{Document, DocumentConfig};
use pdf_scribe::{Error, ObjectId};
use std::io::Read;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn plain_doc() -> Document {
    Document::new(DocumentConfig::default().with_compression(false))
}

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

fn obj_header(id: ObjectId) -> String {
    format!("\n{} 0 obj\n", id.number())
}

#[test]
fn test_empty_document() {
    init();
    let bytes = Document::default().to_bytes().unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7\n%"));
    assert!(bytes.ends_with(b"%%EOF\n"));

    let text = as_text(&bytes);
    assert!(text.contains("/Type /Catalog"));
    assert!(text.contains("/Type /Pages"));
    assert!(text.contains("/Count 0"));
    assert!(text.contains("/Root 1 0 R"));
    assert!(!text.contains("/Encrypt"));
    assert!(!text.contains("/ID"));
}

#[test]
fn test_minimal_document() {
    init();
    let mut doc = plain_doc();
    let catalog = doc.catalog();
    let page = doc.add_page().unwrap();
    let contents = doc.add_contents(page).unwrap();
    let text = as_text(&doc.to_bytes().unwrap());

    assert_eq!(text.matches("/Type /Catalog").count(), 1);
    assert_eq!(text.matches("/Type /Pages").count(), 1);
    assert_eq!(text.matches("/Count 1").count(), 1);
    // "/Type /Page" is also a prefix of "/Type /Pages"
    let pages = text.matches("/Type /Pages").count();
    assert_eq!(text.matches("/Type /Page").count() - pages, 1);
    assert!(text.contains(&format!("/Contents [{} 0 R]", contents.number())));
    assert!(text.contains("/Length 0\n>>\nstream\n\nendstream"));

    let trailer = &text[text.rfind("trailer").unwrap()..];
    assert!(trailer.contains(&format!("/Root {} 0 R", catalog.number())));
}

#[test]
fn test_catalog_is_written_last() {
    init();
    let mut doc = plain_doc();
    let catalog = doc.catalog();
    doc.add_page().unwrap();
    doc.add_page().unwrap();
    let text = as_text(&doc.to_bytes().unwrap());

    let catalog_at = text.find(&obj_header(catalog)).unwrap();
    for number in 2..=4 {
        let at = text.find(&format!("\n{} 0 obj\n", number)).unwrap();
        assert!(at < catalog_at, "object {} should precede the catalog", number);
    }
    assert!(catalog_at < text.find("\nxref\n").unwrap());
}

#[test]
fn test_page_tree_kids_and_count() {
    init();
    let mut doc = plain_doc();
    let first = doc.add_page().unwrap();
    let second = doc.add_page_with_paper(PaperType::A4, true).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.page(1), Some(second));
    assert_eq!(doc.page(2), None);

    let text = as_text(&doc.to_bytes().unwrap());
    assert!(text.contains(&format!(
        "/Kids [{} 0 R {} 0 R]",
        first.number(),
        second.number()
    )));
    assert!(text.contains("/Count 2"));
    assert!(text.contains("/MediaBox [0 0 612 792]"));
    // A4 landscape
    assert!(text.contains("/MediaBox [0 0 841.8898 595.2756]"));
}

#[test]
fn test_page_size_in_user_units() {
    init();
    let config = DocumentConfig::default()
        .with_unit(UnitOfMeasure::Inch)
        .with_compression(false);
    let mut doc = Document::new(config);
    doc.add_page_with_size(Size::new(8.5, 11.0)).unwrap();
    let text = as_text(&doc.to_bytes().unwrap());
    assert!(text.contains("/MediaBox [0 0 612 792]"));
}

#[test]
fn test_page_resources_are_merged_from_all_contents() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let times = doc.standard_font("Times-Roman").unwrap();
    let courier = doc.standard_font("Courier").unwrap();

    let a = doc.add_contents(page).unwrap();
    doc.contents(a)
        .unwrap()
        .begin_text()
        .unwrap()
        .set_font(courier, 10.0)
        .unwrap()
        .show_text("first")
        .unwrap()
        .end_text()
        .unwrap();
    let b = doc.add_contents(page).unwrap();
    doc.contents(b)
        .unwrap()
        .begin_text()
        .unwrap()
        .set_font(times, 12.0)
        .unwrap()
        .set_font(courier, 12.0)
        .unwrap()
        .show_text("second")
        .unwrap()
        .end_text()
        .unwrap();

    let text = as_text(&doc.to_bytes().unwrap());
    assert!(text.contains(&format!("/Contents [{} 0 R {} 0 R]", a.number(), b.number())));
    // Sorted by code, each font once
    assert!(text.contains(&format!(
        "/Font << /F1 {} 0 R /F2 {} 0 R >>",
        times.number(),
        courier.number()
    )));
    assert!(text.contains("/F2 10 Tf\n(first) Tj"));
}

#[test]
fn test_content_stream_is_compressed_when_smaller() {
    init();
    let mut doc = Document::default();
    let page = doc.add_page().unwrap();
    let contents = doc.add_contents(page).unwrap();
    {
        let mut writer = doc.contents(contents).unwrap();
        for i in 0..50 {
            writer
                .set_color(Color::rgb(255, 0, 0), ColorTarget::NonStroking)
                .unwrap()
                .fill_rect(Rect::new(10.0, 10.0 * f64::from(i), 110.0, 10.0 * f64::from(i) + 5.0))
                .unwrap();
        }
    }
    let bytes = doc.to_bytes().unwrap();

    let header = format!("\n{} 0 obj\n", contents.number());
    let start = find(&bytes, header.as_bytes(), 0).unwrap();
    let dict_end = find(&bytes, b">>", start).unwrap();
    let dict = as_text(&bytes[start..dict_end]);
    assert!(dict.contains("/Filter /FlateDecode"));

    // Decode the payload and check the operators survived
    let length: usize = regex::Regex::new(r"/Length (\d+)")
        .unwrap()
        .captures(&dict)
        .unwrap()[1]
        .parse()
        .unwrap();
    let stream_at = find(&bytes, b"stream\n", dict_end).unwrap() + b"stream\n".len();
    let mut decoded = String::new();
    ZlibDecoder::new(&bytes[stream_at..stream_at + length])
        .read_to_string(&mut decoded)
        .unwrap();
    assert!(decoded.starts_with("1 0 0 rg\n10 0 100 5 re f\n"));
    assert_eq!(decoded.matches(" re f").count(), 50);
}

#[test]
fn test_uncompressed_stream_length() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let contents = doc.add_contents(page).unwrap();
    doc.contents(contents).unwrap().save_state().unwrap().restore_state().unwrap();
    let text = as_text(&doc.to_bytes().unwrap());
    assert!(text.contains("/Length 4\n>>\nstream\nq\nQ\n\nendstream"));
    assert!(!text.contains("FlateDecode"));
}

#[test]
fn test_show_text_rejects_wide_characters() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let contents = doc.add_contents(page).unwrap();
    let result = doc.contents(contents).unwrap().show_text("\u{4E2D}").map(|_| ());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_unknown_standard_font() {
    init();
    let mut doc = plain_doc();
    assert!(matches!(doc.standard_font("Comic Sans"), Err(Error::InvalidInput(_))));
}

#[test]
fn test_write_to_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let mut doc = Document::default();
    doc.add_page().unwrap();
    doc.create_file(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[test]
fn test_write_to_missing_directory_fails() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");
    assert!(matches!(Document::default().create_file(&path), Err(Error::Io(_))));
}
