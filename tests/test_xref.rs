//! Cross-reference table and trailer tests.
//!
//! Every in-use entry must point at the exact byte where its `n 0 obj`
//! header starts, and `startxref` must point at the `xref` keyword.

use pdf_scribe::encryption::EncryptionConfig;
use pdf_scribe::geometry::Rect;
use pdf_scribe::writer::{Document, DocumentConfig, OutlineStyle};
use regex::bytes::Regex;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parsed `xref` section.
struct XrefTable {
    offset: usize,
    entries: Vec<(usize, u32, u8)>,
}

fn parse_xref(bytes: &[u8]) -> XrefTable {
    let startxref = Regex::new(r"startxref\n(\d+)\n%%EOF\n$").unwrap();
    let caps = startxref.captures(bytes).expect("startxref trailer missing");
    let offset: usize = std::str::from_utf8(&caps[1]).unwrap().parse().unwrap();

    let header = Regex::new(r"^xref\n0 (\d+)\n").unwrap();
    let caps = header.captures(&bytes[offset..]).expect("xref keyword not at startxref");
    let size: usize = std::str::from_utf8(&caps[1]).unwrap().parse().unwrap();
    let records_at = offset + caps[0].len();

    let record = Regex::new(r"^(\d{10}) (\d{5}) ([nf])\r\n$").unwrap();
    let entries = (0..size)
        .map(|i| {
            let raw = &bytes[records_at + i * 20..records_at + (i + 1) * 20];
            let caps = record.captures(raw).expect("malformed xref record");
            (
                std::str::from_utf8(&caps[1]).unwrap().parse().unwrap(),
                std::str::from_utf8(&caps[2]).unwrap().parse().unwrap(),
                caps[3][0],
            )
        })
        .collect();
    XrefTable { offset, entries }
}

fn assert_offsets_match(bytes: &[u8]) -> XrefTable {
    let table = parse_xref(bytes);
    assert_eq!(table.entries[0], (0, 65535, b'f'));
    for (number, (offset, generation, kind)) in table.entries.iter().enumerate().skip(1) {
        assert_eq!(*kind, b'n', "object {} should be in use", number);
        assert_eq!(*generation, 0);
        let header = format!("{} 0 obj\n", number);
        assert!(
            bytes[*offset..].starts_with(header.as_bytes()),
            "object {} not found at offset {}",
            number,
            offset
        );
    }
    table
}

#[test]
fn test_minimal_document_offsets() {
    init();
    let bytes = Document::default().to_bytes().unwrap();
    let table = assert_offsets_match(&bytes);
    assert_eq!(table.entries.len(), 3);
    let trailer = String::from_utf8_lossy(&bytes[table.offset..]).into_owned();
    assert!(trailer.contains("trailer\n<<\n/Size 3\n/Root 1 0 R\n>>\nstartxref\n"));
}

#[test]
fn test_offsets_with_compressed_streams() {
    init();
    let mut doc = Document::default();
    let font = doc.standard_font("Helvetica").unwrap();
    for n in 0..5 {
        let page = doc.add_page().unwrap();
        let contents = doc.add_contents(page).unwrap();
        let mut writer = doc.contents(contents).unwrap();
        writer.begin_text().unwrap().set_font(font, 12.0).unwrap();
        for line in 0..40 {
            writer
                .move_text(0.0, -14.0)
                .unwrap()
                .show_text(&format!("Page {} line {}", n, line))
                .unwrap();
        }
        writer.end_text().unwrap();
    }
    let bytes = doc.to_bytes().unwrap();
    let table = assert_offsets_match(&bytes);
    // catalog, page tree, font, 5 x (page + contents)
    assert_eq!(table.entries.len(), 14);
}

#[test]
fn test_offsets_with_encryption_and_info() {
    init();
    let mut doc = Document::new(DocumentConfig::default().with_compression(false));
    let page = doc.add_page().unwrap();
    doc.set_title("Encrypted (with parens)").unwrap();
    doc.add_web_link(page, Rect::new(0.0, 0.0, 100.0, 20.0), "https://example.com/")
        .unwrap();
    let root = doc.bookmarks_root().unwrap();
    doc.add_bookmark(root, OutlineStyle::new(), "Start", page, 0.0, 792.0)
        .unwrap();
    doc.set_encryption(EncryptionConfig::new("user", "owner"));

    let bytes = doc.to_bytes().unwrap();
    let table = assert_offsets_match(&bytes);
    let trailer = String::from_utf8_lossy(&bytes[table.offset..]).into_owned();
    assert!(Regex::new(r"/Info \d+ 0 R").unwrap().is_match(trailer.as_bytes()));
    assert!(Regex::new(r"/Encrypt \d+ 0 R").unwrap().is_match(trailer.as_bytes()));
}

#[test]
fn test_detached_contents_get_in_use_entries() {
    init();
    let mut doc = Document::new(DocumentConfig::default().with_compression(false));
    doc.add_page().unwrap();
    // A detached content stream is still written: every registered object
    // gets an in-use entry.
    doc.add_contents_detached();
    let bytes = doc.to_bytes().unwrap();
    let table = assert_offsets_match(&bytes);
    assert_eq!(table.entries.len(), 5);
}

#[test]
fn test_record_width_is_twenty_bytes() {
    init();
    let mut doc = Document::default();
    for _ in 0..12 {
        doc.add_page().unwrap();
    }
    let bytes = doc.to_bytes().unwrap();
    let table = parse_xref(&bytes);
    let header_len = format!("xref\n0 {}\n", table.entries.len()).len();
    let records_end = table.offset + header_len + 20 * table.entries.len();
    assert!(bytes[records_end..].starts_with(b"trailer\n"));
}
