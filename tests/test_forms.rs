//! Integration tests for AcroForm output.
//!
//! Fields are grouped under one node per page; radio buttons of the same
//! name share a group whose value is the first checked button.

use pdf_scribe::geometry::{Color, Rect};
use pdf_scribe::writer::form_fields::{
    ComboBoxWidget, FieldOptions, NamedAction, PushButtonWidget, RadioButtonWidget,
    TextAlignment, TextFieldWidget,
};
use pdf_scribe::writer::{AppearanceKind, Document, DocumentConfig};
use pdf_scribe::Error;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn plain_doc() -> Document {
    Document::new(DocumentConfig::default().with_compression(false))
}

fn render(doc: Document) -> String {
    String::from_utf8_lossy(&doc.to_bytes().unwrap()).into_owned()
}

fn rect(y: f64) -> Rect {
    Rect::new(72.0, y, 272.0, y + 18.0)
}

#[test]
fn test_form_dictionary_and_page_nodes() {
    init();
    let mut doc = plain_doc();
    let first = doc.add_page().unwrap();
    let second = doc.add_page().unwrap();
    let name = doc
        .add_text_field(first, TextFieldWidget::new("name", rect(700.0)))
        .unwrap();
    let city = doc
        .add_text_field(second, TextFieldWidget::new("city", rect(700.0)))
        .unwrap();
    // Same name on another page is allowed
    doc.add_text_field(second, TextFieldWidget::new("name", rect(650.0)))
        .unwrap();
    let form = doc.acro_form().unwrap();

    let text = render(doc);
    assert!(text.contains(&format!("/AcroForm {} 0 R", form.number())));
    assert!(text.contains("/NeedAppearances true"));
    assert!(text.contains("/DA (/Helv 0 Tf 0 g)"));
    assert!(text.contains("/DR << /Font << /Helv "));
    assert!(text.contains("/T (Page1)"));
    assert!(text.contains("/T (Page2)"));
    assert!(text.contains(&format!("/Annots [{} 0 R]", name.number())));
    assert!(text.contains(&format!("/Annots [{} 0 R ", city.number())));
    assert_eq!(text.matches("/Subtype /Widget").count(), 3);
    assert_eq!(text.matches("/FT /Tx").count(), 3);
}

#[test]
fn test_duplicate_field_on_one_page() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    doc.add_text_field(page, TextFieldWidget::new("email", rect(700.0)))
        .unwrap();
    let result = doc.add_combo_box(page, ComboBoxWidget::new("email", rect(650.0), ["a", "b"]));
    assert!(matches!(result, Err(Error::GraphIntegrity(_))));
    // The failed field left nothing behind
    let text = render(doc);
    assert_eq!(text.matches("/Subtype /Widget").count(), 1);
}

#[test]
fn test_field_on_foreign_object_fails() {
    init();
    let mut doc = plain_doc();
    doc.add_page().unwrap();
    let font = doc.standard_font("Courier").unwrap();
    let result = doc.add_text_field(font, TextFieldWidget::new("x", rect(0.0)));
    assert!(matches!(result, Err(Error::GraphIntegrity(_))));
}

#[test]
fn test_text_field_entries() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    doc.add_text_field(
        page,
        TextFieldWidget::new("comment", rect(500.0))
            .with_value("Hello (world)")
            .with_default_value("none")
            .with_max_length(80)
            .with_alignment(TextAlignment::Right)
            .multiline()
            .required()
            .with_alternate_name("Your comment")
            .with_border_color(Color::BLACK)
            .with_background_color(Color::rgb(255, 255, 0)),
    )
    .unwrap();

    let text = render(doc);
    assert!(text.contains("/T (comment)"));
    assert!(text.contains("/V (Hello \\(world\\))"));
    assert!(text.contains("/DV (none)"));
    assert!(text.contains("/MaxLen 80"));
    assert!(text.contains("/Q 2"));
    // MULTILINE (bit 13) | REQUIRED (bit 2)
    assert!(text.contains(&format!("/Ff {}", (1 << 12) | (1 << 1))));
    assert!(text.contains("/TU (Your comment)"));
    assert!(text.contains("/MK << /BC [0] /BG [1 1 0] >>"));
    assert!(text.contains("/F 4"));
    assert!(text.contains("/Rect [72 500 272 518]"));
}

#[test]
fn test_combo_box_entries() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let combo = ComboBoxWidget::new("size", rect(400.0), ["Small", "Large"])
        .with_value("Large")
        .editable()
        .read_only();
    assert_eq!(combo.items(), ["Small".to_string(), "Large".to_string()]);
    doc.add_combo_box(page, combo).unwrap();

    let text = render(doc);
    assert!(text.contains("/FT /Ch"));
    assert!(text.contains("/Opt [(Small) (Large)]"));
    assert!(text.contains("/V (Large)"));
    // COMBO | EDIT | READ_ONLY
    assert!(text.contains(&format!("/Ff {}", (1 << 17) | (1 << 18) | 1)));
}

#[test]
fn test_radio_group() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let small = doc
        .add_radio_button(page, RadioButtonWidget::new("size", "Small", rect(300.0)))
        .unwrap();
    let large = doc
        .add_radio_button(
            page,
            RadioButtonWidget::new("size", "Large", rect(270.0))
                .checked()
                .with_alternate_name("Pick a size"),
        )
        .unwrap();
    let huge = doc
        .add_radio_button(page, RadioButtonWidget::new("size", "Huge", rect(240.0)).checked())
        .unwrap();

    let text = render(doc);
    assert!(text.contains(&format!(
        "/Kids [{} 0 R {} 0 R {} 0 R]",
        small.number(),
        large.number(),
        huge.number()
    )));
    assert!(text.contains("/Ff 49152"));
    assert!(text.contains("/T (size)"));
    // First checked button wins
    assert!(text.contains("/V /Large"));
    assert!(!text.contains("/V /Huge"));
    assert_eq!(text.matches("/TU (Pick a size)").count(), 2);
    assert!(text.contains("/AS /Off"));
    assert!(text.contains("/AS /Large"));
    assert!(text.contains("/AS /Huge"));
    // Kids carry no name of their own
    assert_eq!(text.matches("/T (size)").count(), 1);
    assert!(!text.contains("/MK"));
}

#[test]
fn test_radio_name_clashes_with_text_field() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    doc.add_text_field(page, TextFieldWidget::new("size", rect(700.0)))
        .unwrap();
    let result = doc.add_radio_button(page, RadioButtonWidget::new("size", "A", rect(650.0)));
    assert!(matches!(result, Err(Error::GraphIntegrity(_))));
}

#[test]
fn test_radio_on_state_must_not_be_empty() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let result = doc.add_radio_button(page, RadioButtonWidget::new("size", " ", rect(650.0)));
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_push_button_with_action_and_appearances() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let next = doc
        .add_push_button(
            page,
            PushButtonWidget::new("next", rect(100.0))
                .with_named_action(NamedAction::NextPage)
                .with_caption("Next"),
        )
        .unwrap();
    let up = doc.add_xobject(200.0, 18.0).unwrap();
    let down = doc.add_xobject(200.0, 18.0).unwrap();
    doc.set_appearance(next, AppearanceKind::Normal, None, up).unwrap();
    doc.set_appearance(next, AppearanceKind::Down, None, down).unwrap();

    let text = render(doc);
    assert!(text.contains("/FT /Btn"));
    assert!(text.contains("/Ff 65536"));
    assert!(text.contains("/A << /S /Named /N /NextPage >>"));
    assert!(text.contains(&format!("/AP << /N {} 0 R /D {} 0 R >>", up.number(), down.number())));
    assert!(text.contains("/MK << /CA (Next) >>"));
}

#[test]
fn test_state_appearances() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let yes = doc
        .add_radio_button(page, RadioButtonWidget::new("agree", "Yes", rect(100.0)))
        .unwrap();
    let on = doc.add_xobject(18.0, 18.0).unwrap();
    let off = doc.add_xobject(18.0, 18.0).unwrap();
    doc.set_appearance(yes, AppearanceKind::Normal, Some("Yes"), on).unwrap();
    doc.set_appearance(yes, AppearanceKind::Normal, Some("Off"), off).unwrap();

    let text = render(doc);
    assert!(text.contains(&format!(
        "/AP << /N << /Yes {} 0 R /Off {} 0 R >> >>",
        on.number(),
        off.number()
    )));
}

#[test]
fn test_appearance_needs_an_xobject() {
    init();
    let mut doc = plain_doc();
    let page = doc.add_page().unwrap();
    let field = doc
        .add_text_field(page, TextFieldWidget::new("a", rect(100.0)))
        .unwrap();
    let font = doc.standard_font("Courier").unwrap();
    assert!(doc.set_appearance(field, AppearanceKind::Normal, None, font).is_err());
}

#[test]
fn test_javascript_action() {
    init();
    let mut doc = plain_doc();
    let action = doc.add_javascript("app.alert('hi');").unwrap();
    let text = render(doc);
    assert!(text.contains(&format!("{} 0 obj\n<<\n/Type /Action\n/S /JavaScript\n/JS (app.alert\\('hi'\\);)", action.number())));
}
