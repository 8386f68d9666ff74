//! Interactive form field widgets.
//!
//! Every field is a merged field dictionary and `/Widget` annotation. The
//! widgets here are plain builders; [`Document`](crate::writer::Document)
//! turns them into objects with `add_text_field`, `add_combo_box`,
//! `add_push_button` and `add_radio_button`.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::Document;
//! use pdf_scribe::writer::form_fields::{FieldOptions, RadioButtonWidget, TextFieldWidget};
//! use pdf_scribe::geometry::Rect;
//!
//! let mut doc = Document::default();
//! let page = doc.add_page()?;
//! doc.add_text_field(
//!     page,
//!     TextFieldWidget::new("name", Rect::new(72.0, 700.0, 272.0, 720.0))
//!         .with_value("John Doe")
//!         .required(),
//! )?;
//! doc.add_radio_button(page, RadioButtonWidget::new("size", "Small", Rect::new(72.0, 650.0, 84.0, 662.0)))?;
//! doc.add_radio_button(page, RadioButtonWidget::new("size", "Large", Rect::new(92.0, 650.0, 104.0, 662.0)).checked())?;
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

mod choice_fields;
mod field_flags;
mod push_button;
mod radio_button;
mod text_field;

pub use choice_fields::ComboBoxWidget;
pub use field_flags::{ButtonFieldFlags, ChoiceFieldFlags, FieldFlags, TextAlignment, TextFieldFlags};
pub use push_button::{ButtonAction, NamedAction, PushButtonWidget};
pub use radio_button::RadioButtonWidget;
pub use text_field::TextFieldWidget;

use super::acroform::FieldValues;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::geometry::{Color, Rect};

/// Settings shared by every field type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSettings {
    /// Field name (`/T`); the group name for radio buttons
    pub name: String,
    /// Widget rectangle in user units
    pub rect: Rect,
    /// Alternate name shown as a tooltip (`/TU`)
    pub alternate_name: Option<String>,
    /// Name used when exporting (`/TM`)
    pub mapping_name: Option<String>,
    /// Read-only, required and no-export flags
    pub flags: FieldFlags,
    /// Widget border color (`/MK /BC`)
    pub border_color: Option<Color>,
    /// Widget background color (`/MK /BG`)
    pub background_color: Option<Color>,
    /// Widget caption (`/MK /CA`)
    pub caption: Option<String>,
}

impl FieldSettings {
    pub(crate) fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            ..Self::default()
        }
    }
}

/// Builder methods shared by every field widget.
pub trait FieldOptions: Sized {
    /// Mutable access to the shared settings.
    fn settings_mut(&mut self) -> &mut FieldSettings;

    /// Set the alternate (tooltip) name.
    fn with_alternate_name(mut self, name: impl Into<String>) -> Self {
        self.settings_mut().alternate_name = Some(name.into());
        self
    }

    /// Set the export mapping name.
    fn with_mapping_name(mut self, name: impl Into<String>) -> Self {
        self.settings_mut().mapping_name = Some(name.into());
        self
    }

    /// Make the field read-only.
    fn read_only(mut self) -> Self {
        self.settings_mut().flags |= FieldFlags::READ_ONLY;
        self
    }

    /// Make the field required.
    fn required(mut self) -> Self {
        self.settings_mut().flags |= FieldFlags::REQUIRED;
        self
    }

    /// Exclude the field from submit actions.
    fn no_export(mut self) -> Self {
        self.settings_mut().flags |= FieldFlags::NO_EXPORT;
        self
    }

    /// Widget border color.
    fn with_border_color(mut self, color: Color) -> Self {
        self.settings_mut().border_color = Some(color);
        self
    }

    /// Widget background color.
    fn with_background_color(mut self, color: Color) -> Self {
        self.settings_mut().background_color = Some(color);
        self
    }

    /// Widget caption.
    fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.settings_mut().caption = Some(caption.into());
        self
    }
}

/// What the document needs to turn a widget into an object.
pub(crate) trait FormFieldWidget {
    fn settings(&self) -> &FieldSettings;

    /// `/FT`; `None` when inherited from a parent field
    fn field_type(&self) -> Option<&'static str>;

    /// Type-specific `/Ff` bits
    fn type_flags(&self) -> u32;

    /// Entries fixed when the field is added.
    fn field_entries(&self) -> Result<Dictionary> {
        Ok(Dictionary::new())
    }

    /// Values written at close.
    fn close_values(&self) -> FieldValues;

    /// Complete `/Ff` value.
    fn field_flags(&self) -> u32 {
        self.settings().flags.bits() | self.type_flags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_options() {
        let field = TextFieldWidget::new("a", Rect::default())
            .with_alternate_name("Your name")
            .with_mapping_name("name")
            .read_only()
            .no_export()
            .with_border_color(Color::BLACK)
            .with_caption("cap");
        let settings = field.settings();
        assert_eq!(settings.alternate_name.as_deref(), Some("Your name"));
        assert_eq!(settings.mapping_name.as_deref(), Some("name"));
        assert_eq!(settings.flags, FieldFlags::READ_ONLY | FieldFlags::NO_EXPORT);
        assert_eq!(settings.border_color, Some(Color::BLACK));
        assert!(settings.background_color.is_none());
        assert_eq!(field.field_flags(), 5);
    }
}
