//! Text fields (`/FT /Tx`).

use super::{FieldOptions, FieldSettings, FormFieldWidget, TextAlignment, TextFieldFlags};
use crate::geometry::Rect;
use crate::writer::acroform::FieldValues;

/// A text input field.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldWidget {
    settings: FieldSettings,
    flags: TextFieldFlags,
    alignment: TextAlignment,
    /// 0 means unlimited
    max_length: u32,
    value: Option<String>,
    default_value: Option<String>,
}

impl TextFieldWidget {
    /// Text field named `name` at `rect` (user units).
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            settings: FieldSettings::new(name, rect),
            flags: TextFieldFlags::empty(),
            alignment: TextAlignment::Left,
            max_length: 0,
            value: None,
            default_value: None,
        }
    }

    /// Current value (`/V`).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Value restored by a form reset (`/DV`).
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Maximum number of characters (`/MaxLen`).
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    /// Text alignment (`/Q`).
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Allow several lines.
    pub fn multiline(mut self) -> Self {
        self.flags |= TextFieldFlags::MULTILINE;
        self
    }

    /// Mask the value.
    pub fn password(mut self) -> Self {
        self.flags |= TextFieldFlags::PASSWORD;
        self
    }

    /// Value is a file path.
    pub fn file_select(mut self) -> Self {
        self.flags |= TextFieldFlags::FILE_SELECT;
        self
    }

    /// Disable spell checking.
    pub fn do_not_spell_check(mut self) -> Self {
        self.flags |= TextFieldFlags::DO_NOT_SPELL_CHECK;
        self
    }

    /// Disable scrolling.
    pub fn do_not_scroll(mut self) -> Self {
        self.flags |= TextFieldFlags::DO_NOT_SCROLL;
        self
    }
}

impl FieldOptions for TextFieldWidget {
    fn settings_mut(&mut self) -> &mut FieldSettings {
        &mut self.settings
    }
}

impl FormFieldWidget for TextFieldWidget {
    fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    fn field_type(&self) -> Option<&'static str> {
        Some("Tx")
    }

    fn type_flags(&self) -> u32 {
        self.flags.bits()
    }

    fn close_values(&self) -> FieldValues {
        FieldValues::Text {
            alignment: self.alignment,
            max_length: self.max_length,
            value: self.value.clone(),
            default_value: self.default_value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let field = TextFieldWidget::new("comments", Rect::default())
            .multiline()
            .do_not_scroll()
            .required();
        assert_eq!(field.type_flags(), (1 << 12) | (1 << 23));
        assert_eq!(field.field_flags(), (1 << 12) | (1 << 23) | 2);
        assert_eq!(field.field_type(), Some("Tx"));
    }

    #[test]
    fn test_close_values() {
        let field = TextFieldWidget::new("zip", Rect::default())
            .with_max_length(5)
            .with_value("12345")
            .with_alignment(TextAlignment::Right);
        match field.close_values() {
            FieldValues::Text {
                alignment,
                max_length,
                value,
                default_value,
            } => {
                assert_eq!(alignment, TextAlignment::Right);
                assert_eq!(max_length, 5);
                assert_eq!(value.as_deref(), Some("12345"));
                assert!(default_value.is_none());
            },
            other => panic!("unexpected values {:?}", other),
        }
    }
}
