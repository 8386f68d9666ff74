//! Combo boxes (`/FT /Ch` with the combo flag).

use super::{ChoiceFieldFlags, FieldOptions, FieldSettings, FormFieldWidget, TextAlignment};
use crate::geometry::Rect;
use crate::writer::acroform::FieldValues;

/// A drop-down list, optionally editable.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboBoxWidget {
    settings: FieldSettings,
    flags: ChoiceFieldFlags,
    items: Vec<String>,
    alignment: TextAlignment,
    value: Option<String>,
}

impl ComboBoxWidget {
    /// Combo box offering `items`.
    pub fn new<I, S>(name: impl Into<String>, rect: Rect, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            settings: FieldSettings::new(name, rect),
            flags: ChoiceFieldFlags::COMBO,
            items: items.into_iter().map(Into::into).collect(),
            alignment: TextAlignment::Left,
            value: None,
        }
    }

    /// Selected value (`/V`).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Text alignment (`/Q`).
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Let the user type a value.
    pub fn editable(mut self) -> Self {
        self.flags |= ChoiceFieldFlags::EDIT;
        self
    }

    /// Ask the viewer to sort the options.
    pub fn sorted(mut self) -> Self {
        self.flags |= ChoiceFieldFlags::SORT;
        self
    }

    /// Allow several selections.
    pub fn multi_select(mut self) -> Self {
        self.flags |= ChoiceFieldFlags::MULTI_SELECT;
        self
    }

    /// Commit on every selection change.
    pub fn commit_on_sel_change(mut self) -> Self {
        self.flags |= ChoiceFieldFlags::COMMIT_ON_SEL_CHANGE;
        self
    }

    /// Options in display order.
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl FieldOptions for ComboBoxWidget {
    fn settings_mut(&mut self) -> &mut FieldSettings {
        &mut self.settings
    }
}

impl FormFieldWidget for ComboBoxWidget {
    fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    fn field_type(&self) -> Option<&'static str> {
        Some("Ch")
    }

    fn type_flags(&self) -> u32 {
        self.flags.bits()
    }

    fn close_values(&self) -> FieldValues {
        FieldValues::Combo {
            items: self.items.clone(),
            alignment: self.alignment,
            value: self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_flag_always_set() {
        let combo = ComboBoxWidget::new("color", Rect::default(), ["Red", "Green"]);
        assert_eq!(combo.type_flags(), ChoiceFieldFlags::COMBO.bits());
        assert_eq!(combo.items(), ["Red".to_string(), "Green".to_string()]);

        let edit = combo.editable().sorted();
        assert!(ChoiceFieldFlags::from_bits_truncate(edit.type_flags())
            .contains(ChoiceFieldFlags::COMBO | ChoiceFieldFlags::EDIT | ChoiceFieldFlags::SORT));
    }
}
