//! Radio buttons.
//!
//! Buttons sharing a group name on one page are collected under a single
//! radio group field. The group carries `/FT`, `/T` and the selected value;
//! each button only records its on-state.

use super::{FieldOptions, FieldSettings, FormFieldWidget};
use crate::geometry::Rect;
use crate::writer::acroform::FieldValues;

/// One button of a radio group.
#[derive(Debug, Clone, PartialEq)]
pub struct RadioButtonWidget {
    settings: FieldSettings,
    on_state: String,
    checked: bool,
}

impl RadioButtonWidget {
    /// Button of `group` that turns the group's value to `on_state`.
    pub fn new(group: impl Into<String>, on_state: impl Into<String>, rect: Rect) -> Self {
        Self {
            settings: FieldSettings::new(group, rect),
            on_state: on_state.into(),
            checked: false,
        }
    }

    /// Start selected.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Name of the group.
    pub fn group(&self) -> &str {
        &self.settings.name
    }

    /// Value the group takes when this button is on.
    pub fn on_state(&self) -> &str {
        &self.on_state
    }
}

impl FieldOptions for RadioButtonWidget {
    fn settings_mut(&mut self) -> &mut FieldSettings {
        &mut self.settings
    }
}

impl FormFieldWidget for RadioButtonWidget {
    fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    fn field_type(&self) -> Option<&'static str> {
        None
    }

    fn type_flags(&self) -> u32 {
        0
    }

    fn close_values(&self) -> FieldValues {
        FieldValues::Radio {
            on_state: self.on_state.clone(),
            checked: self.checked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radio_button() {
        let button = RadioButtonWidget::new("size", "Large", Rect::default()).checked();
        assert_eq!(button.group(), "size");
        assert_eq!(button.on_state(), "Large");
        assert_eq!(button.field_type(), None);
        assert!(matches!(
            button.close_values(),
            FieldValues::Radio { checked: true, .. }
        ));
    }
}
