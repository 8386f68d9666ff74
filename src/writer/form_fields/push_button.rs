//! Push buttons (`/FT /Btn` with the push-button flag).

use super::{ButtonFieldFlags, FieldOptions, FieldSettings, FormFieldWidget};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::geometry::Rect;
use crate::writer::acroform::FieldValues;

/// Viewer navigation performed by a named action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedAction {
    /// Next page
    NextPage,
    /// Previous page
    PrevPage,
    /// First page
    FirstPage,
    /// Last page
    LastPage,
}

impl NamedAction {
    /// Value of `/N`.
    pub fn as_name(&self) -> &'static str {
        match self {
            NamedAction::NextPage => "NextPage",
            NamedAction::PrevPage => "PrevPage",
            NamedAction::FirstPage => "FirstPage",
            NamedAction::LastPage => "LastPage",
        }
    }
}

/// Action run when the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// `/S /Named`
    Named(NamedAction),
    /// `/S /JavaScript`
    JavaScript(String),
}

impl ButtonAction {
    pub(crate) fn to_dictionary(&self) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        match self {
            ButtonAction::Named(action) => {
                dict.add_name("S", "Named");
                dict.add_name("N", action.as_name());
            },
            ButtonAction::JavaScript(script) => {
                dict.add_name("S", "JavaScript");
                dict.add_pdf_string("JS", script)?;
            },
        }
        Ok(dict)
    }
}

/// A push button.
#[derive(Debug, Clone, PartialEq)]
pub struct PushButtonWidget {
    settings: FieldSettings,
    action: Option<ButtonAction>,
}

impl PushButtonWidget {
    /// Push button without an action.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            settings: FieldSettings::new(name, rect),
            action: None,
        }
    }

    /// Run a named navigation action.
    pub fn with_named_action(mut self, action: NamedAction) -> Self {
        self.action = Some(ButtonAction::Named(action));
        self
    }

    /// Run a script.
    pub fn with_javascript(mut self, script: impl Into<String>) -> Self {
        self.action = Some(ButtonAction::JavaScript(script.into()));
        self
    }
}

impl FieldOptions for PushButtonWidget {
    fn settings_mut(&mut self) -> &mut FieldSettings {
        &mut self.settings
    }
}

impl FormFieldWidget for PushButtonWidget {
    fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    fn field_type(&self) -> Option<&'static str> {
        Some("Btn")
    }

    fn type_flags(&self) -> u32 {
        ButtonFieldFlags::PUSHBUTTON.bits()
    }

    fn field_entries(&self) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        if let Some(action) = &self.action {
            dict.add_dictionary("A", action.to_dictionary()?);
        }
        Ok(dict)
    }

    fn close_values(&self) -> FieldValues {
        FieldValues::None
    }
}
