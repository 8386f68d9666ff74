//! Interactive form (AcroForm).
//!
//! The form dictionary is created on first use and linked from the catalog.
//! Fields are grouped per page under a page node (`/T (Page<n>)`), and radio
//! buttons of one page are grouped by name under a radio group field. The
//! `/Kids` arrays, the radio group value and the widgets' appearance state
//! are resolved at close.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::{AppearanceKind, Document};
//! use pdf_scribe::writer::form_fields::{ComboBoxWidget, NamedAction, PushButtonWidget};
//! use pdf_scribe::geometry::Rect;
//!
//! let mut doc = Document::default();
//! let page = doc.add_page()?;
//! doc.add_combo_box(page, ComboBoxWidget::new("color", Rect::new(72.0, 700.0, 172.0, 716.0), ["Red", "Blue"]))?;
//! let next = doc.add_push_button(
//!     page,
//!     PushButtonWidget::new("next", Rect::new(72.0, 650.0, 132.0, 670.0)).with_named_action(NamedAction::NextPage),
//! )?;
//! let look = doc.add_xobject(60.0, 20.0)?;
//! doc.set_appearance(next, AppearanceKind::Normal, None, look)?;
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

use super::document::Document;
use super::form_fields::{
    ButtonFieldFlags, ComboBoxWidget, FormFieldWidget, PushButtonWidget, RadioButtonWidget, TextAlignment,
    TextFieldWidget,
};
use super::indirect::{CloseContext, Finalize, ObjectRole};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::geometry::Color;
use crate::object::{text_string_bytes, Object, ObjectId, ObjectKind};

/// Default appearance of variable text.
const DEFAULT_APPEARANCE: &[u8] = b"/Helv 0 Tf 0 g";

/// Document form dictionary state.
#[derive(Debug, Clone, Default)]
pub(crate) struct AcroFormState {
    pub(crate) page_nodes: Vec<ObjectId>,
}

impl Finalize for AcroFormState {
    fn finalize(&self, _ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        dict.add_reference_array("Fields", &self.page_nodes);
        dict.add_boolean("NeedAppearances", true);
        dict.add_byte_string("DA", DEFAULT_APPEARANCE);
        Ok(dict)
    }
}

/// Fields of one page.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageNodeState {
    pub(crate) page: ObjectId,
    /// One-based page number
    pub(crate) page_number: usize,
    pub(crate) kids: Vec<ObjectId>,
    /// Names of `kids`, in the same order
    pub(crate) names: Vec<String>,
    /// Radio groups by name
    pub(crate) groups: Vec<(String, ObjectId)>,
}

impl Finalize for PageNodeState {
    fn finalize(&self, _ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        dict.add_reference_array("Kids", &self.kids);
        dict.add_pdf_string("T", &format!("Page{}", self.page_number))?;
        Ok(dict)
    }
}

/// Radio group field; `/V` is the on-state of the first checked button.
#[derive(Debug, Clone, Default)]
pub(crate) struct RadioGroupState {
    pub(crate) buttons: Vec<ObjectId>,
}

impl Finalize for RadioGroupState {
    fn finalize(&self, ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        dict.add_reference_array("Kids", &self.buttons);
        for id in &self.buttons {
            let button = ctx.object(*id)?;
            let on_state = match &button.role {
                ObjectRole::Field(FieldState {
                    values: FieldValues::Radio { on_state, checked: true },
                    ..
                }) => on_state,
                ObjectRole::Field(_) => continue,
                _ => return Err(Error::integrity(format!("object {} is not a radio button", id.number()))),
            };
            dict.add_name("V", on_state);
            for key in ["TU", "TM"] {
                if let Some(value) = button.dict.get(key) {
                    dict.insert(key, value.clone());
                }
            }
            break;
        }
        Ok(dict)
    }
}

/// Kind-specific values written when the field is closed.
#[derive(Debug, Clone, Default)]
pub(crate) enum FieldValues {
    /// Nothing beyond the common entries
    #[default]
    None,
    Text {
        alignment: TextAlignment,
        max_length: u32,
        value: Option<String>,
        default_value: Option<String>,
    },
    Combo {
        items: Vec<String>,
        alignment: TextAlignment,
        value: Option<String>,
    },
    Radio {
        on_state: String,
        checked: bool,
    },
}

/// Merged field and widget annotation.
#[derive(Debug, Clone, Default)]
pub(crate) struct FieldState {
    pub(crate) values: FieldValues,
    pub(crate) border_color: Option<Color>,
    pub(crate) background_color: Option<Color>,
    pub(crate) caption: Option<String>,
}

impl FieldState {
    /// Appearance characteristics (`/MK`); radio buttons never carry one.
    fn appearance_characteristics(&self) -> Result<Option<Dictionary>> {
        if matches!(self.values, FieldValues::Radio { .. }) {
            return Ok(None);
        }
        if self.border_color.is_none() && self.background_color.is_none() && self.caption.is_none() {
            return Ok(None);
        }
        let mut mk = Dictionary::new();
        if let Some(color) = self.border_color {
            mk.add_color("BC", color);
        }
        if let Some(color) = self.background_color {
            mk.add_color("BG", color);
        }
        if let Some(caption) = &self.caption {
            mk.add_pdf_string("CA", caption)?;
        }
        Ok(Some(mk))
    }
}

fn add_alignment(dict: &mut Dictionary, alignment: TextAlignment) {
    if alignment != TextAlignment::Left {
        dict.add_integer("Q", alignment.q_value());
    }
}

impl Finalize for FieldState {
    fn finalize(&self, _ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        match &self.values {
            FieldValues::None => {},
            FieldValues::Text {
                alignment,
                max_length,
                value,
                default_value,
            } => {
                add_alignment(&mut dict, *alignment);
                if *max_length > 0 {
                    dict.add_integer("MaxLen", i64::from(*max_length));
                }
                if let Some(value) = value {
                    dict.add_pdf_string("V", value)?;
                }
                if let Some(value) = default_value {
                    dict.add_pdf_string("DV", value)?;
                }
            },
            FieldValues::Combo { items, alignment, value } => {
                let options = items.iter().map(|item| Object::text(item)).collect::<Result<Vec<_>>>()?;
                dict.add_array("Opt", options);
                add_alignment(&mut dict, *alignment);
                if let Some(value) = value {
                    dict.add_pdf_string("V", value)?;
                }
            },
            FieldValues::Radio { on_state, checked } => {
                dict.add_name("AS", if *checked { on_state.as_str() } else { "Off" });
            },
        }
        if let Some(mk) = self.appearance_characteristics()? {
            dict.add_dictionary("MK", mk);
        }
        Ok(dict)
    }
}

/// Which appearance of a widget to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearanceKind {
    /// `/N`
    Normal,
    /// `/R`
    Rollover,
    /// `/D`
    Down,
}

impl AppearanceKind {
    fn key(&self) -> &'static str {
        match self {
            AppearanceKind::Normal => "N",
            AppearanceKind::Rollover => "R",
            AppearanceKind::Down => "D",
        }
    }
}

impl Document {
    /// Form dictionary, created and linked from the catalog on first use.
    pub fn acro_form(&mut self) -> Result<ObjectId> {
        if let Some(form) = self.acro_form {
            return Ok(form);
        }
        let helvetica = self.standard_font("Helvetica")?;
        let mut fonts = Dictionary::new();
        fonts.add_reference("Helv", helvetica);
        let mut resources = Dictionary::new();
        resources.add_dictionary("Font", fonts);
        let mut dict = Dictionary::new();
        dict.add_dictionary("DR", resources);

        let form = self
            .directory
            .register(ObjectKind::Dictionary, dict, ObjectRole::AcroForm(AcroFormState::default()));
        let catalog = self.catalog;
        self.object_mut(catalog)?.dict.add_reference("AcroForm", form);
        self.acro_form = Some(form);
        Ok(form)
    }

    fn form_state_mut(&mut self, form: ObjectId) -> Result<&mut AcroFormState> {
        match &mut self.object_mut(form)?.role {
            ObjectRole::AcroForm(state) => Ok(state),
            _ => Err(Error::integrity(format!("object {} is not the form dictionary", form.number()))),
        }
    }

    fn page_node_mut(&mut self, node: ObjectId) -> Result<&mut PageNodeState> {
        match &mut self.object_mut(node)?.role {
            ObjectRole::AcroPageNode(state) => Ok(state),
            _ => Err(Error::integrity(format!("object {} is not a form page node", node.number()))),
        }
    }

    /// Page node of `page`, created on first use.
    fn page_node(&mut self, page: ObjectId) -> Result<ObjectId> {
        let page_number = self.page_index(page)? + 1;
        let form = self.acro_form()?;
        let nodes = self.form_state_mut(form)?.page_nodes.clone();
        for node in nodes {
            if self.page_node_mut(node)?.page == page {
                return Ok(node);
            }
        }
        let state = PageNodeState {
            page,
            page_number,
            ..PageNodeState::default()
        };
        let node = self
            .directory
            .register(ObjectKind::Dictionary, Dictionary::new(), ObjectRole::AcroPageNode(state));
        self.form_state_mut(form)?.page_nodes.push(node);
        Ok(node)
    }

    fn add_widget_field(&mut self, page: ObjectId, widget: &dyn FormFieldWidget) -> Result<ObjectId> {
        let settings = widget.settings();
        text_string_bytes(&settings.name)?;
        let values = widget.close_values();
        let radio = matches!(values, FieldValues::Radio { .. });
        if let FieldValues::Radio { on_state, .. } = &values {
            if on_state.trim().is_empty() {
                return Err(Error::invalid("radio button on-state must not be empty"));
            }
        }
        let node = self.page_node(page)?;

        let (named, group) = {
            let state = self.page_node_mut(node)?;
            let named = state.names.iter().any(|n| *n == settings.name);
            let group = state.groups.iter().find(|(n, _)| *n == settings.name).map(|(_, id)| *id);
            (named, group)
        };
        if named && (!radio || group.is_none()) {
            return Err(Error::integrity(format!(
                "field {:?} already exists on page {}",
                settings.name,
                self.page_index(page)? + 1
            )));
        }

        let mut dict = widget.field_entries()?;
        dict.add_name("Type", "Annot");
        dict.add_name("Subtype", "Widget");
        dict.add_integer("F", 4);
        dict.add_reference("P", page);
        dict.add_rectangle("Rect", settings.rect.scale(self.scale()));
        if let Some(field_type) = widget.field_type() {
            dict.add_name("FT", field_type);
        }
        if !radio {
            dict.add_pdf_string("T", &settings.name)?;
        }
        if widget.field_flags() != 0 {
            dict.add_integer("Ff", i64::from(widget.field_flags()));
        }
        if let Some(name) = &settings.alternate_name {
            dict.add_pdf_string("TU", name)?;
        }
        if let Some(name) = &settings.mapping_name {
            dict.add_pdf_string("TM", name)?;
        }
        let state = FieldState {
            values,
            border_color: settings.border_color,
            background_color: settings.background_color,
            caption: settings.caption.clone(),
        };
        let field = self.directory.register(ObjectKind::Dictionary, dict, ObjectRole::Field(state));

        let parent = if radio {
            let group = match group {
                Some(group) => group,
                None => self.add_radio_group(node, &settings.name)?,
            };
            match &mut self.object_mut(group)?.role {
                ObjectRole::RadioGroup(state) => state.buttons.push(field),
                _ => return Err(Error::integrity(format!("object {} is not a radio group", group.number()))),
            }
            group
        } else {
            let state = self.page_node_mut(node)?;
            state.kids.push(field);
            state.names.push(settings.name.clone());
            node
        };
        self.object_mut(field)?.dict.add_reference("Parent", parent);
        self.attach_annotation(page, field)?;
        log::debug!("Form field {:?} added as object {}", settings.name, field.number());
        Ok(field)
    }

    fn add_radio_group(&mut self, node: ObjectId, name: &str) -> Result<ObjectId> {
        let mut dict = Dictionary::new();
        dict.add_name("FT", "Btn");
        let flags = ButtonFieldFlags::RADIO | ButtonFieldFlags::NO_TOGGLE_TO_OFF;
        dict.add_integer("Ff", i64::from(flags.bits()));
        dict.add_pdf_string("T", name)?;
        dict.add_reference("Parent", node);
        let group = self
            .directory
            .register(ObjectKind::Dictionary, dict, ObjectRole::RadioGroup(RadioGroupState::default()));
        let state = self.page_node_mut(node)?;
        state.kids.push(group);
        state.names.push(name.to_string());
        state.groups.push((name.to_string(), group));
        Ok(group)
    }

    /// Add a text field to `page`.
    pub fn add_text_field(&mut self, page: ObjectId, field: TextFieldWidget) -> Result<ObjectId> {
        self.add_widget_field(page, &field)
    }

    /// Add a combo box to `page`.
    pub fn add_combo_box(&mut self, page: ObjectId, field: ComboBoxWidget) -> Result<ObjectId> {
        self.add_widget_field(page, &field)
    }

    /// Add a push button to `page`.
    pub fn add_push_button(&mut self, page: ObjectId, field: PushButtonWidget) -> Result<ObjectId> {
        self.add_widget_field(page, &field)
    }

    /// Add a radio button to its group on `page`, creating the group for the
    /// first button.
    pub fn add_radio_button(&mut self, page: ObjectId, button: RadioButtonWidget) -> Result<ObjectId> {
        self.add_widget_field(page, &button)
    }

    /// Set a widget appearance. Without `state` the appearance is the
    /// XObject itself (`/AP << /N ref >>`); with a state it is added to the
    /// appearance's state dictionary (`/AP << /N << /On ref /Off ref >> >>`).
    pub fn set_appearance(
        &mut self,
        field: ObjectId,
        kind: AppearanceKind,
        state: Option<&str>,
        xobject: ObjectId,
    ) -> Result<()> {
        self.ensure_xobject(xobject)?;
        let obj = self.object_mut(field)?;
        if !matches!(obj.role, ObjectRole::Field(_)) {
            return Err(Error::invalid(format!("object {} is not a form field", field.number())));
        }
        if !matches!(obj.dict.get("AP"), Some(Object::Dictionary(_))) {
            obj.dict.add_dictionary("AP", Dictionary::new());
        }
        let Some(Object::Dictionary(ap)) = obj.dict.get_mut("AP") else {
            return Err(Error::integrity("appearance dictionary vanished"));
        };
        match state {
            None => ap.add_reference(kind.key(), xobject),
            Some(state) => {
                if !matches!(ap.get(kind.key()), Some(Object::Dictionary(_))) {
                    ap.add_dictionary(kind.key(), Dictionary::new());
                }
                if let Some(Object::Dictionary(states)) = ap.get_mut(kind.key()) {
                    states.add_reference(state, xobject);
                }
            },
        }
        Ok(())
    }

    /// JavaScript action object, for use as `/A` or in trigger dictionaries.
    pub fn add_javascript(&mut self, script: &str) -> Result<ObjectId> {
        let mut dict = Dictionary::with_type("Action");
        dict.add_name("S", "JavaScript");
        dict.add_pdf_string("JS", script)?;
        Ok(self.add_object(dict))
    }
}
