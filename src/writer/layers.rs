//! Layers (optional content groups).
//!
//! Each layer is an `/OCG` dictionary with a `/Properties` resource code, so
//! content streams can mark sections with `/OC /O1 BDC ... EMC`. Form
//! XObjects join a layer through `/OC`. The catalog's `/OCProperties` lists
//! every layer and the ones hidden by default.
//!
//! ## Standards Reference
//!
//! - ISO 32000-1:2008: Section 8.11 "Optional Content"

use super::document::Document;
use super::indirect::ObjectRole;
use super::resources::ResourceKind;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectId, ObjectKind};

/// A layer as shown in the viewer's layer panel.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    visible: bool,
    printable: bool,
}

impl Layer {
    /// Create a visible, printable layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            printable: true,
        }
    }

    /// Hide the layer when the document opens.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Keep the layer off when printing.
    pub fn screen_only(mut self) -> Self {
        self.printable = false;
        self
    }

    fn ocg_dictionary(&self) -> Result<Dictionary> {
        let mut dict = Dictionary::with_type("OCG");
        dict.add_pdf_string("Name", &self.name)?;
        dict.add_name("Intent", "View");
        if !self.printable {
            let mut print = Dictionary::new();
            print.add_name("PrintState", "OFF");
            let mut usage = Dictionary::new();
            usage.add_dictionary("Print", print);
            dict.add_dictionary("Usage", usage);
        }
        Ok(dict)
    }
}

impl Document {
    /// Register a layer and list it in the catalog's `/OCProperties`.
    pub fn add_layer(&mut self, layer: Layer) -> Result<ObjectId> {
        if layer.name.is_empty() {
            return Err(Error::invalid("layer name is empty"));
        }
        let dict = layer.ocg_dictionary()?;
        let id = self.directory.register(ObjectKind::Dictionary, dict, ObjectRole::Plain);
        let code = self.registry.next_code(ResourceKind::Properties);
        self.object_mut(id)?.resource_code = Some(code);
        self.layers.push((id, layer.visible));

        let properties = self.oc_properties();
        let catalog = self.catalog;
        self.object_mut(catalog)?.dict.add_dictionary("OCProperties", properties);
        log::debug!("Layer '{}' registered as object {} ({})", layer.name, id.number(), code);
        Ok(id)
    }

    /// Fail unless `id` was created by [`Document::add_layer`].
    pub(crate) fn ensure_layer(&self, id: ObjectId) -> Result<()> {
        if self.layers.iter().any(|(layer, _)| *layer == id) {
            Ok(())
        } else {
            Err(Error::invalid(format!("object {} is not a layer", id.number())))
        }
    }

    fn oc_properties(&self) -> Dictionary {
        let all: Vec<ObjectId> = self.layers.iter().map(|(id, _)| *id).collect();
        let off: Vec<ObjectId> = self
            .layers
            .iter()
            .filter(|(_, visible)| !visible)
            .map(|(id, _)| *id)
            .collect();

        let mut default_config = Dictionary::new();
        default_config.insert("Order", Object::reference_array(all.iter().copied()));
        if !off.is_empty() {
            default_config.insert("OFF", Object::reference_array(off));
        }
        let mut properties = Dictionary::new();
        properties.insert("OCGs", Object::reference_array(all));
        properties.add_dictionary("D", default_config);
        properties
    }
}
