//! Form XObjects.
//!
//! A form XObject is a content stream with its own bounding box and
//! `/Resources`. It can be painted from any content stream and serves as
//! widget appearance.

use super::document::Document;
use super::indirect::ObjectRole;
use super::page::ContentsState;
use super::resources::ResourceKind;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{ObjectId, ObjectKind};

impl Document {
    /// Create a form XObject of `width` x `height` user units. Write its
    /// operators through [`Document::contents`].
    pub fn add_xobject(&mut self, width: f64, height: f64) -> Result<ObjectId> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::invalid(format!(
                "XObject size must be positive, got {} x {}",
                width, height
            )));
        }
        let scale = self.scale();
        let mut dict = Dictionary::with_type("XObject");
        dict.add_name("Subtype", "Form");
        dict.add_rectangle("BBox", Rect::from_size(width * scale, height * scale));
        let state = ContentsState {
            form: true,
            ..ContentsState::default()
        };
        let id = self.directory.register(ObjectKind::Stream, dict, ObjectRole::Contents(state));
        let code = self.registry.next_code(ResourceKind::XObject);
        self.object_mut(id)?.resource_code = Some(code);
        Ok(id)
    }

    /// Put an XObject on a layer created by [`Document::add_layer`] (`/OC`).
    pub fn set_xobject_layer(&mut self, xobject: ObjectId, layer: ObjectId) -> Result<()> {
        self.ensure_layer(layer)?;
        let obj = self.object_mut(xobject)?;
        if !matches!(&obj.role, ObjectRole::Contents(state) if state.form) {
            return Err(Error::invalid(format!("object {} is not a form XObject", xobject.number())));
        }
        obj.dict.add_reference("OC", layer);
        Ok(())
    }

    pub(crate) fn ensure_xobject(&self, xobject: ObjectId) -> Result<()> {
        match &self.directory.get(xobject)?.role {
            ObjectRole::Contents(state) if state.form => Ok(()),
            _ => Err(Error::invalid(format!("object {} is not a form XObject", xobject.number()))),
        }
    }
}
