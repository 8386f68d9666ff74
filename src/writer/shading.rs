//! Axial shadings and their sampled color functions.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::{AxialShading, Document};
//! use pdf_scribe::geometry::{Color, Rect};
//!
//! let mut doc = Document::default();
//! let function = doc.add_shading_function(&[Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)])?;
//! let shading = doc.add_axial_shading(
//!     function,
//!     AxialShading::new().with_bbox(Rect::new(0.0, 0.0, 200.0, 100.0)),
//! )?;
//! # let _ = shading;
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

use super::document::Document;
use super::indirect::{CloseContext, Finalize, ObjectRole};
use super::resources::ResourceKind;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::geometry::{Color, Rect};
use crate::object::{Object, ObjectId, ObjectKind};

/// How the shading direction relates to the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMapping {
    /// Direction points are fractions of the bounding box (0..1)
    #[default]
    Relative,
    /// Direction points are absolute user-space coordinates
    Absolute,
}

/// Axial (type 2) shading settings.
///
/// The direction runs from `(left, bottom)` to `(right, top)` of the
/// direction rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialShading {
    bbox: Rect,
    direction: Rect,
    mapping: ShadingMapping,
    anti_alias: bool,
    extend_before: bool,
    extend_after: bool,
}

impl Default for AxialShading {
    fn default() -> Self {
        Self {
            bbox: Rect::new(0.0, 0.0, 1.0, 1.0),
            direction: Rect::new(0.0, 0.0, 1.0, 0.0),
            mapping: ShadingMapping::Relative,
            anti_alias: false,
            extend_before: true,
            extend_after: true,
        }
    }
}

impl AxialShading {
    /// Unit bounding box, left-to-right relative direction, both ends
    /// extended.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounding box in user units.
    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = bbox;
        self
    }

    /// Axis from `(x0, y0)` to `(x1, y1)`.
    pub fn with_direction(mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        self.direction = Rect::new(x0, y0, x1, y1);
        self
    }

    /// Direction mapping.
    pub fn with_mapping(mut self, mapping: ShadingMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Request anti-aliasing.
    pub fn anti_alias(mut self) -> Self {
        self.anti_alias = true;
        self
    }

    /// Extend the shading beyond the start and end of the axis.
    pub fn with_extend(mut self, before: bool, after: bool) -> Self {
        self.extend_before = before;
        self.extend_after = after;
        self
    }
}

/// Close-time state of an axial shading; geometry is already in points.
#[derive(Debug, Clone, Default)]
pub(crate) struct AxialShadingState {
    pub(crate) settings: AxialShading,
}

impl AxialShadingState {
    fn coords(&self) -> [f64; 4] {
        let b = self.settings.bbox;
        let d = self.settings.direction;
        match self.settings.mapping {
            ShadingMapping::Relative => [
                b.left * (1.0 - d.left) + b.right * d.left,
                b.bottom * (1.0 - d.bottom) + b.top * d.bottom,
                b.left * (1.0 - d.right) + b.right * d.right,
                b.bottom * (1.0 - d.top) + b.top * d.top,
            ],
            ShadingMapping::Absolute => [d.left, d.bottom, d.right, d.top],
        }
    }
}

impl Finalize for AxialShadingState {
    fn finalize(&self, _ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        dict.add_rectangle("BBox", self.settings.bbox);
        dict.add_array("Coords", self.coords().iter().map(|v| Object::Real(*v)).collect());
        dict.add_array(
            "Extend",
            vec![
                Object::Boolean(self.settings.extend_before),
                Object::Boolean(self.settings.extend_after),
            ],
        );
        Ok(dict)
    }
}

impl Document {
    /// Sampled RGB function over `colors`, evenly spaced on [0 1].
    pub fn add_shading_function(&mut self, colors: &[Color]) -> Result<ObjectId> {
        if colors.len() < 2 {
            return Err(Error::invalid(format!(
                "a shading function needs at least 2 colors, got {}",
                colors.len()
            )));
        }
        let mut dict = Dictionary::new();
        dict.add_integer("FunctionType", 0);
        dict.add_array("Domain", vec![Object::Integer(0), Object::Integer(1)]);
        dict.add_array("Range", [0, 1, 0, 1, 0, 1].iter().map(|v| Object::Integer(*v)).collect());
        dict.add_integer("BitsPerSample", 8);
        dict.add_array("Size", vec![Object::Integer(colors.len() as i64)]);

        let id = self.directory.register(ObjectKind::Stream, dict, ObjectRole::Plain);
        let samples: Vec<u8> = colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
        self.object_mut(id)?.append_bytes(&samples);
        Ok(id)
    }

    /// Axial shading resource using `function` for its colors.
    pub fn add_axial_shading(&mut self, function: ObjectId, settings: AxialShading) -> Result<ObjectId> {
        if self.directory.get(function)?.kind != ObjectKind::Stream {
            return Err(Error::invalid(format!(
                "object {} is not a function stream",
                function.number()
            )));
        }
        let scale = self.scale();
        let mut settings = settings;
        settings.bbox = settings.bbox.scale(scale);
        if settings.mapping == ShadingMapping::Absolute {
            settings.direction = settings.direction.scale(scale);
        }

        let mut dict = Dictionary::new();
        dict.add_name("ColorSpace", "DeviceRGB");
        dict.add_integer("ShadingType", 2);
        dict.add_reference("Function", function);
        if settings.anti_alias {
            dict.add_boolean("AntiAlias", true);
        }

        let id = self.directory.register(
            ObjectKind::Dictionary,
            dict,
            ObjectRole::AxialShading(AxialShadingState { settings }),
        );
        let code = self.registry.next_code(ResourceKind::Shading);
        self.object_mut(id)?.resource_code = Some(code);
        Ok(id)
    }
}
