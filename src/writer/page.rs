//! Pages, content streams and the page tree.
//!
//! Content streams record every resource they use in a sorted
//! [`ResourceList`]. At close a page merges the lists of all its content
//! streams into its `/Resources`; a form XObject writes its own.

use super::document::Document;
use super::indirect::{CloseContext, Finalize, IndirectObject, ObjectRole};
use super::resources::{ResourceKind, ResourceList, ResourceRef};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::geometry::{color_to_string, format_number, Color, ColorTarget, PaperType, Rect, Size};
use crate::object::{escape_literal, ObjectId, ObjectKind};

/// Page tree root state.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageTreeState {
    pub(crate) kids: Vec<ObjectId>,
}

impl Finalize for PageTreeState {
    fn finalize(&self, _ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        dict.add_reference_array("Kids", &self.kids);
        dict.add_integer("Count", self.kids.len() as i64);
        Ok(dict)
    }
}

/// Page state.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageState {
    pub(crate) contents: Vec<ObjectId>,
    pub(crate) annotations: Vec<ObjectId>,
}

impl Finalize for PageState {
    fn finalize(&self, ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        if !self.contents.is_empty() {
            dict.add_reference_array("Contents", &self.contents);
            let lists = self
                .contents
                .iter()
                .map(|id| match &ctx.object(*id)?.role {
                    ObjectRole::Contents(state) => Ok(&state.resources),
                    _ => Err(Error::integrity(format!("object {} is not a content stream", id.number()))),
                })
                .collect::<Result<Vec<&ResourceList>>>()?;
            let resources = match lists.as_slice() {
                [single] => single.to_dictionary(),
                _ => ResourceList::merge(lists.iter().copied()).to_dictionary(),
            };
            dict.add_dictionary("Resources", resources);
        }
        if !self.annotations.is_empty() {
            dict.add_reference_array("Annots", &self.annotations);
        }
        Ok(dict)
    }
}

/// Content stream or form XObject state.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContentsState {
    pub(crate) resources: ResourceList,
    /// Form XObjects carry their own `/Resources`
    pub(crate) form: bool,
}

impl Finalize for ContentsState {
    fn finalize(&self, _ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        if self.form {
            dict.add_dictionary("Resources", self.resources.to_dictionary());
        }
        Ok(dict)
    }
}

impl Document {
    /// Add a page of the configured default size.
    pub fn add_page(&mut self) -> Result<ObjectId> {
        let size = self.config.page_size;
        self.add_page_with_size(size)
    }

    /// Add a page of `size` user units.
    pub fn add_page_with_size(&mut self, size: Size) -> Result<ObjectId> {
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(Error::invalid(format!(
                "page size must be positive, got {} x {}",
                size.width, size.height
            )));
        }
        let scale = self.scale();
        self.register_page(Size::new(size.width * scale, size.height * scale))
    }

    /// Add a page of a standard paper size.
    pub fn add_page_with_paper(&mut self, paper: PaperType, landscape: bool) -> Result<ObjectId> {
        let size = paper.size();
        self.register_page(if landscape { size.landscape() } else { size })
    }

    fn register_page(&mut self, points: Size) -> Result<ObjectId> {
        let mut dict = Dictionary::with_type("Page");
        dict.add_reference("Parent", self.page_tree);
        dict.add_rectangle("MediaBox", Rect::from_size(points.width, points.height));
        let page = self
            .directory
            .register(ObjectKind::Dictionary, dict, ObjectRole::Page(PageState::default()));

        match &mut self.object_mut(self.page_tree)?.role {
            ObjectRole::PageTree(state) => state.kids.push(page),
            _ => return Err(Error::integrity("page tree root has lost its role")),
        }
        self.pages.push(page);
        log::trace!("Page {} is object {}", self.pages.len(), page.number());
        Ok(page)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page by zero-based index.
    pub fn page(&self, index: usize) -> Option<ObjectId> {
        self.pages.get(index).copied()
    }

    /// Create a content stream attached to `page`.
    pub fn add_contents(&mut self, page: ObjectId) -> Result<ObjectId> {
        let contents = self.add_contents_detached();
        self.attach_contents(page, contents)?;
        Ok(contents)
    }

    /// Create a content stream not yet attached to any page.
    pub fn add_contents_detached(&mut self) -> ObjectId {
        self.directory
            .register(ObjectKind::Stream, Dictionary::new(), ObjectRole::Contents(ContentsState::default()))
    }

    /// Attach an existing content stream to `page`. The same stream may be
    /// attached to several pages; attaching it twice to one page is a
    /// no-op.
    pub fn attach_contents(&mut self, page: ObjectId, contents: ObjectId) -> Result<()> {
        match &self.directory.get(contents)?.role {
            ObjectRole::Contents(state) if !state.form => {},
            _ => {
                return Err(Error::invalid(format!(
                    "object {} is not a page content stream",
                    contents.number()
                )))
            },
        }
        let state = self.page_state_mut(page)?;
        if !state.contents.contains(&contents) {
            state.contents.push(contents);
        }
        Ok(())
    }

    /// Operator writer for a content stream or form XObject.
    pub fn contents(&mut self, id: ObjectId) -> Result<ContentsWriter<'_>> {
        if !matches!(self.directory.get(id)?.role, ObjectRole::Contents(_)) {
            return Err(Error::invalid(format!("object {} is not a content stream", id.number())));
        }
        let scale = self.scale();
        Ok(ContentsWriter { doc: self, id, scale })
    }

    pub(crate) fn page_state_mut(&mut self, page: ObjectId) -> Result<&mut PageState> {
        match &mut self.object_mut(page)?.role {
            ObjectRole::Page(state) => Ok(state),
            _ => Err(Error::integrity(format!("object {} is not a page", page.number()))),
        }
    }

    /// Register an annotation in the page's `/Annots`.
    pub(crate) fn attach_annotation(&mut self, page: ObjectId, annotation: ObjectId) -> Result<()> {
        self.page_state_mut(page)?.annotations.push(annotation);
        Ok(())
    }
}

/// Appends operators to one content stream.
///
/// Coordinates are in user units; resources used through this writer are
/// recorded in the stream's resource list.
pub struct ContentsWriter<'a> {
    doc: &'a mut Document,
    id: ObjectId,
    scale: f64,
}

impl ContentsWriter<'_> {
    fn target(&mut self) -> Result<&mut IndirectObject> {
        self.doc.object_mut(self.id)
    }

    fn op(&mut self, text: &str) -> Result<&mut Self> {
        let obj = self.target()?;
        obj.append_str(text);
        obj.append_str("\n");
        Ok(self)
    }

    fn coord(&self, value: f64) -> String {
        format_number(value * self.scale)
    }

    /// Record `resource` in this stream's resource list and return its code
    /// name.
    fn use_resource(&mut self, resource: ObjectId, kind: ResourceKind) -> Result<String> {
        let code = self
            .doc
            .directory
            .get(resource)?
            .resource_code
            .filter(|code| code.kind == kind)
            .ok_or_else(|| {
                Error::invalid(format!(
                    "object {} is not a {} resource",
                    resource.number(),
                    kind.dictionary_key()
                ))
            })?;
        match &mut self.target()?.role {
            ObjectRole::Contents(state) => {
                state.resources.add(ResourceRef { code, id: resource });
            },
            _ => return Err(Error::integrity("content stream has lost its role")),
        }
        Ok(code.name())
    }

    /// Append operator text verbatim, followed by a line break.
    pub fn append_raw(&mut self, text: &str) -> Result<&mut Self> {
        self.op(text)
    }

    /// Set the fill or stroke color.
    pub fn set_color(&mut self, color: Color, target: ColorTarget) -> Result<&mut Self> {
        if target == ColorTarget::Array {
            return Err(Error::invalid("a color array is not an operator"));
        }
        self.op(&color_to_string(color, target))
    }

    /// Apply an extended graphics state.
    pub fn set_ext_gstate(&mut self, gs: ObjectId) -> Result<&mut Self> {
        let name = self.use_resource(gs, ResourceKind::ExtGState)?;
        self.op(&format!("/{} gs", name))
    }

    /// Paint a form XObject.
    pub fn paint_xobject(&mut self, xobject: ObjectId) -> Result<&mut Self> {
        let name = self.use_resource(xobject, ResourceKind::XObject)?;
        self.op(&format!("/{} Do", name))
    }

    /// Paint a shading over the current clip.
    pub fn paint_shading(&mut self, shading: ObjectId) -> Result<&mut Self> {
        let name = self.use_resource(shading, ResourceKind::Shading)?;
        self.op(&format!("/{} sh", name))
    }

    /// Begin a marked-content section shown only with `layer`.
    pub fn begin_layer(&mut self, layer: ObjectId) -> Result<&mut Self> {
        self.doc.ensure_layer(layer)?;
        let name = self.use_resource(layer, ResourceKind::Properties)?;
        self.op(&format!("/OC /{} BDC", name))
    }

    /// End the section opened by [`ContentsWriter::begin_layer`].
    pub fn end_layer(&mut self) -> Result<&mut Self> {
        self.op("EMC")
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> Result<&mut Self> {
        self.op("BT")
    }

    /// End a text object.
    pub fn end_text(&mut self) -> Result<&mut Self> {
        self.op("ET")
    }

    /// Select a font; `size` is in points.
    pub fn set_font(&mut self, font: ObjectId, size: f64) -> Result<&mut Self> {
        let name = self.use_resource(font, ResourceKind::Font)?;
        self.op(&format!("/{} {} Tf", name, format_number(size)))
    }

    /// Show text. Only characters up to U+00FF can be shown with the
    /// standard fonts.
    pub fn show_text(&mut self, text: &str) -> Result<&mut Self> {
        let mut bytes = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let code = u32::from(ch);
            if code > 0xFF {
                return Err(Error::invalid(format!(
                    "character U+{:04X} cannot be shown with a standard font",
                    code
                )));
            }
            bytes.push(code as u8);
        }
        let obj = self.target()?;
        obj.append_str("(");
        obj.append_bytes(&escape_literal(&bytes));
        obj.append_str(") Tj\n");
        Ok(self)
    }

    /// Move to the start of the next line, offset by `(x, y)`.
    pub fn move_text(&mut self, x: f64, y: f64) -> Result<&mut Self> {
        let op = format!("{} {} Td", self.coord(x), self.coord(y));
        self.op(&op)
    }

    /// Save the graphics state.
    pub fn save_state(&mut self) -> Result<&mut Self> {
        self.op("q")
    }

    /// Restore the graphics state.
    pub fn restore_state(&mut self) -> Result<&mut Self> {
        self.op("Q")
    }

    /// Fill a rectangle given in user units.
    pub fn fill_rect(&mut self, rect: Rect) -> Result<&mut Self> {
        let op = format!(
            "{} {} {} {} re f",
            self.coord(rect.left),
            self.coord(rect.bottom),
            self.coord(rect.width()),
            self.coord(rect.height())
        );
        self.op(&op)
    }
}
