//! Document outline (bookmarks).
//!
//! The outline root is created on first use and linked from the catalog.
//! Each bookmark is its own object; sibling and child links are resolved
//! at close.
//!
//! # Example
//!
//! ```
//! use pdf_scribe::writer::{Document, OutlineStyle};
//!
//! let mut doc = Document::default();
//! let page = doc.add_page()?;
//! let root = doc.bookmarks_root()?;
//! let chapter = doc.add_bookmark(root, OutlineStyle::new().open(), "Chapter 1", page, 72.0, 720.0)?;
//! doc.add_bookmark(chapter, OutlineStyle::new().italic(), "Section 1.1", page, 72.0, 600.0)?;
//! assert_eq!(doc.bookmark_child(root, &[0, 0])?, doc.bookmark_child(chapter, &[0])?);
//! # Ok::<(), pdf_scribe::error::Error>(())
//! ```

use super::document::Document;
use super::indirect::{CloseContext, Finalize, ObjectRole};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::geometry::Color;
use crate::object::{Object, ObjectId, ObjectKind};

/// Display style of a bookmark.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutlineStyle {
    /// Display in italic
    pub italic: bool,
    /// Display in bold
    pub bold: bool,
    /// Text color
    pub color: Option<Color>,
    /// Show this bookmark's children expanded
    pub open_entries: bool,
    /// Zoom of the `/XYZ` destination; 0 keeps the viewer's zoom
    pub zoom: f64,
}

impl OutlineStyle {
    /// Plain, closed bookmark.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold style.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic style.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set text color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Expand children.
    pub fn open(mut self) -> Self {
        self.open_entries = true;
        self
    }

    /// Destination zoom.
    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Value of `/F`: italic 1, bold 2.
    pub fn flags(&self) -> i64 {
        let mut flags = 0i64;
        if self.italic {
            flags |= 1;
        }
        if self.bold {
            flags |= 2;
        }
        flags
    }
}

/// Links of the outline root or one bookmark.
#[derive(Debug, Clone, Default)]
pub(crate) struct OutlineState {
    pub(crate) open_entries: bool,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
    pub(crate) prev: Option<ObjectId>,
    pub(crate) next: Option<ObjectId>,
    /// Visible descendants; negative when closed
    pub(crate) count: i64,
}

impl Finalize for OutlineState {
    fn finalize(&self, _ctx: &CloseContext<'_>) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        if let (Some(first), Some(last)) = (self.children.first(), self.children.last()) {
            dict.add_reference("First", *first);
            dict.add_reference("Last", *last);
        }
        if self.count != 0 {
            dict.add_integer("Count", self.count);
        }
        if self.parent.is_some() {
            if let Some(prev) = self.prev {
                dict.add_reference("Prev", prev);
            }
            if let Some(next) = self.next {
                dict.add_reference("Next", next);
            }
        }
        Ok(dict)
    }
}

impl Document {
    /// Outline root, created and linked from the catalog on first use.
    pub fn bookmarks_root(&mut self) -> Result<ObjectId> {
        if let Some(root) = self.outline_root {
            return Ok(root);
        }
        let state = OutlineState {
            open_entries: true,
            ..OutlineState::default()
        };
        let root = self
            .directory
            .register(ObjectKind::Dictionary, Dictionary::with_type("Outlines"), ObjectRole::Outline(state));
        let catalog = self.catalog;
        self.object_mut(catalog)?.dict.add_reference("Outlines", root);
        self.outline_root = Some(root);
        Ok(root)
    }

    fn outline_state_mut(&mut self, id: ObjectId) -> Result<&mut OutlineState> {
        match &mut self.object_mut(id)?.role {
            ObjectRole::Outline(state) => Ok(state),
            _ => Err(Error::invalid(format!("object {} is not a bookmark", id.number()))),
        }
    }

    fn outline_state(&self, id: ObjectId) -> Result<&OutlineState> {
        match &self.directory.get(id)?.role {
            ObjectRole::Outline(state) => Ok(state),
            _ => Err(Error::invalid(format!("object {} is not a bookmark", id.number()))),
        }
    }

    /// Add a bookmark as the last child of `parent`, pointing at `(x, y)`
    /// on `page` (user units).
    pub fn add_bookmark(
        &mut self,
        parent: ObjectId,
        style: OutlineStyle,
        title: &str,
        page: ObjectId,
        x: f64,
        y: f64,
    ) -> Result<ObjectId> {
        self.outline_state(parent)?;
        self.page_index(page)?;

        let scale = self.scale();
        let mut dict = Dictionary::new();
        dict.add_pdf_string("Title", title)?;
        dict.add_reference("Parent", parent);
        dict.add_array(
            "Dest",
            vec![
                Object::Reference(page),
                Object::name("XYZ"),
                Object::Real(x * scale),
                Object::Real(y * scale),
                Object::Real(style.zoom),
            ],
        );
        if let Some(color) = style.color {
            dict.add_color("C", color);
        }
        if style.flags() != 0 {
            dict.add_integer("F", style.flags());
        }

        let bookmark = self.directory.register(
            ObjectKind::Dictionary,
            dict,
            ObjectRole::Outline(OutlineState {
                open_entries: style.open_entries,
                parent: Some(parent),
                ..OutlineState::default()
            }),
        );

        let previous = self.outline_state(parent)?.children.last().copied();
        if let Some(previous) = previous {
            self.outline_state_mut(previous)?.next = Some(bookmark);
            self.outline_state_mut(bookmark)?.prev = Some(previous);
        }

        let parent_state = self.outline_state_mut(parent)?;
        parent_state.children.push(bookmark);
        if parent_state.open_entries {
            parent_state.count += 1;
            let mut ancestor = parent_state.parent;
            while let Some(id) = ancestor {
                let state = self.outline_state_mut(id)?;
                if !state.open_entries {
                    break;
                }
                state.count += 1;
                ancestor = state.parent;
            }
        } else {
            parent_state.count -= 1;
        }
        Ok(bookmark)
    }

    /// Descendant of `parent` by zero-based index path.
    pub fn bookmark_child(&self, parent: ObjectId, path: &[usize]) -> Result<ObjectId> {
        let mut current = parent;
        for (level, index) in path.iter().enumerate() {
            current = *self
                .outline_state(current)?
                .children
                .get(*index)
                .ok_or_else(|| Error::invalid(format!("no bookmark at index {} on level {}", index, level)))?;
        }
        Ok(current)
    }
}
