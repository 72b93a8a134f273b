//! In-memory documents.
//!
//! A [`MemoryDocument`] describes pages by their native size, rotation
//! metadata and text spans in native space. Spans are reported in display
//! space according to the page's current rotation, exactly as a PDF backend
//! would report them, so the rotation engine sees the same geometry it sees
//! for real files.
//!
//! Documents serialize to and from JSON, which makes them convenient
//! fixtures:
//!
//! ```json
//! {
//!   "pages": [{
//!     "size": { "width": 595.0, "height": 842.0 },
//!     "rotation": 0,
//!     "spans": [{ "text": "Quarterly report", "bounds": [60.0, 70.0, 260.0, 90.0] }]
//!   }]
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::super::bounds::{BoundingBox, PageSize};
use super::super::error::DocumentError;
use super::super::text_span::{Rotation, TextSpan};
use super::super::{DocumentStore, PageDocument};
use crate::orientation::transform;

/// A single page of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPage {
    /// Native (unrotated) page size.
    pub size: PageSize,
    /// Rotation metadata in degrees.
    #[serde(default)]
    pub rotation: i32,
    /// Text spans in native space. `None` models a page whose text layer
    /// cannot be read.
    pub spans: Option<Vec<TextSpan>>,
    /// Rejects rotation changes when set.
    #[serde(default)]
    pub locked: bool,
}

impl MemoryPage {
    /// Creates an upright page without text.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: PageSize::new(width, height),
            rotation: 0,
            spans: Some(Vec::new()),
            locked: false,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Adds a span positioned in native space.
    #[must_use]
    pub fn with_span(mut self, text: &str, bounds: BoundingBox) -> Self {
        self.spans
            .get_or_insert_with(Vec::new)
            .push(TextSpan::new(text, bounds));
        self
    }

    /// Marks the text layer as unreadable.
    #[must_use]
    pub fn without_text_layer(mut self) -> Self {
        self.spans = None;
        self
    }

    #[must_use]
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    fn display_rotation(&self) -> Rotation {
        Rotation::from_degrees(self.rotation).unwrap_or_default()
    }
}

/// A document held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub pages: Vec<MemoryPage>,
    /// Rejects saving when set.
    #[serde(default)]
    pub read_only: bool,
}

impl MemoryDocument {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self {
            pages,
            read_only: false,
        }
    }

    /// Parses a document from its JSON description.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn page(&self, page: usize) -> Result<&MemoryPage, DocumentError> {
        self.pages.get(page).ok_or(DocumentError::PageOutOfRange {
            page,
            page_count: self.pages.len(),
        })
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut MemoryPage, DocumentError> {
        let page_count = self.pages.len();
        self.pages
            .get_mut(page)
            .ok_or(DocumentError::PageOutOfRange { page, page_count })
    }
}

/// A path-keyed collection of [`MemoryDocument`]s.
///
/// Opening a document hands out a working copy; saving stores the copy under
/// the target path in a separate table, so inputs are never overwritten
/// unless the output path is the input path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RefCell<HashMap<PathBuf, MemoryDocument>>,
    saved: RefCell<HashMap<PathBuf, MemoryDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, document: MemoryDocument) {
        self.documents.borrow_mut().insert(path.into(), document);
    }

    /// Returns the document last saved to `path`, if any.
    pub fn saved(&self, path: impl AsRef<Path>) -> Option<MemoryDocument> {
        self.saved.borrow().get(path.as_ref()).cloned()
    }

    /// Returns the number of save operations that succeeded.
    pub fn saved_count(&self) -> usize {
        self.saved.borrow().len()
    }
}

impl DocumentStore for MemoryStore {
    type Document<'a> = MemoryHandle<'a>;

    fn open<'a>(&'a self, path: &Path) -> Result<MemoryHandle<'a>, DocumentError> {
        let document = self
            .documents
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| DocumentError::DocumentNotFound {
                path: path.to_path_buf(),
            })?;

        Ok(MemoryHandle {
            store: self,
            document,
        })
    }
}

/// An open working copy of a [`MemoryDocument`].
#[derive(Debug)]
pub struct MemoryHandle<'a> {
    store: &'a MemoryStore,
    document: MemoryDocument,
}

impl PageDocument for MemoryHandle<'_> {
    fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    fn page_rotation(&self, page: usize) -> Result<i32, DocumentError> {
        Ok(self.document.page(page)?.rotation)
    }

    fn set_page_rotation(&mut self, page: usize, rotation: Rotation) -> Result<(), DocumentError> {
        let memory_page = self.document.page_mut(page)?;
        if memory_page.locked {
            return Err(DocumentError::RotationLocked { page });
        }
        memory_page.rotation = rotation.degrees();
        Ok(())
    }

    fn text_spans(&self, page: usize) -> Result<Vec<TextSpan>, DocumentError> {
        let memory_page = self.document.page(page)?;
        let spans = memory_page
            .spans
            .as_ref()
            .ok_or(DocumentError::TextLayerUnavailable { page })?;

        let rotation = memory_page.display_rotation();
        Ok(spans
            .iter()
            .map(|span| TextSpan {
                text: span.text.clone(),
                bounds: transform::to_display(span.bounds, memory_page.size, rotation),
            })
            .collect())
    }

    fn display_size(&self, page: usize) -> Result<PageSize, DocumentError> {
        let memory_page = self.document.page(page)?;
        Ok(transform::display_size(
            memory_page.size,
            memory_page.display_rotation(),
        ))
    }

    fn native_size(&self, page: usize) -> Result<Option<PageSize>, DocumentError> {
        Ok(Some(self.document.page(page)?.size))
    }

    fn save(&mut self, path: &Path) -> Result<(), DocumentError> {
        if self.document.read_only {
            return Err(DocumentError::ReadOnly {
                path: path.to_path_buf(),
            });
        }
        self.store
            .saved
            .borrow_mut()
            .insert(path.to_path_buf(), self.document.clone());
        Ok(())
    }
}
