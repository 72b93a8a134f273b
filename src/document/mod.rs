//! Document access layer.
//!
//! The rotation engine never parses documents itself. It talks to a
//! [`DocumentStore`] that opens documents and to the [`PageDocument`] it
//! returns, which answers questions about text spans and rotation metadata
//! and accepts rotation changes.

pub mod bounds;
pub mod content;
pub mod error;
pub mod text_span;

use std::path::Path;

pub use bounds::{BoundingBox, PageSize};
pub use content::{MemoryDocument, MemoryPage, MemoryStore, PdfiumDocument, PdfiumStore};
pub use error::DocumentError;
pub use text_span::{Rotation, TextSpan};

/// An open document whose pages can be inspected and re-rotated.
///
/// Page indices are zero-based. Closing the document is handled by `Drop`.
pub trait PageDocument {
    /// Returns the number of pages in the document.
    fn page_count(&self) -> usize;

    /// Returns the raw rotation metadata of a page in degrees.
    ///
    /// Backends report what the document stores; values are normally 0, 90,
    /// 180 or 270 but callers must cope with anything else.
    fn page_rotation(&self, page: usize) -> Result<i32, DocumentError>;

    /// Sets the rotation metadata of a page.
    fn set_page_rotation(&mut self, page: usize, rotation: Rotation) -> Result<(), DocumentError>;

    /// Returns the text spans of a page with bounding boxes in display space.
    fn text_spans(&self, page: usize) -> Result<Vec<TextSpan>, DocumentError>;

    /// Returns the page size as displayed, i.e. after rotation.
    fn display_size(&self, page: usize) -> Result<PageSize, DocumentError>;

    /// Returns the unrotated page size (media box), if the backend knows it.
    ///
    /// # Default Implementation
    ///
    /// Returns `Ok(None)`; callers then fall back to the display size.
    fn native_size(&self, _page: usize) -> Result<Option<PageSize>, DocumentError> {
        Ok(None)
    }

    /// Writes the whole document to `path`.
    fn save(&mut self, path: &Path) -> Result<(), DocumentError>;
}

/// Opens documents by path.
pub trait DocumentStore {
    type Document<'a>: PageDocument
    where
        Self: 'a;

    fn open<'a>(&'a self, path: &Path) -> Result<Self::Document<'a>, DocumentError>;
}
