//! PDF document access.
//!
//! This module reads text segments and rotation metadata from PDF files and
//! writes rotated copies back out.
//!
//! # Dependencies
//!
//! This module uses the `pdfium-render` crate, which requires the PDFium
//! library to be available at runtime (either bundled or system-installed).

use std::path::Path;

use pdfium_render::prelude::*;
use tracing::debug;

use super::super::bounds::{BoundingBox, PageSize};
use super::super::error::DocumentError;
use super::super::text_span::{Rotation, TextSpan};
use super::super::{DocumentStore, PageDocument};
use crate::orientation::transform;
use crate::utils::file_utils;

/// Opens PDF files through a bound PDFium library.
pub struct PdfiumStore {
    pdfium: Pdfium,
}

impl PdfiumStore {
    /// Binds to the PDFium library.
    ///
    /// The platform library next to the executable is preferred; the system
    /// library is used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::PdfLoadError`] if no PDFium library can be
    /// loaded.
    pub fn new() -> Result<Self, DocumentError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name())
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|source| DocumentError::PdfLoadError { source })?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl DocumentStore for PdfiumStore {
    type Document<'a> = PdfiumDocument<'a>;

    fn open<'a>(&'a self, path: &Path) -> Result<PdfiumDocument<'a>, DocumentError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|source| DocumentError::PdfLoadError { source })?;

        debug!(path = %path.display(), pages = document.pages().len(), "Opened PDF");
        Ok(PdfiumDocument { document })
    }
}

/// An open PDF document.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumDocument<'a> {
    fn page(&self, page: usize) -> Result<PdfPage<'a>, DocumentError> {
        let page_count = self.page_count();
        let index = PdfPageIndex::try_from(page)
            .ok()
            .filter(|_| page < page_count)
            .ok_or(DocumentError::PageOutOfRange { page, page_count })?;

        self.document
            .pages()
            .get(index)
            .map_err(|source| DocumentError::PdfLoadError { source })
    }

    /// Returns the media box as `(left, bottom, size)` in PDF user space.
    fn media_box(page: &PdfPage) -> Option<(f64, f64, PageSize)> {
        let media = page.boundaries().media().ok()?;
        let rect = media.bounds;
        let size = PageSize::new(rect.width().value as f64, rect.height().value as f64);
        size.is_valid()
            .then_some((rect.left().value as f64, rect.bottom().value as f64, size))
    }
}

fn rotation_from_pdfium(rotation: PdfPageRenderRotation) -> i32 {
    match rotation {
        PdfPageRenderRotation::None => 0,
        PdfPageRenderRotation::Degrees90 => 90,
        PdfPageRenderRotation::Degrees180 => 180,
        PdfPageRenderRotation::Degrees270 => 270,
    }
}

fn rotation_to_pdfium(rotation: Rotation) -> PdfPageRenderRotation {
    match rotation {
        Rotation::Rotated0 => PdfPageRenderRotation::None,
        Rotation::Rotated90 => PdfPageRenderRotation::Degrees90,
        Rotation::Rotated180 => PdfPageRenderRotation::Degrees180,
        Rotation::Rotated270 => PdfPageRenderRotation::Degrees270,
    }
}

impl PageDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_rotation(&self, page: usize) -> Result<i32, DocumentError> {
        let pdf_page = self.page(page)?;
        let rotation = pdf_page
            .rotation()
            .map_err(|source| DocumentError::PdfLoadError { source })?;
        Ok(rotation_from_pdfium(rotation))
    }

    fn set_page_rotation(&mut self, page: usize, rotation: Rotation) -> Result<(), DocumentError> {
        let mut pdf_page = self.page(page)?;
        pdf_page.set_rotation(rotation_to_pdfium(rotation));
        Ok(())
    }

    /// Reads text segments and reports them in display space.
    ///
    /// PDFium reports segment rectangles in PDF user space: unrotated, with
    /// the origin at the bottom-left of the media box. They are flipped to a
    /// top-left origin and then rotated into display space.
    fn text_spans(&self, page: usize) -> Result<Vec<TextSpan>, DocumentError> {
        let pdf_page = self.page(page)?;
        let rotation = Rotation::from_degrees(self.page_rotation(page)?).unwrap_or_default();

        let (origin_x, origin_y, native) = match Self::media_box(&pdf_page) {
            Some(media) => media,
            None => {
                let display = PageSize::new(
                    pdf_page.width().value as f64,
                    pdf_page.height().value as f64,
                );
                (0.0, 0.0, transform::display_size(display, rotation))
            }
        };

        let text_page = pdf_page
            .text()
            .map_err(|source| DocumentError::PdfLoadError { source })?;

        let spans = text_page
            .segments()
            .iter()
            .map(|segment| {
                let rect = segment.bounds();
                let left = rect.left().value as f64 - origin_x;
                let right = rect.right().value as f64 - origin_x;
                let top = rect.top().value as f64 - origin_y;
                let bottom = rect.bottom().value as f64 - origin_y;

                let native_bounds =
                    BoundingBox::new(left, native.height - top, right, native.height - bottom);

                TextSpan {
                    text: segment.text(),
                    bounds: transform::to_display(native_bounds, native, rotation),
                }
            })
            .collect();

        Ok(spans)
    }

    fn display_size(&self, page: usize) -> Result<PageSize, DocumentError> {
        let pdf_page = self.page(page)?;
        Ok(PageSize::new(
            pdf_page.width().value as f64,
            pdf_page.height().value as f64,
        ))
    }

    fn native_size(&self, page: usize) -> Result<Option<PageSize>, DocumentError> {
        let pdf_page = self.page(page)?;
        Ok(Self::media_box(&pdf_page).map(|(_, _, size)| size))
    }

    /// Serializes the document in memory and replaces `path` in one rename,
    /// so a failed save never leaves a truncated file behind.
    fn save(&mut self, path: &Path) -> Result<(), DocumentError> {
        let bytes = self
            .document
            .save_to_bytes()
            .map_err(|source| DocumentError::PdfLoadError { source })?;

        file_utils::write_atomic(path, &bytes).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
