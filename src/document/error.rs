use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to load PDF content")]
    PdfLoadError {
        #[source]
        source: pdfium_render::prelude::PdfiumError,
    },

    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("Page {page} has no text layer")]
    TextLayerUnavailable { page: usize },

    #[error("Page {page} does not allow rotation changes")]
    RotationLocked { page: usize },

    #[error("Unsupported page rotation: {degrees}")]
    UnsupportedRotation { degrees: i32 },

    #[error("Document is read-only and cannot be saved to {path}")]
    ReadOnly { path: PathBuf },

    #[error("Failed to write document to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<pdfium_render::prelude::PdfiumError> for DocumentError {
    fn from(source: pdfium_render::prelude::PdfiumError) -> Self {
        DocumentError::PdfLoadError { source }
    }
}
