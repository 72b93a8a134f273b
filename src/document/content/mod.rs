//! Document backends.
//!
//! Each backend implements [`DocumentStore`](super::DocumentStore) and
//! [`PageDocument`](super::PageDocument):
//!
//! - [`PdfiumStore`] reads and writes PDF files through PDFium.
//! - [`MemoryStore`] keeps documents in memory, which is what the engine's
//!   tests and dry runs use.

mod memory;
mod pdf;

pub use memory::{MemoryDocument, MemoryHandle, MemoryPage, MemoryStore};
pub use pdf::{PdfiumDocument, PdfiumStore};
