use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;

#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("Failed to read text from page {page}")]
    Extraction {
        page: usize,
        #[source]
        source: DocumentError,
    },

    #[error("Failed to rotate page {page}")]
    RotationApply {
        page: usize,
        #[source]
        source: DocumentError,
    },

    #[error("Failed to open document: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("Failed to save document: {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("Output {path} would overwrite an input document")]
    OutputIsInput { path: PathBuf },

    #[error("Inputs {first} and {second} would both be written to {output}")]
    OutputCollision {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}
