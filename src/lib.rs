pub mod document;
pub mod orientation;
pub mod utils;

pub use document::{
    BoundingBox, DocumentError, DocumentStore, PageDocument, PageSize, Rotation, TextSpan,
};
pub use orientation::{
    CorrectionError, DetectionMode, ModeController, PageObservation, RotationCorrector,
    RotationDecision, RotationDelta, TextAnchor,
};
pub use utils::{AppConfig, ConfigError};
