//! Page rotation inference.
//!
//! Pages are judged from where their text sits, never from rendered pixels:
//!
//! 1. [`transform`] maps text spans from display space back to native space.
//! 2. [`anchors`] reduces spans to normalized [`TextAnchor`]s.
//! 3. [`absolute`] or [`relative`] turns anchors into a [`RotationDecision`],
//!    as chosen by the [`ModeController`].
//! 4. [`corrector`] writes the decision into the document.

pub mod absolute;
pub mod anchors;
pub mod controller;
pub mod corrector;
pub mod decision;
pub mod error;
pub mod relative;
pub mod transform;

pub use anchors::{AnchorExtractor, PageObservation, TextAnchor};
pub use controller::{DetectionMode, ModeController};
pub use corrector::{
    plan_jobs, BatchReport, CorrectionJob, DocumentOutcome, DocumentReport, PageReport,
    RotationCorrector,
};
pub use decision::{DecisionSource, RotationDecision, RotationDelta};
pub use error::CorrectionError;
pub use relative::ReferenceSet;
