//! Selection between the absolute and relative heuristics.
//!
//! A [`ModeController`] is created once per run and passed to every page in
//! processing order. In the relative modes it captures the first page with
//! usable text as the reference and judges every later page against it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::document::Rotation;
use crate::orientation::absolute;
use crate::orientation::anchors::PageObservation;
use crate::orientation::decision::{DecisionSource, RotationDecision, RotationDelta};
use crate::orientation::relative::{self, ReferenceSet};

/// How pages are judged during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Each page is judged from its own text placement only.
    Absolute,
    /// Pages are compared with a reference page.
    Relative,
    /// Relative once a reference exists, absolute until then.
    #[default]
    Auto,
}

impl DetectionMode {
    /// Returns `true` if this mode captures and uses a reference.
    #[inline]
    pub fn uses_reference(self) -> bool {
        !matches!(self, DetectionMode::Absolute)
    }
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "absolute" | "1" => Ok(DetectionMode::Absolute),
            "relative" | "2" => Ok(DetectionMode::Relative),
            "auto" | "3" => Ok(DetectionMode::Auto),
            other => Err(format!("unknown detection mode: {other}")),
        }
    }
}

impl std::fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DetectionMode::Absolute => "absolute",
            DetectionMode::Relative => "relative",
            DetectionMode::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Per-run state machine choosing a heuristic for each page.
///
/// The reference, once captured, is only read until [`reset`](Self::reset)
/// starts a new run.
///
/// After a reference exists, a page without anchors is compared like any
/// other page and keeps its rotation (0° delta). Image-only pages are often
/// rotated on purpose, so undoing their metadata is opt-in through
/// [`with_metadata_fallback`](Self::with_metadata_fallback).
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: DetectionMode,
    reference: Option<ReferenceSet>,
    metadata_fallback: bool,
}

impl ModeController {
    pub fn new(mode: DetectionMode) -> Self {
        Self {
            mode,
            reference: None,
            metadata_fallback: false,
        }
    }

    /// Enables or disables undoing rotation metadata for pages without text
    /// once a reference exists. Disabled by default.
    #[must_use]
    pub fn with_metadata_fallback(mut self, enabled: bool) -> Self {
        self.metadata_fallback = enabled;
        self
    }

    #[inline]
    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    #[inline]
    pub fn reference(&self) -> Option<&ReferenceSet> {
        self.reference.as_ref()
    }

    #[inline]
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Installs a reference taken from outside the run, e.g. a separate
    /// reference document.
    ///
    /// # Returns
    ///
    /// `true` if the reference was installed; `false` if the mode does not
    /// use references or one is already held.
    pub fn seed_reference(&mut self, reference: ReferenceSet) -> bool {
        if !self.mode.uses_reference() || self.reference.is_some() {
            return false;
        }
        info!(anchors = reference.len(), "Reference seeded");
        self.reference = Some(reference);
        true
    }

    /// Forgets the reference so the next run starts from scratch.
    pub fn reset(&mut self) {
        if self.reference.take().is_some() {
            debug!("Reference cleared for a new run");
        }
    }

    /// Chooses the correction for one page.
    ///
    /// # Arguments
    ///
    /// * `observation` - The page's anchors.
    /// * `current_rotation` - The page's rotation metadata in degrees.
    pub fn decide(&mut self, observation: &PageObservation, current_rotation: i32) -> RotationDecision {
        if !self.mode.uses_reference() {
            return absolute::classify(observation);
        }

        match &self.reference {
            Some(reference) => {
                if observation.is_empty() && self.metadata_fallback {
                    return Self::from_metadata(current_rotation);
                }
                relative::compare(observation, reference)
            }
            None => match ReferenceSet::new(observation.clone()) {
                Some(reference) => {
                    info!(
                        anchors = reference.len(),
                        "Reference captured; later pages are compared against it"
                    );
                    self.reference = Some(reference);
                    RotationDecision::new(RotationDelta::None, DecisionSource::ReferenceCapture)
                }
                None => {
                    warn!("No text to capture a reference from, using absolute placement");
                    absolute::classify(observation)
                }
            },
        }
    }

    /// Undoes the page's rotation metadata.
    fn from_metadata(current_rotation: i32) -> RotationDecision {
        match Rotation::from_degrees(current_rotation) {
            Some(rotation) => {
                let delta = RotationDelta::from_degrees(-rotation.degrees()).unwrap_or_default();
                debug!(current_rotation, %delta, "No anchors, undoing rotation metadata");
                RotationDecision::new(delta, DecisionSource::Metadata)
            }
            None => RotationDecision::inconclusive(DecisionSource::Metadata),
        }
    }
}
