//! Rotation decisions produced by the heuristics.

use serde::Serialize;

use crate::document::Rotation;

/// A corrective rotation to add to a page's current rotation metadata.
///
/// Only the four canonical corrections are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i32")]
pub enum RotationDelta {
    /// The page is already upright.
    #[default]
    None,
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 90 degrees counter-clockwise (-90).
    CounterClockwise90,
    /// Rotate 180 degrees.
    UpsideDown,
}

impl RotationDelta {
    /// Folds a rotation angle into a delta in `(-180, 180]`.
    ///
    /// `270` becomes `-90` and `-180` becomes `180`.
    ///
    /// # Returns
    ///
    /// `None` for angles that are not a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(RotationDelta::None),
            90 => Some(RotationDelta::Clockwise90),
            180 => Some(RotationDelta::UpsideDown),
            270 => Some(RotationDelta::CounterClockwise90),
            _ => None,
        }
    }

    /// Returns the signed delta in degrees: -90, 0, 90 or 180.
    #[inline]
    pub fn degrees(self) -> i32 {
        match self {
            RotationDelta::None => 0,
            RotationDelta::Clockwise90 => 90,
            RotationDelta::CounterClockwise90 => -90,
            RotationDelta::UpsideDown => 180,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == RotationDelta::None
    }
}

impl From<Rotation> for RotationDelta {
    /// The delta that turns a page by `rotation`.
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Rotated0 => RotationDelta::None,
            Rotation::Rotated90 => RotationDelta::Clockwise90,
            Rotation::Rotated180 => RotationDelta::UpsideDown,
            Rotation::Rotated270 => RotationDelta::CounterClockwise90,
        }
    }
}

impl From<RotationDelta> for i32 {
    fn from(delta: RotationDelta) -> Self {
        delta.degrees()
    }
}

impl std::fmt::Display for RotationDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}°", self.degrees())
    }
}

/// Which path produced a [`RotationDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// Mean text position of the page alone.
    Absolute,
    /// Geometric comparison against the reference page.
    Relative,
    /// The page became the reference and is assumed upright.
    ReferenceCapture,
    /// The page had no text; rotation metadata was undone instead.
    Metadata,
}

/// The corrective rotation suggested for one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationDecision {
    pub delta: RotationDelta,
    pub source: DecisionSource,
    /// Best similarity score, for relative decisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Mean normalized text position `(x, y)`, for absolute decisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<(f64, f64)>,
    /// `false` when the heuristic had no clear answer and defaulted to 0°.
    pub conclusive: bool,
}

impl RotationDecision {
    pub fn new(delta: RotationDelta, source: DecisionSource) -> Self {
        Self {
            delta,
            source,
            score: None,
            centroid: None,
            conclusive: true,
        }
    }

    /// A no-op decision for when the heuristic had nothing to go on.
    pub fn inconclusive(source: DecisionSource) -> Self {
        Self {
            conclusive: false,
            ..Self::new(RotationDelta::None, source)
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_centroid(mut self, x: f64, y: f64) -> Self {
        self.centroid = Some((x, y));
        self
    }
}
