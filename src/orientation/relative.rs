//! Classification by comparison with a reference page.
//!
//! The current page's anchors are turned by each of the four canonical
//! rotations and matched against the anchors of a page assumed upright. The
//! rotation whose turned anchors land closest to the reference is the
//! correction.

use geo::Coord;
use serde::Serialize;
use tracing::debug;

use crate::document::Rotation;
use crate::orientation::anchors::{PageObservation, TextAnchor};
use crate::orientation::decision::{DecisionSource, RotationDecision, RotationDelta};

/// Distance, in normalized units, at which an anchor stops counting as a match
/// is `1 / SIMILARITY_FALLOFF`.
const SIMILARITY_FALLOFF: f64 = 2.0;

/// The anchors of the page every later page is compared against.
///
/// A reference always holds at least one anchor and is never modified after
/// it has been built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSet {
    observation: PageObservation,
}

impl ReferenceSet {
    /// Wraps an observation as a reference.
    ///
    /// # Returns
    ///
    /// `None` if the observation is empty.
    pub fn new(observation: PageObservation) -> Option<Self> {
        (!observation.is_empty()).then_some(Self { observation })
    }

    #[inline]
    pub fn anchors(&self) -> &[TextAnchor] {
        self.observation.anchors()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observation.len()
    }

    /// Always `false`; present for API symmetry with [`PageObservation`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observation.is_empty()
    }

    fn positions(&self) -> Vec<Coord<f64>> {
        self.observation.positions()
    }
}

/// The similarity of one candidate rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScore {
    pub rotation: Rotation,
    pub score: f64,
}

/// Turns a point of the unit square by a display rotation.
///
/// ```text
///   0°: (x, y)
///  90°: (1 - y, x)
/// 180°: (1 - x, 1 - y)
/// 270°: (y, 1 - x)
/// ```
#[inline]
pub fn rotate_point(point: Coord<f64>, rotation: Rotation) -> Coord<f64> {
    let Coord { x, y } = point;
    match rotation {
        Rotation::Rotated0 => point,
        Rotation::Rotated90 => Coord { x: 1.0 - y, y: x },
        Rotation::Rotated180 => Coord {
            x: 1.0 - x,
            y: 1.0 - y,
        },
        Rotation::Rotated270 => Coord { x: y, y: 1.0 - x },
    }
}

/// Scores how well `candidate` overlays `reference`.
///
/// Each candidate point is matched to its nearest reference point by
/// Euclidean distance `d` and scores `max(0, 1 - 2d)`. The result is the
/// mean over all candidate points, in `[0, 1]`.
///
/// # Returns
///
/// `0.0` if either set is empty.
pub fn similarity(candidate: &[Coord<f64>], reference: &[Coord<f64>]) -> f64 {
    if candidate.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let total: f64 = candidate
        .iter()
        .map(|point| {
            let nearest = reference
                .iter()
                .map(|other| (point.x - other.x).hypot(point.y - other.y))
                .fold(f64::INFINITY, f64::min);
            (1.0 - nearest * SIMILARITY_FALLOFF).max(0.0)
        })
        .sum();

    total / candidate.len() as f64
}

/// Scores all four candidate rotations in ascending order of rotation.
pub fn candidate_scores(
    observation: &PageObservation,
    reference: &ReferenceSet,
) -> [CandidateScore; 4] {
    let current = observation.positions();
    let reference_positions = reference.positions();

    Rotation::ALL.map(|rotation| {
        let rotated: Vec<Coord<f64>> = current
            .iter()
            .map(|&point| rotate_point(point, rotation))
            .collect();
        CandidateScore {
            rotation,
            score: similarity(&rotated, &reference_positions),
        }
    })
}

/// Returns the candidate with the strictly highest score.
///
/// Candidates are visited in ascending rotation order and a later candidate
/// only wins with a strictly higher score, so ties go to the smaller
/// rotation.
pub fn best_candidate(scores: &[CandidateScore; 4]) -> CandidateScore {
    scores[1..].iter().fold(scores[0], |best, candidate| {
        if candidate.score > best.score {
            *candidate
        } else {
            best
        }
    })
}

/// Suggests a correction by aligning the page with the reference.
///
/// Anchors are already in native space, so the best rotation itself is the
/// correction, folded into `(-180, 180]` (270° becomes -90°).
pub fn compare(observation: &PageObservation, reference: &ReferenceSet) -> RotationDecision {
    if observation.is_empty() || reference.is_empty() {
        debug!("Not enough anchors to compare with the reference");
        return RotationDecision::inconclusive(DecisionSource::Relative).with_score(0.0);
    }

    let scores = candidate_scores(observation, reference);
    for candidate in &scores {
        debug!(
            rotation = candidate.rotation.degrees(),
            score = candidate.score,
            "Candidate score"
        );
    }

    let best = best_candidate(&scores);
    let delta = RotationDelta::from(best.rotation);
    debug!(
        anchors = observation.len(),
        reference_anchors = reference.len(),
        best_rotation = best.rotation.degrees(),
        score = best.score,
        %delta,
        "Relative comparison"
    );

    RotationDecision::new(delta, DecisionSource::Relative).with_score(best.score)
}
