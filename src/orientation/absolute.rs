//! Classification from a page's own text placement.
//!
//! Text on an upright page tends to cluster in the upper-left and upper part
//! of the page. Where the mean anchor position sits therefore hints at how
//! the content has been turned.

use tracing::debug;

use crate::orientation::anchors::PageObservation;
use crate::orientation::decision::{DecisionSource, RotationDecision, RotationDelta};

const LOW: f64 = 0.4;
const HIGH: f64 = 0.6;

/// Maps a mean normalized position to a corrective delta.
///
/// Rules are checked in order with strict inequalities:
///
/// | condition                 | delta | reading                  |
/// |---------------------------|-------|--------------------------|
/// | `y < 0.4 && x < 0.6`      | 0     | upper-left, upright      |
/// | `y > 0.6 && x > 0.4`      | 180   | lower-right, upside down |
/// | `x < 0.4 && y > 0.4`      | -90   | lower-left, turned left  |
/// | `x > 0.6 && y < 0.6`      | 90    | upper-right, turned right|
///
/// # Returns
///
/// The delta, or `None` when no rule matches.
pub fn classify_position(mean_x: f64, mean_y: f64) -> Option<RotationDelta> {
    if mean_y < LOW && mean_x < HIGH {
        Some(RotationDelta::None)
    } else if mean_y > HIGH && mean_x > LOW {
        Some(RotationDelta::UpsideDown)
    } else if mean_x < LOW && mean_y > LOW {
        Some(RotationDelta::CounterClockwise90)
    } else if mean_x > HIGH && mean_y < HIGH {
        Some(RotationDelta::Clockwise90)
    } else {
        None
    }
}

/// Suggests a correction using only this page's anchors.
///
/// An empty observation, or a centroid no rule recognizes, yields an
/// inconclusive 0° decision.
pub fn classify(observation: &PageObservation) -> RotationDecision {
    let Some(mean) = observation.mean_position() else {
        debug!("No anchors, leaving page as is");
        return RotationDecision::inconclusive(DecisionSource::Absolute);
    };

    match classify_position(mean.x, mean.y) {
        Some(delta) => {
            debug!(mean_x = mean.x, mean_y = mean.y, %delta, "Absolute classification");
            RotationDecision::new(delta, DecisionSource::Absolute).with_centroid(mean.x, mean.y)
        }
        None => {
            debug!(
                mean_x = mean.x,
                mean_y = mean.y,
                "Ambiguous text placement, defaulting to 0°"
            );
            RotationDecision::inconclusive(DecisionSource::Absolute).with_centroid(mean.x, mean.y)
        }
    }
}
