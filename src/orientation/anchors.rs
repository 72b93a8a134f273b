//! Text anchors: where text sits on a page, in normalized native space.

use geo::Coord;
use serde::Serialize;
use tracing::{debug, warn};

use crate::document::{BoundingBox, PageSize, TextSpan};
use crate::orientation::transform;

/// Fragments whose trimmed text has fewer characters than this are noise.
pub const DEFAULT_MIN_FRAGMENT_CHARS: usize = 3;

/// One text fragment's placement on a page.
///
/// `normalized_x` and `normalized_y` are the centroid of the fragment's
/// native-space box divided by the native page width and height. They are
/// never derived from display-space coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnchor {
    /// Trimmed fragment text.
    pub text: String,
    pub normalized_x: f64,
    pub normalized_y: f64,
    /// Fragment box in native space, kept for diagnostics.
    pub native_bounds: BoundingBox,
}

impl TextAnchor {
    /// Returns the normalized centroid as a point in the unit square.
    #[inline]
    pub fn position(&self) -> Coord<f64> {
        Coord {
            x: self.normalized_x,
            y: self.normalized_y,
        }
    }
}

/// The anchors extracted from one page, in text span order.
///
/// An empty observation means the page carries no usable text signal. That
/// is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageObservation {
    anchors: Vec<TextAnchor>,
}

impl PageObservation {
    pub fn new(anchors: Vec<TextAnchor>) -> Self {
        Self { anchors }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn anchors(&self) -> &[TextAnchor] {
        &self.anchors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Returns the normalized positions of all anchors.
    pub fn positions(&self) -> Vec<Coord<f64>> {
        self.anchors.iter().map(TextAnchor::position).collect()
    }

    /// Returns the arithmetic mean of all anchor positions, or `None` when
    /// the observation is empty.
    pub fn mean_position(&self) -> Option<Coord<f64>> {
        if self.anchors.is_empty() {
            return None;
        }

        let count = self.anchors.len() as f64;
        let (sum_x, sum_y) = self
            .anchors
            .iter()
            .fold((0.0, 0.0), |(sx, sy), anchor| {
                (sx + anchor.normalized_x, sy + anchor.normalized_y)
            });

        Some(Coord {
            x: sum_x / count,
            y: sum_y / count,
        })
    }
}

impl FromIterator<TextAnchor> for PageObservation {
    fn from_iter<I: IntoIterator<Item = TextAnchor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Turns a page's text spans into a [`PageObservation`].
#[derive(Debug, Clone, Copy)]
pub struct AnchorExtractor {
    min_chars: usize,
}

impl Default for AnchorExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FRAGMENT_CHARS)
    }
}

impl AnchorExtractor {
    /// Creates an extractor that keeps fragments of at least `min_chars`
    /// characters after trimming.
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    /// Extracts normalized anchors from display-space spans.
    ///
    /// # Arguments
    ///
    /// * `spans` - Text spans with display-space boxes.
    /// * `display` - Page size as displayed.
    /// * `native` - Unrotated page size; the display size is used when `None`.
    /// * `rotation_degrees` - Current rotation metadata.
    ///
    /// # Returns
    ///
    /// The anchors of every qualifying span, in span order. Empty when no
    /// span qualifies or the normalizing page size is degenerate.
    pub fn extract(
        &self,
        spans: &[TextSpan],
        display: PageSize,
        native: Option<PageSize>,
        rotation_degrees: i32,
    ) -> PageObservation {
        let native = native.unwrap_or(display);
        if !native.is_valid() {
            warn!(
                width = native.width,
                height = native.height,
                "Page has degenerate dimensions, ignoring its text"
            );
            return PageObservation::empty();
        }

        let observation: PageObservation = spans
            .iter()
            .filter_map(|span| {
                let text = span.text.trim();
                if text.chars().count() < self.min_chars {
                    return None;
                }

                let native_bounds =
                    transform::to_native_degrees(span.bounds, display, rotation_degrees);
                let centroid = native_bounds.centroid();

                Some(TextAnchor {
                    text: text.to_string(),
                    normalized_x: centroid.x / native.width,
                    normalized_y: centroid.y / native.height,
                    native_bounds,
                })
            })
            .collect();

        debug!(
            spans = spans.len(),
            anchors = observation.len(),
            "Extracted text anchors"
        );
        observation
    }
}
