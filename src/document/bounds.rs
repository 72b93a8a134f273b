//! Axis-aligned bounding boxes and page dimensions.
//!
//! This module provides the [`BoundingBox`] type used for text span positions
//! and the [`PageSize`] type describing page extents.

use geo::Coord;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width and height of a page in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the size with width and height exchanged.
    ///
    /// Pages rotated by 90 or 270 degrees display their native height as
    /// width and vice versa.
    #[inline]
    #[must_use]
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Returns `true` if both dimensions are strictly positive and finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle given by two opposite corners.
///
/// # Coordinate System
///
/// - **X-axis**: Increases from left to right
/// - **Y-axis**: Increases from top to bottom
///
/// `(x0, y0)` is the top-left corner and `(x1, y1)` the bottom-right corner.
///
/// # Serialization
///
/// `BoundingBox` serializes as a four element array:
///
/// ```json
/// [72.0, 90.5, 210.0, 102.5]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` from its corner coordinates.
    ///
    /// # Arguments
    ///
    /// * `x0`, `y0` - Top-left corner
    /// * `x1`, `y1` - Bottom-right corner
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Returns the width of the box (`x1 - x0`).
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Returns the height of the box (`y1 - y0`).
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Returns the center point of the box.
    ///
    /// # Returns
    ///
    /// A [`Coord<f64>`] at the midpoint of both diagonals.
    #[inline]
    pub fn centroid(&self) -> Coord<f64> {
        Coord {
            x: (self.x0 + self.x1) / 2.0,
            y: (self.y0 + self.y1) / 2.0,
        }
    }

    /// Returns `true` if every corner lies within `[0, width] x [0, height]`.
    pub fn is_within(&self, size: PageSize) -> bool {
        let inside_x = |x: f64| (0.0..=size.width).contains(&x);
        let inside_y = |y: f64| (0.0..=size.height).contains(&y);
        inside_x(self.x0) && inside_x(self.x1) && inside_y(self.y0) && inside_y(self.y1)
    }

    /// Returns `true` if every corner of `other` is within `tolerance` of
    /// the matching corner of `self`.
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (self.x0 - other.x0).abs() <= tolerance
            && (self.y0 - other.y0).abs() <= tolerance
            && (self.x1 - other.x1).abs() <= tolerance
            && (self.y1 - other.y1).abs() <= tolerance
    }
}

impl From<[f64; 4]> for BoundingBox {
    #[inline]
    fn from(coords: [f64; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    #[inline]
    fn from(bounds: BoundingBox) -> Self {
        [bounds.x0, bounds.y0, bounds.x1, bounds.y1]
    }
}

impl Serialize for BoundingBox {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        <[f64; 4]>::from(*self).serialize(serializer)
    }
}

/// Deserializes `BoundingBox` from a four element array.
///
/// # Errors
///
/// Returns an error if the input does not contain exactly 4 numbers.
impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values: Vec<f64> = Vec::deserialize(deserializer)?;
        if values.len() != 4 {
            return Err(serde::de::Error::custom(format!(
                "Expected 4 coordinates, got {}",
                values.len()
            )));
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}
