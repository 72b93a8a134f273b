//! Text span and page rotation types.
//!
//! This module provides [`TextSpan`], a piece of page text with its display
//! space bounding box, and [`Rotation`], the page rotation metadata in
//! 90-degree increments.

use serde::{Deserialize, Serialize};

use crate::document::bounds::BoundingBox;

/// A run of text reported by a document backend.
///
/// `bounds` is expressed in display space, i.e. it already reflects the
/// page's current rotation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub bounds: BoundingBox,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }
}

/// Page rotation metadata in 90-degree clockwise increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// Upright, no rotation.
    #[default]
    Rotated0,
    /// Displayed rotated 90 degrees clockwise.
    Rotated90,
    /// Displayed upside down.
    Rotated180,
    /// Displayed rotated 270 degrees clockwise (90 degrees counter-clockwise).
    Rotated270,
}

impl Rotation {
    /// All rotations in ascending order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Rotated0,
        Rotation::Rotated90,
        Rotation::Rotated180,
        Rotation::Rotated270,
    ];

    /// Converts a rotation angle in degrees to a [`Rotation`] variant.
    ///
    /// Any multiple of 90 is accepted and normalized into `[0, 360)`, so
    /// `-90` maps to [`Rotation::Rotated270`] and `450` to
    /// [`Rotation::Rotated90`].
    ///
    /// # Returns
    ///
    /// `None` for angles that are not a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Rotated0),
            90 => Some(Rotation::Rotated90),
            180 => Some(Rotation::Rotated180),
            270 => Some(Rotation::Rotated270),
            _ => None,
        }
    }

    /// Returns the rotation angle in degrees (0, 90, 180 or 270).
    #[inline]
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Rotated0 => 0,
            Rotation::Rotated90 => 90,
            Rotation::Rotated180 => 180,
            Rotation::Rotated270 => 270,
        }
    }

    /// Returns `true` for 90 and 270 degrees, where display width and height
    /// are the native height and width.
    #[inline]
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Rotated90 | Rotation::Rotated270)
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
