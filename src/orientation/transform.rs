//! Conversions between display space and native page space.
//!
//! Text spans are reported in display space, which already reflects the
//! page's rotation metadata. All orientation analysis happens in native space
//! (the page as if its rotation were 0°), so every span is mapped back with
//! [`to_native`] before it is used.
//!
//! For a page with native size `Wn x Hn` the display size is `Wn x Hn` at
//! 0°/180° and `Hn x Wn` at 90°/270°.

use tracing::debug;

use crate::document::{BoundingBox, PageSize, Rotation};

/// Maps a bounding box from display space back to native space.
///
/// # Arguments
///
/// * `bounds` - Box in display space.
/// * `display` - Page size as displayed (`W` x `H`).
/// * `rotation` - Current page rotation.
///
/// # Formulas
///
/// ```text
///   0°: (x0, y0, x1, y1)
///  90°: (y0, W - x1, y1, W - x0)
/// 180°: (W - x1, H - y1, W - x0, H - y0)
/// 270°: (H - y1, x0, H - y0, x1)
/// ```
pub fn to_native(bounds: BoundingBox, display: PageSize, rotation: Rotation) -> BoundingBox {
    let BoundingBox { x0, y0, x1, y1 } = bounds;
    let (w, h) = (display.width, display.height);

    match rotation {
        Rotation::Rotated0 => bounds,
        Rotation::Rotated90 => BoundingBox::new(y0, w - x1, y1, w - x0),
        Rotation::Rotated180 => BoundingBox::new(w - x1, h - y1, w - x0, h - y0),
        Rotation::Rotated270 => BoundingBox::new(h - y1, x0, h - y0, x1),
    }
}

/// Like [`to_native`], but takes the raw rotation metadata.
///
/// Rotations that are not a multiple of 90 are treated as 0° so that a page
/// with odd metadata degrades to an untransformed reading instead of failing.
pub fn to_native_degrees(bounds: BoundingBox, display: PageSize, degrees: i32) -> BoundingBox {
    let rotation = Rotation::from_degrees(degrees).unwrap_or_else(|| {
        debug!(degrees, "Unknown page rotation, using identity transform");
        Rotation::Rotated0
    });
    to_native(bounds, display, rotation)
}

/// Maps a bounding box from native space into display space.
///
/// This is the inverse of [`to_native`]; backends use it to report spans the
/// way a viewer would see them.
///
/// # Arguments
///
/// * `bounds` - Box in native space.
/// * `native` - Unrotated page size (`Wn` x `Hn`).
/// * `rotation` - Page rotation to apply.
pub fn to_display(bounds: BoundingBox, native: PageSize, rotation: Rotation) -> BoundingBox {
    let BoundingBox { x0, y0, x1, y1 } = bounds;
    let (w, h) = (native.width, native.height);

    match rotation {
        Rotation::Rotated0 => bounds,
        Rotation::Rotated90 => BoundingBox::new(h - y1, x0, h - y0, x1),
        Rotation::Rotated180 => BoundingBox::new(w - x1, h - y1, w - x0, h - y0),
        Rotation::Rotated270 => BoundingBox::new(y0, w - x1, y1, w - x0),
    }
}

/// Returns the display size of a page with the given native size.
#[inline]
pub fn display_size(native: PageSize, rotation: Rotation) -> PageSize {
    if rotation.is_quarter_turn() {
        native.transposed()
    } else {
        native
    }
}
