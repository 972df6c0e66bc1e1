//! Utility functions for coordinate conversions and overlay geometry.

pub mod safe_cast;

use opencv::core::Rect;

/// Grow a `(xmin, ymin, xmax, ymax)` box by `padding` on every side and clip
/// it to a `max_width` x `max_height` frame
#[must_use]
pub fn padded_box(
    (xmin, ymin, xmax, ymax): (i32, i32, i32, i32),
    padding: i32,
    max_width: i32,
    max_height: i32,
) -> Rect {
    let x0 = (xmin - padding).clamp(0, max_width);
    let y0 = (ymin - padding).clamp(0, max_height);
    let x1 = (xmax + padding).clamp(0, max_width);
    let y1 = (ymax + padding).clamp(0, max_height);
    Rect::new(x0, y0, x1 - x0, y1 - y0)
}
