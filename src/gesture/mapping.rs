//! Active-region geometry and the affine camera-to-screen mapping.

use crate::{Error, Result};

/// Linear interpolation from `[in_min, in_max]` to `[out_min, out_max]`
/// without clamping, so inputs outside the source range extrapolate.
#[must_use]
pub fn interp(value: f64, (in_min, in_max): (f64, f64), (out_min, out_max): (f64, f64)) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Sub-rectangle of the camera frame mapped onto the whole screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRegion {
    frame_width: i32,
    frame_height: i32,
    margin: i32,
}

impl ActiveRegion {
    /// Shrink a frame by `margin` pixels on every side
    ///
    /// # Errors
    ///
    /// Returns an error if the margin is not positive or would leave an empty
    /// region in either dimension
    pub fn new(frame_width: i32, frame_height: i32, margin: i32) -> Result<Self> {
        if margin <= 0 {
            return Err(Error::InvalidInput(format!("Margin must be positive, got {margin}")));
        }
        let too_wide = margin
            .checked_mul(2)
            .map_or(true, |both_sides| both_sides >= frame_width || both_sides >= frame_height);
        if too_wide {
            return Err(Error::InvalidInput(format!(
                "Margin {margin} leaves no active region in a {frame_width}x{frame_height} frame"
            )));
        }
        Ok(Self {
            frame_width,
            frame_height,
            margin,
        })
    }

    /// Horizontal span `(left, right)` in frame pixels
    #[must_use]
    pub const fn x_span(&self) -> (i32, i32) {
        (self.margin, self.frame_width - self.margin)
    }

    /// Vertical span `(top, bottom)` in frame pixels
    #[must_use]
    pub const fn y_span(&self) -> (i32, i32) {
        (self.margin, self.frame_height - self.margin)
    }

    /// Centre of the region in frame pixels
    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (self.frame_width / 2, self.frame_height / 2)
    }

    /// Whether a frame pixel lies inside the region, borders included
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        let (left, right) = self.x_span();
        let (top, bottom) = self.y_span();
        x >= left && x <= right && y >= top && y <= bottom
    }

    /// Map a frame pixel to screen coordinates
    #[must_use]
    pub fn map_to_screen(&self, x: i32, y: i32, screen: ScreenSize) -> (f64, f64) {
        let (left, right) = self.x_span();
        let (top, bottom) = self.y_span();
        let sx = interp(
            f64::from(x),
            (f64::from(left), f64::from(right)),
            (0.0, f64::from(screen.width)),
        );
        let sy = interp(
            f64::from(y),
            (f64::from(top), f64::from(bottom)),
            (0.0, f64::from(screen.height)),
        );
        (sx, sy)
    }
}

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: ScreenSize = ScreenSize::new(1920, 1080);

    #[test]
    fn test_degenerate_regions_rejected() {
        assert!(ActiveRegion::new(640, 480, 0).is_err());
        assert!(ActiveRegion::new(640, 480, -5).is_err());
        assert!(ActiveRegion::new(640, 480, 240).is_err());
        assert!(ActiveRegion::new(640, 480, 239).is_ok());
        assert!(ActiveRegion::new(641, 481, 240).is_ok());
    }

    #[test]
    fn test_huge_margin_rejected() {
        assert!(ActiveRegion::new(640, 480, i32::MAX / 2 + 1).is_err());
        assert!(ActiveRegion::new(640, 480, 1_200_000_000).is_err());
        assert!(ActiveRegion::new(i32::MAX, i32::MAX, i32::MAX).is_err());
    }

    #[test]
    fn test_corners_and_center() {
        let region = ActiveRegion::new(640, 480, 100).unwrap();
        assert_eq!(region.map_to_screen(100, 100, SCREEN), (0.0, 0.0));
        assert_eq!(region.map_to_screen(540, 380, SCREEN), (1920.0, 1080.0));
        let (cx, cy) = region.center();
        assert_eq!(region.map_to_screen(cx, cy, SCREEN), (960.0, 540.0));
    }

    #[test]
    fn test_extrapolates_outside_region() {
        let region = ActiveRegion::new(640, 480, 100).unwrap();
        let (x, y) = region.map_to_screen(0, 480, SCREEN);
        assert!(x < 0.0);
        assert!(y > 1080.0);
        assert!(!region.contains(0, 480));
    }

    #[test]
    fn test_monotonic_in_x() {
        let region = ActiveRegion::new(640, 480, 100).unwrap();
        let (left, right) = region.x_span();
        let mut last = f64::NEG_INFINITY;
        for x in left..=right {
            let (sx, _) = region.map_to_screen(x, 240, SCREEN);
            assert!(sx >= last);
            last = sx;
        }
    }

    proptest! {
        #[test]
        fn prop_mapping_monotonic(a in -2000i32..2000, b in -2000i32..2000, y in 0i32..480) {
            let region = ActiveRegion::new(640, 480, 100).unwrap();
            let (lo, hi) = (a.min(b), a.max(b));
            let (sx_lo, _) = region.map_to_screen(lo, y, SCREEN);
            let (sx_hi, _) = region.map_to_screen(hi, y, SCREEN);
            prop_assert!(sx_lo <= sx_hi);
        }

        #[test]
        fn prop_mapping_affine(x in -1000i32..1000, y in -1000i32..1000, dx in 1i32..200) {
            let region = ActiveRegion::new(640, 480, 100).unwrap();
            let (x0, _) = region.map_to_screen(x, y, SCREEN);
            let (x1, _) = region.map_to_screen(x + dx, y, SCREEN);
            let (x2, _) = region.map_to_screen(x + 2 * dx, y, SCREEN);
            prop_assert!(((x1 - x0) - (x2 - x1)).abs() < 1e-6);
            prop_assert!(((x1 - x0) - f64::from(dx) * 1920.0 / 440.0).abs() < 1e-6);
        }

        #[test]
        fn prop_region_edges_hit_screen_edges(
            width in 201i32..4000,
            height in 201i32..4000,
            margin in 1i32..100,
        ) {
            let region = ActiveRegion::new(width, height, margin).unwrap();
            let (left, right) = region.x_span();
            let (top, bottom) = region.y_span();
            let (x0, y0) = region.map_to_screen(left, top, SCREEN);
            let (x1, y1) = region.map_to_screen(right, bottom, SCREEN);
            prop_assert!(x0.abs() < 1e-9 && y0.abs() < 1e-9);
            prop_assert!((x1 - 1920.0).abs() < 1e-6 && (y1 - 1080.0).abs() < 1e-6);
        }

        #[test]
        fn prop_margin_validation_never_panics(margin in any::<i32>(), width in any::<i32>(), height in any::<i32>()) {
            let result = ActiveRegion::new(width, height, margin);
            let valid = margin > 0 && i64::from(margin) * 2 < i64::from(width) && i64::from(margin) * 2 < i64::from(height);
            prop_assert_eq!(result.is_ok(), valid);
        }
    }
}
