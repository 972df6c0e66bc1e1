//! Hand landmark types and the extractor interface.
//!
//! Landmark ids follow the 21-point hand convention: 0 is the wrist, then four
//! joints per finger from base to tip (thumb 1-4, index 5-8, middle 9-12,
//! ring 13-16, pinky 17-20).

use crate::{constants::MAX_LANDMARK_ID, Error, Result};
use opencv::core::Mat;

/// A single hand joint in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmark {
    /// Anatomical joint index in `[0, 20]`
    pub id: usize,
    /// Horizontal pixel coordinate
    pub x: i32,
    /// Vertical pixel coordinate, growing downward
    pub y: i32,
}

impl Landmark {
    /// Create a landmark, rejecting ids outside the hand model
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is greater than 20
    pub fn new(id: usize, x: i32, y: i32) -> Result<Self> {
        if id > MAX_LANDMARK_ID {
            return Err(Error::InvalidInput(format!(
                "Landmark id {id} outside [0, {MAX_LANDMARK_ID}]"
            )));
        }
        Ok(Self { id, x, y })
    }

    /// Pixel position as a tuple
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Ordered landmarks for one detected hand in one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    /// Build a set from landmarks ordered by id
    #[must_use]
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build a set from pixel positions, assigning ids by position
    ///
    /// # Errors
    ///
    /// Returns an error if more than 21 points are given
    pub fn from_points(points: &[(i32, i32)]) -> Result<Self> {
        let landmarks = points
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Landmark::new(id, x, y))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { landmarks })
    }

    /// Landmark with the given id, if present
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Landmark> {
        self.landmarks.get(id).filter(|lm| lm.id == id)
    }

    /// Number of landmarks in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// True when no landmark was produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Iterate over the landmarks in id order
    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    /// Tight bounding box `(xmin, ymin, xmax, ymax)` around all landmarks
    #[must_use]
    pub fn bounding_box(&self) -> Option<(i32, i32, i32, i32)> {
        let first = self.landmarks.first()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(self.landmarks.iter().fold(init, |(x0, y0, x1, y1), lm| {
            (x0.min(lm.x), y0.min(lm.y), x1.max(lm.x), y1.max(lm.y))
        }))
    }
}

/// Source of hand landmarks for a frame
///
/// Implementations return `Ok(None)` when no hand is visible. Errors are
/// reserved for failures of the extractor itself.
pub trait LandmarkExtractor {
    /// Extract landmarks for at most one hand
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model fails to run
    fn extract(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>>;
}
