use crate::landmarks::LandmarkSet;

/// Segment between two landmarks with its length and midpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerSpan {
    pub start: (i32, i32),
    pub end: (i32, i32),
    pub midpoint: (i32, i32),
    pub length: f64,
}

/// Euclidean distance and floored midpoint between landmarks `p1` and `p2`.
///
/// Returns `None` if either landmark is missing from the set.
#[must_use]
pub fn find_distance(landmarks: &LandmarkSet, p1: usize, p2: usize) -> Option<FingerSpan> {
    let (x1, y1) = landmarks.get(p1)?.position();
    let (x2, y2) = landmarks.get(p2)?.position();

    let length = f64::from(x2 - x1).hypot(f64::from(y2 - y1));
    let midpoint = ((x1 + x2).div_euclid(2), (y1 + y2).div_euclid(2));

    Some(FingerSpan {
        start: (x1, y1),
        end: (x2, y2),
        midpoint,
        length,
    })
}
