use crate::{
    constants::{FINGER_TIP_IDS, NUM_HAND_LANDMARKS},
    landmarks::LandmarkSet,
};

/// The five fingers, thumb first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers in landmark order
    pub const ALL: [Self; 5] = [Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// Landmark id of the fingertip
    #[must_use]
    pub const fn tip_id(self) -> usize {
        FINGER_TIP_IDS[self as usize]
    }

    /// Landmark id of the joint the tip is compared against
    #[must_use]
    pub const fn reference_id(self) -> usize {
        match self {
            Self::Thumb => self.tip_id() - 1,
            _ => self.tip_id() - 2,
        }
    }
}

/// Up/down state of each finger for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    /// Build from per-finger flags, thumb first
    #[must_use]
    pub const fn new(up: [bool; 5]) -> Self {
        Self(up)
    }

    /// Build from 0/1 values, any non-zero counts as up
    #[must_use]
    pub fn from_bits(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    /// 0/1 representation, thumb first
    #[must_use]
    pub fn to_bits(self) -> [u8; 5] {
        self.0.map(u8::from)
    }

    /// Whether the given finger is extended
    #[must_use]
    pub const fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    /// Number of extended fingers
    #[must_use]
    pub fn count_up(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }
}

/// Classify which fingers are extended.
///
/// The thumb is tested laterally (tip right of the preceding joint in the
/// mirrored frame), the other fingers vertically (tip above the joint two
/// below it). Returns `None` unless all 21 landmarks are present.
#[must_use]
pub fn fingers_up(landmarks: &LandmarkSet) -> Option<FingerStates> {
    if landmarks.len() < NUM_HAND_LANDMARKS {
        return None;
    }

    let mut up = [false; 5];
    for finger in Finger::ALL {
        let tip = landmarks.get(finger.tip_id())?;
        let joint = landmarks.get(finger.reference_id())?;
        up[finger as usize] = match finger {
            Finger::Thumb => tip.x > joint.x,
            _ => tip.y < joint.y,
        };
    }

    Some(FingerStates(up))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Flat hand with every tip level with its reference joint
    fn level_hand() -> Vec<(i32, i32)> {
        vec![(100, 100); NUM_HAND_LANDMARKS]
    }

    #[test]
    fn test_reference_joints() {
        assert_eq!(Finger::Thumb.reference_id(), 3);
        assert_eq!(Finger::Index.reference_id(), 6);
        assert_eq!(Finger::Pinky.reference_id(), 18);
    }

    #[test]
    fn test_incomplete_hand_is_undefined() {
        let points = vec![(0, 0); 20];
        let set = LandmarkSet::from_points(&points).unwrap();
        assert_eq!(fingers_up(&set), None);
        assert_eq!(fingers_up(&LandmarkSet::default()), None);
    }

    #[test]
    fn test_level_tips_are_down() {
        let set = LandmarkSet::from_points(&level_hand()).unwrap();
        assert_eq!(fingers_up(&set).unwrap().to_bits(), [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_one_pixel_thresholds() {
        for finger in &Finger::ALL[1..] {
            let mut points = level_hand();
            points[finger.tip_id()].1 -= 1;
            let set = LandmarkSet::from_points(&points).unwrap();
            assert!(fingers_up(&set).unwrap().is_up(*finger), "{finger:?} should be up");

            points[finger.tip_id()].1 += 2;
            let set = LandmarkSet::from_points(&points).unwrap();
            assert!(!fingers_up(&set).unwrap().is_up(*finger), "{finger:?} should be down");
        }
    }

    #[test]
    fn test_thumb_uses_x() {
        let mut points = level_hand();
        points[4] = (101, 50);
        let set = LandmarkSet::from_points(&points).unwrap();
        assert_eq!(fingers_up(&set).unwrap().to_bits(), [1, 0, 0, 0, 0]);

        points[4] = (99, 50);
        let set = LandmarkSet::from_points(&points).unwrap();
        assert_eq!(fingers_up(&set).unwrap().to_bits(), [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_bits_round_trip() {
        let states = FingerStates::from_bits([0, 1, 1, 0, 1]);
        assert_eq!(states.count_up(), 3);
        assert_eq!(states.to_bits(), [0, 1, 1, 0, 1]);
    }

    proptest! {
        #[test]
        fn prop_vertical_threshold(
            joint_x in -1000i32..1000,
            joint_y in -1000i32..1000,
            offset in -50i32..50,
            which in 1usize..5,
        ) {
            let finger = Finger::ALL[which];
            let mut points = vec![(joint_x, joint_y); NUM_HAND_LANDMARKS];
            points[finger.tip_id()] = (joint_x, joint_y + offset);
            let set = LandmarkSet::from_points(&points).unwrap();
            prop_assert_eq!(fingers_up(&set).unwrap().is_up(finger), offset < 0);
        }

        #[test]
        fn prop_thumb_threshold(
            joint_x in -1000i32..1000,
            joint_y in -1000i32..1000,
            offset in -50i32..50,
            tip_y in -1000i32..1000,
        ) {
            let mut points = vec![(joint_x, joint_y); NUM_HAND_LANDMARKS];
            points[Finger::Thumb.tip_id()] = (joint_x + offset, tip_y);
            let set = LandmarkSet::from_points(&points).unwrap();
            let states = fingers_up(&set).unwrap();
            prop_assert_eq!(states.is_up(Finger::Thumb), offset > 0);
            prop_assert_eq!(states.count_up(), usize::from(offset > 0));
        }

        #[test]
        fn prop_fewer_than_21_is_undefined(count in 0usize..NUM_HAND_LANDMARKS) {
            let set = LandmarkSet::from_points(&vec![(5, 5); count]).unwrap();
            prop_assert!(fingers_up(&set).is_none());
        }
    }
}
