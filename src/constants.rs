//! Constants used throughout the application

/// Number of landmarks produced for a fully visible hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Highest valid landmark identifier
pub const MAX_LANDMARK_ID: usize = NUM_HAND_LANDMARKS - 1;

/// Landmark ids of the five fingertips, thumb to pinky
pub const FINGER_TIP_IDS: [usize; 5] = [4, 8, 12, 16, 20];

/// Index fingertip landmark id
pub const INDEX_FINGER_TIP: usize = 8;

/// Middle fingertip landmark id
pub const MIDDLE_FINGER_TIP: usize = 12;

/// Default camera resolution
pub const DEFAULT_CAMERA_WIDTH: i32 = 640;
pub const DEFAULT_CAMERA_HEIGHT: i32 = 480;

/// Default active-region margin in pixels
pub const DEFAULT_FRAME_MARGIN: i32 = 100;

/// Default smoothing divisor
pub const DEFAULT_SMOOTHING: f64 = 7.0;

/// Default pinch distance below which a click fires, in pixels
pub const DEFAULT_CLICK_DISTANCE: f64 = 40.0;

/// Default minimum gap between two accepted clicks, in milliseconds
pub const DEFAULT_CLICK_DELAY_MS: u64 = 100;

/// Only one hand is ever tracked
pub const MAX_TRACKED_HANDS: usize = 1;

/// Default detection and tracking confidence thresholds
pub const DEFAULT_DETECTION_CONFIDENCE: f32 = 0.5;
pub const DEFAULT_TRACKING_CONFIDENCE: f32 = 0.5;

/// Padding drawn around the hand bounding box in the overlay
pub const BBOX_PADDING: i32 = 20;

/// X11 pointer button number for the primary (left) button
pub const LEFT_BUTTON: u8 = 1;

/// Screen size assumed when no pointer backend reports one
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// Bone segments between hand landmarks, drawn in the overlay
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];
