//! Per-frame interpretation of hand landmarks into pointer actions.
//!
//! Each frame the finger states select one of three modes:
//!
//! - **Move** (index up, middle down): the index tip is mapped from the active
//!   region to the screen, smoothed, mirrored and emitted as a target.
//! - **Click** (index and middle up): a click fires when the two tips are
//!   closer than the click distance and the previous click is old enough.
//! - **Idle**: anything else, including frames without a complete hand.
//!
//! The only data carried between frames is [`GestureState`], owned by the
//! caller and passed in by mutable reference.

/// Inter-click debouncing
pub mod click;

/// Distance and midpoint between two landmarks
pub mod distance;

/// Finger up/down classification
pub mod fingers;

/// Active region and camera-to-screen mapping
pub mod mapping;

/// Exponential pointer smoothing
pub mod smoothing;

use crate::{
    constants::{INDEX_FINGER_TIP, MIDDLE_FINGER_TIP},
    landmarks::LandmarkSet,
    Error, Result,
};
use click::ClickGate;
use distance::{find_distance, FingerSpan};
use fingers::{fingers_up, Finger, FingerStates};
use log::debug;
use mapping::{ActiveRegion, ScreenSize};
use smoothing::{PointerState, Smoother};
use std::time::{Duration, Instant};

/// Behaviour selected for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pointer follows the index fingertip
    Move,
    /// Pinch between index and middle tips is evaluated
    Click,
    /// No pointer action
    Idle,
}

impl Mode {
    /// Select the mode from the finger states; only index and middle matter
    #[must_use]
    pub const fn select(fingers: Option<&FingerStates>) -> Self {
        match fingers {
            Some(f) if f.is_up(Finger::Index) && !f.is_up(Finger::Middle) => Self::Move,
            Some(f) if f.is_up(Finger::Index) && f.is_up(Finger::Middle) => Self::Click,
            _ => Self::Idle,
        }
    }
}

/// Absolute screen coordinate for the pointer sink, already mirrored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTarget {
    pub x: f64,
    pub y: f64,
}

/// State persisted across frames
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    /// Last smoothed (unmirrored) location, updated only in move mode
    pub pointer: PointerState,
    /// Last accepted click
    pub clicks: ClickGate,
}

/// Tunables of the interpreter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub region: ActiveRegion,
    pub screen: ScreenSize,
    pub smoothing: f64,
    pub click_distance: f64,
    pub click_delay: Duration,
}

/// Everything the interpreter decided for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutcome {
    /// Finger states, `None` when the hand was missing or incomplete
    pub fingers: Option<FingerStates>,
    /// Raw index fingertip position in frame pixels
    pub index_tip: Option<(i32, i32)>,
    /// Pointer target emitted in move mode
    pub target: Option<ScreenTarget>,
    /// Index-middle segment measured in click mode
    pub span: Option<FingerSpan>,
    /// Tips were closer than the click distance
    pub pinched: bool,
    /// A click was accepted this frame
    pub clicked: bool,
}

impl FrameOutcome {
    /// Mode derived from the classified finger states
    #[must_use]
    pub const fn mode(&self) -> Mode {
        Mode::select(self.fingers.as_ref())
    }
}

/// Stateless per-frame gesture interpreter
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    config: GestureConfig,
    smoother: Smoother,
}

impl GestureInterpreter {
    /// # Errors
    ///
    /// Returns an error if the smoothing factor is below 1 or the click
    /// distance is not positive
    pub fn new(config: GestureConfig) -> Result<Self> {
        let smoother = Smoother::new(config.smoothing)?;
        if !(config.click_distance > 0.0) {
            return Err(Error::InvalidInput(format!(
                "Click distance must be positive, got {}",
                config.click_distance
            )));
        }
        Ok(Self { config, smoother })
    }

    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Interpret one frame.
    ///
    /// `state.pointer` only changes in move mode; `state.clicks` only when a
    /// click is accepted.
    pub fn process(&self, landmarks: Option<&LandmarkSet>, state: &mut GestureState, now: Instant) -> FrameOutcome {
        let Some(landmarks) = landmarks else {
            return FrameOutcome::default();
        };

        let mut outcome = FrameOutcome {
            fingers: fingers_up(landmarks),
            index_tip: landmarks.get(INDEX_FINGER_TIP).map(|lm| lm.position()),
            ..FrameOutcome::default()
        };

        match outcome.mode() {
            Mode::Move => {
                if let Some((x, y)) = outcome.index_tip {
                    outcome.target = Some(self.move_pointer(x, y, &mut state.pointer));
                }
            }
            Mode::Click => {
                outcome.span = find_distance(landmarks, INDEX_FINGER_TIP, MIDDLE_FINGER_TIP);
                if let Some(span) = outcome.span {
                    outcome.pinched = span.length < self.config.click_distance;
                    if outcome.pinched {
                        outcome.clicked = state.clicks.try_accept(now, self.config.click_delay);
                        debug!(
                            "Pinch at ({}, {}), length {:.1}, clicked: {}",
                            span.midpoint.0, span.midpoint.1, span.length, outcome.clicked
                        );
                    }
                }
            }
            Mode::Idle => {}
        }

        outcome
    }

    /// Map, smooth and mirror a fingertip position, updating `pointer`
    pub fn move_pointer(&self, x: i32, y: i32, pointer: &mut PointerState) -> ScreenTarget {
        let screen = self.config.screen;
        let mapped = self.config.region.map_to_screen(x, y, screen);
        let (smooth_x, smooth_y) = self.smoother.apply(pointer, mapped);
        ScreenTarget {
            x: f64::from(screen.width) - smooth_x,
            y: smooth_y,
        }
    }
}
