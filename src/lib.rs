//! Hand-gesture pointer control from a webcam.
//!
//! This library turns a stream of 21-point hand landmarks into pointer
//! movement and clicks:
//! - ONNX Runtime runs the hand landmark model
//! - `OpenCV` handles capture, preprocessing and the overlay window
//! - X11 (with XTEST) moves the pointer and synthesizes clicks
//!
//! The per-frame pipeline consists of:
//! 1. Landmark extraction for at most one hand
//! 2. Finger up/down classification
//! 3. Mode selection: move (index up), click (index and middle up) or idle
//! 4. Mapping of the index fingertip from the active region to the screen,
//!    exponential smoothing and mirroring
//! 5. Pinch detection with time-based click debouncing
//!
//! # Examples
//!
//! ## Interpreting Landmarks
//!
//! ```
//! use std::time::{Duration, Instant};
//! use virtual_mouse::{
//!     gesture::{mapping::{ActiveRegion, ScreenSize}, GestureConfig, GestureInterpreter, GestureState, Mode},
//!     landmarks::LandmarkSet,
//! };
//!
//! # fn main() -> virtual_mouse::Result<()> {
//! let interpreter = GestureInterpreter::new(GestureConfig {
//!     region: ActiveRegion::new(640, 480, 100)?,
//!     screen: ScreenSize::new(1920, 1080),
//!     smoothing: 7.0,
//!     click_distance: 40.0,
//!     click_delay: Duration::from_millis(100),
//! })?;
//! let mut state = GestureState::default();
//!
//! // Index finger raised above its middle joint, every other finger curled
//! let mut points = vec![(320, 300); 21];
//! points[8] = (320, 240);
//! let hand = LandmarkSet::from_points(&points)?;
//!
//! let outcome = interpreter.process(Some(&hand), &mut state, Instant::now());
//! assert_eq!(outcome.mode(), Mode::Move);
//! if let Some(target) = outcome.target {
//!     println!("Pointer to ({:.0}, {:.0})", target.x, target.y);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the Application
//!
//! ```no_run
//! use virtual_mouse::{app::{AppConfig, VideoSource, VirtualMouseApp}, config::Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = VirtualMouseApp::new(AppConfig {
//!     video_source: VideoSource::Camera(0),
//!     settings: Config::default(),
//! })?;
//! app.run()?;
//! # Ok(())
//! # }
//! ```

/// Hand landmark types and the extractor interface
pub mod landmarks;

/// Hand landmark detection with `ONNX` Runtime
pub mod hand_landmarks;

/// Gesture interpretation: finger states, mapping, smoothing and clicks
pub mod gesture;

/// Utility functions for coordinate conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Pointer output for X11 systems
pub mod cursor_control;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
