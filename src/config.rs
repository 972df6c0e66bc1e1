//! Configuration management for the virtual mouse application

use crate::{
    constants::{
        DEFAULT_CAMERA_HEIGHT, DEFAULT_CAMERA_WIDTH, DEFAULT_CLICK_DELAY_MS, DEFAULT_CLICK_DISTANCE,
        DEFAULT_DETECTION_CONFIDENCE, DEFAULT_FRAME_MARGIN, DEFAULT_SMOOTHING, DEFAULT_TRACKING_CONFIDENCE,
    },
    gesture::{mapping::ActiveRegion, mapping::ScreenSize, GestureConfig},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera configuration
    pub camera: CameraConfig,

    /// Pointer mapping and smoothing
    pub tracking: TrackingConfig,

    /// Click detection
    pub click: ClickConfig,

    /// Landmark model configuration
    pub model: ModelConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// Pointer output configuration
    pub cursor: CursorConfig,
}

/// Camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera device index
    pub index: i32,

    /// Requested frame width
    pub width: i32,

    /// Requested frame height
    pub height: i32,
}

/// Active region and smoothing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Pixels trimmed from each side of the frame to form the active region
    pub frame_margin: i32,

    /// Smoothing divisor, 1 disables smoothing
    pub smoothing: f64,
}

/// Click detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Index-middle fingertip distance below which a click fires, in pixels
    pub distance: f64,

    /// Minimum time between two clicks, in milliseconds
    pub delay_ms: u64,
}

/// Landmark model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the hand landmark ONNX model
    pub hand_landmarks: PathBuf,

    /// Presence score needed to start tracking a hand (0.0-1.0)
    pub detection_confidence: f32,

    /// Presence score needed to keep tracking a hand (0.0-1.0)
    pub tracking_confidence: f32,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the annotated camera window
    pub show_window: bool,

    /// Mirror the frame horizontally before processing
    pub mirror: bool,
}

/// Pointer output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Drive the system pointer
    pub enabled: bool,

    /// Reject pointer targets in screen corners
    pub fail_safe: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: DEFAULT_CAMERA_WIDTH,
            height: DEFAULT_CAMERA_HEIGHT,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            frame_margin: DEFAULT_FRAME_MARGIN,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            distance: DEFAULT_CLICK_DISTANCE,
            delay_ms: DEFAULT_CLICK_DELAY_MS,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            hand_landmarks: PathBuf::from("assets/hand_landmark.onnx"),
            detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            tracking_confidence: DEFAULT_TRACKING_CONFIDENCE,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_window: true,
            mirror: true,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fail_safe: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found
    pub fn validate(&self) -> Result<()> {
        if self.camera.width <= 0 || self.camera.height <= 0 {
            return Err(Error::ConfigError(format!(
                "Camera resolution must be positive, got {}x{}",
                self.camera.width, self.camera.height
            )));
        }

        ActiveRegion::new(self.camera.width, self.camera.height, self.tracking.frame_margin)
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        if !self.tracking.smoothing.is_finite() || self.tracking.smoothing < 1.0 {
            return Err(Error::ConfigError("Smoothing factor must be at least 1".to_string()));
        }
        if !(self.click.distance > 0.0) {
            return Err(Error::ConfigError("Click distance must be greater than 0".to_string()));
        }

        if !(0.0..=1.0).contains(&self.model.detection_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.model.tracking_confidence) {
            return Err(Error::ConfigError(
                "Tracking confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    /// Check that the landmark model file exists
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing file
    pub fn validate_model_path(&self) -> Result<()> {
        if !self.model.hand_landmarks.exists() {
            return Err(Error::ConfigError(format!(
                "Hand landmark model not found: {}",
                self.model.hand_landmarks.display()
            )));
        }
        Ok(())
    }

    /// Build the interpreter configuration for a frame size and screen
    ///
    /// # Errors
    ///
    /// Returns an error if the margin does not fit the frame
    pub fn gesture_config(&self, frame_width: i32, frame_height: i32, screen: ScreenSize) -> Result<GestureConfig> {
        Ok(GestureConfig {
            region: ActiveRegion::new(frame_width, frame_height, self.tracking.frame_margin)?,
            screen,
            smoothing: self.tracking.smoothing,
            click_distance: self.click.distance,
            click_delay: Duration::from_millis(self.click.delay_ms),
        })
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Virtual Mouse Configuration

# Camera
camera:
  index: 0
  width: 640
  height: 480

# Active region and pointer smoothing
tracking:
  frame_margin: 100
  smoothing: 7.0

# Pinch-to-click
click:
  distance: 40.0
  delay_ms: 100

# Hand landmark model
model:
  hand_landmarks: "assets/hand_landmark.onnx"
  detection_confidence: 0.5
  tracking_confidence: 0.5

# Display settings
display:
  show_window: true
  mirror: true

# Pointer output
cursor:
  enabled: true
  fail_safe: false
"#;
