//! Hand landmark extraction with `ONNX` Runtime.
//!
//! Expects a 21-point hand landmark model taking one NHWC RGB image in
//! `[0, 1]` and producing at least two outputs: 63 floats (x, y, z per joint,
//! in input pixel units) followed by a hand presence score. The whole frame is
//! fed to the model, so the hand should fill a reasonable part of the view.

use crate::{
    constants::{MAX_TRACKED_HANDS, NUM_HAND_LANDMARKS},
    error::Error,
    landmarks::{Landmark, LandmarkExtractor, LandmarkSet},
    utils::safe_cast::{f64_to_i32, usize_to_i32},
    Result,
};
use log::{debug, info};
use ndarray::{Array4, CowArray};
use opencv::core::{Mat, Size, Vec3f, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Default landmark model input size
const DEFAULT_INPUT_SIZE: i32 = 224;

/// Values per landmark in the model output
const COORDS_PER_LANDMARK: usize = 3;

/// Hand landmark detector using `ONNX` Runtime
pub struct HandLandmarkDetector {
    session: Session,
    input_size: i32,
    detection_confidence: f32,
    tracking_confidence: f32,
    tracking: bool,
}

impl HandLandmarkDetector {
    /// Load a landmark model.
    ///
    /// `detection_confidence` gates a hand appearing; once a hand is tracked
    /// the presence score only has to stay above `tracking_confidence`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A confidence is outside `[0, 1]`
    /// - The ONNX model file cannot be loaded
    /// - The ONNX runtime environment cannot be created
    pub fn new<P: AsRef<Path>>(model_path: P, detection_confidence: f32, tracking_confidence: f32) -> Result<Self> {
        for (name, value) in [("Detection", detection_confidence), ("Tracking", tracking_confidence)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidInput(format!(
                    "{name} confidence must be between 0.0 and 1.0, got {value}"
                )));
            }
        }

        info!(
            "Initializing HandLandmarkDetector with model: {} (max hands: {})",
            model_path.as_ref().display(),
            MAX_TRACKED_HANDS
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_landmarks")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        if session.outputs.len() < 2 {
            return Err(Error::ModelError(format!(
                "Expected landmark and presence outputs, model has {}",
                session.outputs.len()
            )));
        }

        Ok(Self {
            session,
            input_size: DEFAULT_INPUT_SIZE,
            detection_confidence,
            tracking_confidence,
            tracking: false,
        })
    }

    /// Resize, convert to RGB and normalize a frame into a 1xHxWx3 tensor
    #[allow(clippy::cast_sign_loss)] // Input size is a positive constant
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let size = self.input_size as usize;

        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = Vec::with_capacity(size * size * 3);
        for row in 0..size {
            for col in 0..size {
                let pixel = float_image.at_2d::<Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
                data.extend_from_slice(&[pixel[0], pixel[1], pixel[2]]);
            }
        }

        Array4::from_shape_vec((1, size, size, 3), data)
            .map_err(|e| Error::ModelOutputError(format!("Failed to create input array: {e}")))
    }

    /// Run the model, returning raw landmark values and the presence score
    fn forward(&self, input: Array4<f32>) -> Result<(Vec<f32>, f32)> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        let mut outputs = outputs.into_iter();

        let marks_output = outputs
            .next()
            .ok_or_else(|| Error::ModelOutputError("No landmark output from model".to_string()))?;
        let marks_tensor = marks_output.try_extract::<f32>()?;
        let marks = marks_tensor
            .view()
            .as_slice()
            .ok_or_else(|| Error::ModelOutputError("Failed to get landmark data".to_string()))?
            .to_vec();

        let score_output = outputs
            .next()
            .ok_or_else(|| Error::ModelOutputError("No presence output from model".to_string()))?;
        let score_tensor = score_output.try_extract::<f32>()?;
        let score = score_tensor
            .view()
            .iter()
            .next()
            .copied()
            .ok_or_else(|| Error::ModelOutputError("Empty presence output".to_string()))?;

        Ok((marks, presence_probability(score)))
    }

    /// Scale raw model coordinates to frame pixels
    fn postprocess(&self, marks: &[f32], frame_width: i32, frame_height: i32) -> Result<LandmarkSet> {
        if marks.len() < NUM_HAND_LANDMARKS * COORDS_PER_LANDMARK {
            return Err(Error::ModelOutputError(format!(
                "Expected {} landmark values, got {}",
                NUM_HAND_LANDMARKS * COORDS_PER_LANDMARK,
                marks.len()
            )));
        }

        let scale_x = f64::from(frame_width) / f64::from(self.input_size);
        let scale_y = f64::from(frame_height) / f64::from(self.input_size);

        let landmarks = marks
            .chunks_exact(COORDS_PER_LANDMARK)
            .take(NUM_HAND_LANDMARKS)
            .enumerate()
            .map(|(id, xyz)| {
                let x = f64_to_i32(f64::from(xyz[0]) * scale_x)?;
                let y = f64_to_i32(f64::from(xyz[1]) * scale_y)?;
                Landmark::new(id, x, y)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LandmarkSet::new(landmarks))
    }
}

impl LandmarkExtractor for HandLandmarkDetector {
    fn extract(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>> {
        if frame.empty() {
            return Err(Error::InvalidInput("Cannot extract landmarks from an empty frame".to_string()));
        }

        let input = self.preprocess(frame)?;
        let (marks, presence) = self.forward(input)?;

        let threshold = if self.tracking {
            self.tracking_confidence
        } else {
            self.detection_confidence
        };
        self.tracking = presence >= threshold;
        if !self.tracking {
            debug!("Hand presence {:.2} below threshold {:.2}", presence, threshold);
            return Ok(None);
        }

        self.postprocess(&marks, frame.cols(), frame.rows()).map(Some)
    }
}

/// Interpret a presence output as a probability, applying a sigmoid when the
/// model emits a logit
fn presence_probability(score: f32) -> f32 {
    if (0.0..=1.0).contains(&score) {
        score
    } else {
        1.0 / (1.0 + (-score).exp())
    }
}
