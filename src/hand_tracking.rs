//! Hand-tracking providers.
//!
//! A tracker turns a camera frame into zero or one hand's landmark set,
//! normalized to `[0, 1]` on both axes. The wheel logic never looks at pixels.

use crate::{
    constants::NUM_HAND_LANDMARKS,
    error::Error,
    gesture::Landmark,
    utils::safe_cast::usize_to_i32,
    Result,
};
use ndarray::{Array4, CowArray};
use opencv::core::{Mat, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Default hand landmark model input size
const DEFAULT_HAND_INPUT_SIZE: i32 = 224;

/// Coordinates per landmark in the model output (x, y, z)
const COORDS_PER_LANDMARK: usize = 3;

/// Source of per-frame hand observations
pub trait HandTracker {
    /// Find at most one hand in `frame`
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing or inference fails.
    fn detect(&mut self, frame: &Mat) -> Result<Option<Vec<Landmark>>>;

    /// Tracker name for logging
    fn name(&self) -> &str;
}

/// Tracker that never reports a hand; the wheel is then keyboard-driven only
pub struct NullTracker;

impl HandTracker for NullTracker {
    fn detect(&mut self, _frame: &Mat) -> Result<Option<Vec<Landmark>>> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "NullTracker"
    }
}

/// Hand landmark detector using `ONNX` Runtime
///
/// Expects a single-hand landmark model taking an RGB `NHWC` float tensor in
/// `[0, 1]` and producing 21 `(x, y, z)` points in input pixels, optionally
/// followed by a hand presence score.
///
/// There is no palm-detection stage: the whole frame is resized to the model
/// input, so the model must cope with an uncropped hand. Landmark-only models
/// trained on tight hand crops will lose accuracy when the hand is small in
/// the frame.
pub struct HandLandmarkDetector {
    session: Session,
    input_size: i32,
    confidence_threshold: f32,
}

impl HandLandmarkDetector {
    /// Create a new hand landmark detector from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The model has no inputs or outputs
    /// - The ONNX runtime environment cannot be created
    pub fn new<P: AsRef<Path>>(model_path: P, confidence_threshold: f32) -> Result<Self> {
        log::info!(
            "Initializing HandLandmarkDetector with model: {}",
            model_path.as_ref().display()
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

        let input_meta = session
            .inputs
            .first()
            .ok_or_else(|| Error::ModelInputError("Model has no inputs".to_string()))?;

        // NHWC: [batch, height, width, channels]
        let input_size = input_meta
            .dimensions
            .get(1)
            .copied()
            .flatten()
            .and_then(|d| i32::try_from(d).ok())
            .unwrap_or(DEFAULT_HAND_INPUT_SIZE);

        if session.outputs.is_empty() {
            return Err(Error::ModelOutputError("Model has no outputs".to_string()));
        }

        log::info!("Hand landmark model input size: {}x{}", input_size, input_size);

        Ok(Self {
            session,
            input_size,
            confidence_threshold,
        })
    }

    /// Preprocess a frame for the model
    #[allow(clippy::cast_sign_loss)] // Input size is positive
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let size = self.input_size as usize;
        let channels = 3;

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

        let mut data = vec![0.0f32; size * size * channels];
        for row in 0..size {
            for col in 0..size {
                let pixel = float_image.at_2d::<opencv::core::Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
                for ch in 0..channels {
                    data[(row * size + col) * channels + ch] = pixel[ch];
                }
            }
        }

        Array4::from_shape_vec((1, size, size, channels), data)
            .map_err(|e| Error::ModelDataFormatError(format!("Failed to create array: {e}")))
    }

    /// Run inference, returning the flat landmark tensor and the presence score if the model has one
    fn forward(&self, input: Array4<f32>) -> Result<(Vec<f32>, Option<f32>)> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        let mut outputs = outputs.into_iter();

        let marks_output = outputs
            .next()
            .ok_or_else(|| Error::ModelOutputError("No output from model".to_string()))?;
        let marks_tensor = marks_output.try_extract::<f32>()?;
        let marks_view = marks_tensor.view();
        let marks = marks_view
            .as_slice()
            .ok_or_else(|| Error::ModelOutputError("Failed to get landmark data".to_string()))?
            .to_vec();

        let presence = match outputs.next() {
            Some(score_output) => {
                let score_tensor = score_output.try_extract::<f32>()?;
                let score_view = score_tensor.view();
                score_view.iter().next().copied()
            }
            None => None,
        };

        Ok((marks, presence))
    }

    /// Convert the flat output to normalized landmarks
    #[allow(clippy::cast_precision_loss)]
    fn postprocess(&self, marks: &[f32]) -> Result<Vec<Landmark>> {
        let expected = NUM_HAND_LANDMARKS * COORDS_PER_LANDMARK;
        if marks.len() < expected {
            return Err(Error::ModelDataFormatError(format!(
                "Expected {expected} landmark values, got {}",
                marks.len()
            )));
        }

        let scale = self.input_size as f32;
        Ok(marks
            .chunks_exact(COORDS_PER_LANDMARK)
            .take(NUM_HAND_LANDMARKS)
            .map(|c| Landmark::new(c[0] / scale, c[1] / scale, c[2] / scale))
            .collect())
    }
}

/// Map a raw presence output to a probability
fn presence_probability(raw: f32) -> f32 {
    if (0.0..=1.0).contains(&raw) {
        raw
    } else {
        1.0 / (1.0 + (-raw).exp())
    }
}

impl HandTracker for HandLandmarkDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Option<Vec<Landmark>>> {
        if frame.empty() {
            return Ok(None);
        }

        let input = self.preprocess(frame)?;
        let (marks, presence) = self.forward(input)?;

        if let Some(raw) = presence {
            let score = presence_probability(raw);
            if score < self.confidence_threshold {
                log::trace!("Hand presence {:.2} below threshold", score);
                return Ok(None);
            }
        }

        self.postprocess(&marks).map(Some)
    }

    fn name(&self) -> &str {
        "HandLandmarkDetector"
    }
}
