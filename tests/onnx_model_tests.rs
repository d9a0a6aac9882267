//! Tests for ONNX hand landmark model loading and inference

use hand_color_wheel::{
    constants::NUM_HAND_LANDMARKS,
    hand_tracking::{HandLandmarkDetector, HandTracker, NullTracker},
    Result,
};
use opencv::{
    core::{Mat, Scalar, CV_8UC3},
    prelude::*,
};
use std::path::Path;

const MODEL_PATH: &str = "assets/hand_landmark.onnx";

#[test]
fn test_missing_model_is_an_error() {
    let result = HandLandmarkDetector::new("assets/does_not_exist.onnx", 0.7);
    assert!(result.is_err());
}

#[test]
fn test_null_tracker_on_real_frame() -> Result<()> {
    let frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(128.0))?;
    let mut tracker = NullTracker;
    assert!(tracker.detect(&frame)?.is_none());
    Ok(())
}

#[test]
#[ignore = "Requires ONNX models"]
fn test_load_hand_landmark_model() -> Result<()> {
    assert!(Path::new(MODEL_PATH).exists(), "Hand landmark model not found");

    let detector = HandLandmarkDetector::new(MODEL_PATH, 0.7)?;
    assert_eq!(detector.name(), "HandLandmarkDetector");

    Ok(())
}

#[test]
#[ignore = "Requires ONNX models"]
fn test_hand_landmark_inference_shape() -> Result<()> {
    // Zero confidence threshold so the blank frame still yields landmarks
    let mut detector = HandLandmarkDetector::new(MODEL_PATH, 0.0)?;
    let frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?;

    let landmarks = detector.detect(&frame)?.expect("landmarks at zero threshold");
    assert_eq!(landmarks.len(), NUM_HAND_LANDMARKS);
    assert!(landmarks.iter().all(|p| p.x.is_finite() && p.y.is_finite()));

    Ok(())
}

#[test]
#[ignore = "Requires ONNX models"]
fn test_empty_frame_yields_no_hand() -> Result<()> {
    let mut detector = HandLandmarkDetector::new(MODEL_PATH, 0.7)?;
    assert!(detector.detect(&Mat::default())?.is_none());
    Ok(())
}
