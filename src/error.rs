//! Error types for the hand color wheel library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// `ONNX` Runtime inference failed
    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(#[from] ort::OrtError),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A hand observation did not carry enough usable points
    #[error("Insufficient landmarks: need {required}, found {found}")]
    InsufficientLandmarks {
        /// Number of points the geometry needs
        required: usize,
        /// Number of points actually supplied
        found: usize,
    },

    /// Model input configuration error
    #[error("Model input error: {0}")]
    ModelInputError(String),

    /// Model output processing error
    #[error("Model output error: {0}")]
    ModelOutputError(String),

    /// Model data shape or format error
    #[error("Model data format error: {0}")]
    ModelDataFormatError(String),

    /// Camera could not be opened or read
    #[error("Camera error: {0}")]
    Camera(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
