//! Error types for detpipe.

use thiserror::Error;

/// Result alias for detpipe operations.
pub type DetPipeResult<T> = std::result::Result<T, DetPipeError>;

/// Errors raised when a caller violates a pipeline precondition.
///
/// Malformed buffer lengths and degenerate box geometry are handled locally
/// and never surface here.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DetPipeError {
    /// The class taxonomy must contain at least one class.
    #[error("invalid class count: {num_classes}")]
    InvalidClassCount { num_classes: usize },
    /// A threshold is negative or not finite.
    #[error("invalid {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// The original image dimensions are not positive finite values.
    #[error("invalid frame size: {width}x{height}")]
    InvalidFrameSize { width: f32, height: f32 },
    /// A detection refers to a class outside the taxonomy.
    #[error("class index {index} out of range for {num_classes} classes")]
    ClassIndexOutOfRange { index: usize, num_classes: usize },
    /// The taxonomy length disagrees with the configured class count.
    #[error("taxonomy has {got} classes, expected {expected}")]
    TaxonomyMismatch { expected: usize, got: usize },
    /// Reading image metadata failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
