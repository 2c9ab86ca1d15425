//! detpipe turns raw object-detection tensors into labeled detections and
//! per-class statistics.
//!
//! The pipeline has three pure stages: [`decode()`] reads fixed-stride
//! candidate records and applies the confidence and frame filters,
//! [`suppress()`] runs greedy class-agnostic non-maximum suppression, and
//! [`aggregate()`] summarizes the result per class. [`Detector`] chains them
//! under one validated [`DetectorConfig`]. Record-parallel decoding and
//! batch processing are available with the `rayon` feature.

mod candidate;
pub mod decode;
pub mod geometry;
#[cfg(feature = "image-io")]
pub mod io;
pub mod lowlevel;
pub mod pipeline;
pub mod stats;
mod trace;
pub mod util;

pub use candidate::nms::suppress;
pub use candidate::{Detection, RawCandidate};
pub use decode::decode;
pub use geometry::{BoundingBox, FrameSize};
pub use pipeline::{DetectionOutput, Detector, DetectorConfig, Taxonomy};
pub use stats::{aggregate, AggregateReport, ClassStatistics};
pub use util::{DetPipeError, DetPipeResult};
