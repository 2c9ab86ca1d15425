//! Candidate and detection records plus greedy suppression.
//!
//! The decoder emits [`RawCandidate`]s; non-maximum suppression turns the
//! survivors into [`Detection`]s.

pub(crate) mod nms;

use crate::geometry::BoundingBox;

/// A thresholded, in-frame box that has not been through suppression yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawCandidate {
    /// Box corners in original-image pixels.
    pub bbox: BoundingBox,
    /// Index of the winning class.
    pub class_index: usize,
    /// Objectness times the winning class probability.
    pub score: f32,
}

/// A final detection that survived suppression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Box corners in original-image pixels.
    pub bbox: BoundingBox,
    /// Index of the recognized class.
    pub class_index: usize,
    /// Confidence score.
    pub score: f32,
}

impl Detection {
    /// Returns the box width in pixels.
    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    /// Returns the box height in pixels.
    pub fn height(&self) -> f32 {
        self.bbox.height()
    }
}

impl From<RawCandidate> for Detection {
    fn from(value: RawCandidate) -> Self {
        Self {
            bbox: value.bbox,
            class_index: value.class_index,
            score: value.score,
        }
    }
}

impl From<Detection> for RawCandidate {
    fn from(value: Detection) -> Self {
        Self {
            bbox: value.bbox,
            class_index: value.class_index,
            score: value.score,
        }
    }
}
