//! Decode, suppress and aggregate in one configured call.
//!
//! [`Detector`] owns a validated [`DetectorConfig`] and an optional
//! [`Taxonomy`]; it holds no per-call state, so one detector can serve any
//! number of independent inputs.

pub mod taxonomy;

use crate::candidate::nms::suppress;
use crate::candidate::{Detection, RawCandidate};
use crate::decode::{decode_seq, validate_decode_params, RecordLayout};
use crate::geometry::FrameSize;
use crate::stats::{aggregate, AggregateReport};
use crate::trace::{trace_event, trace_span};
use crate::util::math::is_non_negative_finite;
use crate::util::{DetPipeError, DetPipeResult};

pub use taxonomy::Taxonomy;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Tunable parameters for the detection pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Candidates must score strictly above this to be kept.
    pub confidence_threshold: f32,
    /// A box is suppressed when its IoU with a kept box is strictly above this.
    pub iou_threshold: f32,
    /// Number of class scores per record.
    pub num_classes: usize,
    /// Square network input edge in pixels. Not used by post-processing.
    pub input_size: usize,
    /// Decode records and batch items in parallel when `rayon` is enabled.
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.25,
            iou_threshold: 0.45,
            num_classes: 6,
            input_size: 640,
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Checks every precondition the pipeline relies on.
    pub fn validate(&self) -> DetPipeResult<()> {
        validate_decode_params(self.num_classes, self.confidence_threshold)?;
        if !is_non_negative_finite(self.iou_threshold) {
            return Err(DetPipeError::InvalidThreshold {
                name: "iou_threshold",
                value: self.iou_threshold,
            });
        }
        Ok(())
    }

    /// Returns the record layout implied by `num_classes`.
    pub fn layout(&self) -> RecordLayout {
        RecordLayout::new(self.num_classes)
    }
}

/// Detections of one input together with their aggregate report.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionOutput {
    /// Suppressed detections in selection order.
    pub detections: Vec<Detection>,
    /// Per-class statistics of `detections`.
    pub report: AggregateReport,
}

/// Configured detection pipeline.
#[derive(Clone, Debug)]
pub struct Detector {
    config: DetectorConfig,
    taxonomy: Option<Taxonomy>,
}

impl Detector {
    /// Creates a detector after validating `config`.
    pub fn new(config: DetectorConfig) -> DetPipeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            taxonomy: None,
        })
    }

    /// Attaches a taxonomy whose length must equal `num_classes`.
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> DetPipeResult<Self> {
        if taxonomy.len() != self.config.num_classes {
            return Err(DetPipeError::TaxonomyMismatch {
                expected: self.config.num_classes,
                got: taxonomy.len(),
            });
        }
        self.taxonomy = Some(taxonomy);
        Ok(self)
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns the attached taxonomy, if any.
    pub fn taxonomy(&self) -> Option<&Taxonomy> {
        self.taxonomy.as_ref()
    }

    /// Decodes `buffer` and suppresses overlapping boxes.
    pub fn detect(&self, buffer: &[f32], frame: FrameSize) -> DetPipeResult<Vec<Detection>> {
        let _span = trace_span!("detect", len = buffer.len(), parallel = self.config.parallel)
            .entered();

        let candidates = self.decode(buffer, frame);
        let detections = suppress(&candidates, self.config.iou_threshold)?;

        trace_event!(
            "detect_done",
            candidates = candidates.len(),
            detections = detections.len()
        );
        Ok(detections)
    }

    /// Runs decode, suppression and aggregation for one input.
    pub fn run(&self, buffer: &[f32], frame: FrameSize) -> DetPipeResult<DetectionOutput> {
        let detections = self.detect(buffer, frame)?;
        let report = aggregate(&detections, self.config.num_classes)?;
        Ok(DetectionOutput { detections, report })
    }

    /// Runs the pipeline on several independent inputs.
    ///
    /// Results are in input order. With `parallel` set and the `rayon`
    /// feature enabled, inputs are processed concurrently.
    pub fn run_batch(&self, inputs: &[(&[f32], FrameSize)]) -> DetPipeResult<Vec<DetectionOutput>> {
        let _span = trace_span!("run_batch", inputs = inputs.len()).entered();

        #[cfg(feature = "rayon")]
        if self.config.parallel {
            return inputs
                .par_iter()
                .map(|(buffer, frame)| self.run(buffer, *frame))
                .collect();
        }

        inputs
            .iter()
            .map(|(buffer, frame)| self.run(buffer, *frame))
            .collect()
    }

    fn decode(&self, buffer: &[f32], frame: FrameSize) -> Vec<RawCandidate> {
        let layout = self.config.layout();
        let threshold = self.config.confidence_threshold;

        #[cfg(feature = "rayon")]
        if self.config.parallel {
            return crate::decode::rayon::decode_par(buffer, layout, threshold, frame);
        }

        decode_seq(buffer, layout, threshold, frame)
    }
}
