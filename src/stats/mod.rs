//! Per-class aggregation of a detection set.

use crate::candidate::Detection;
use crate::trace::{trace_event, trace_span};
use crate::util::math::mean_or_zero;
use crate::util::{DetPipeError, DetPipeResult};

/// Count and mean confidence of one class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassStatistics {
    /// Class index in the taxonomy.
    pub class_index: usize,
    /// Number of detections of this class.
    pub count: usize,
    /// Mean score of this class's detections, `0.0` when `count == 0`.
    pub mean_confidence: f32,
}

/// Per-class table plus global totals for one detection set.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateReport {
    classes: Vec<ClassStatistics>,
    total_count: usize,
    overall_mean_confidence: f32,
}

impl AggregateReport {
    /// Returns one entry per class, in class-index order.
    pub fn classes(&self) -> &[ClassStatistics] {
        &self.classes
    }

    /// Returns the statistics of `class_index`, if it is in range.
    pub fn class(&self, class_index: usize) -> Option<&ClassStatistics> {
        self.classes.get(class_index)
    }

    /// Returns the number of detections across all classes.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the mean score across all detections, `0.0` when empty.
    pub fn overall_mean_confidence(&self) -> f32 {
        self.overall_mean_confidence
    }

    /// Iterates over classes with at least one detection.
    pub fn detected_classes(&self) -> impl Iterator<Item = &ClassStatistics> + '_ {
        self.classes.iter().filter(|stats| stats.count > 0)
    }

    /// Returns the per-class counts in class-index order.
    pub fn counts(&self) -> Vec<usize> {
        self.classes.iter().map(|stats| stats.count).collect()
    }

    /// Returns the number of classes in the table.
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }
}

/// Summarizes `detections` into a report with `num_classes` rows.
///
/// Each class gets its own zeroed count and score sum. A detection whose
/// class is outside `0..num_classes` is rejected.
pub fn aggregate(detections: &[Detection], num_classes: usize) -> DetPipeResult<AggregateReport> {
    if num_classes == 0 {
        return Err(DetPipeError::InvalidClassCount { num_classes });
    }

    let _span = trace_span!("aggregate", detections = detections.len()).entered();

    let mut counts = vec![0usize; num_classes];
    let mut sums = vec![0.0f32; num_classes];
    let mut total_sum = 0.0f32;

    for det in detections {
        let idx = det.class_index;
        if idx >= num_classes {
            return Err(DetPipeError::ClassIndexOutOfRange {
                index: idx,
                num_classes,
            });
        }
        counts[idx] += 1;
        sums[idx] += det.score;
        total_sum += det.score;
    }

    let classes = counts
        .iter()
        .zip(sums.iter())
        .enumerate()
        .map(|(class_index, (&count, &sum))| ClassStatistics {
            class_index,
            count,
            mean_confidence: mean_or_zero(sum, count),
        })
        .collect();

    let report = AggregateReport {
        classes,
        total_count: detections.len(),
        overall_mean_confidence: mean_or_zero(total_sum, detections.len()),
    };

    trace_event!(
        "aggregate_done",
        total = report.total_count,
        detected_classes = report.detected_classes().count()
    );
    Ok(report)
}
