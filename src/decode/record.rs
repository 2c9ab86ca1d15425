//! Interpretation of a single fixed-stride output record.

use crate::candidate::RawCandidate;
use crate::geometry::{BoundingBox, FrameSize};

/// Number of leading values before the class scores: `x, y, w, h, objectness`.
pub const BOX_FIELDS: usize = 5;

const OBJECTNESS: usize = 4;

/// Layout of one candidate record in the flat output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    num_classes: usize,
}

impl RecordLayout {
    pub fn new(num_classes: usize) -> Self {
        Self { num_classes }
    }

    /// Returns the number of class scores per record.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Returns the number of values per record.
    pub fn stride(&self) -> usize {
        BOX_FIELDS + self.num_classes
    }

    /// Returns the number of complete records in a buffer of `len` values.
    pub fn num_records(&self, len: usize) -> usize {
        len / self.stride()
    }
}

/// Returns `(max_prob, class_index)` over the class scores.
///
/// The running maximum starts at zero with class 0 and only a strictly
/// greater score replaces it, so the first index wins ties.
pub(crate) fn best_class(scores: &[f32]) -> (f32, usize) {
    let mut max_prob = 0.0f32;
    let mut max_idx = 0usize;
    for (idx, &prob) in scores.iter().enumerate() {
        if prob > max_prob {
            max_prob = prob;
            max_idx = idx;
        }
    }
    (max_prob, max_idx)
}

/// Decodes one record, returning `None` when it fails the confidence or
/// frame filter.
///
/// `record` must hold exactly `layout.stride()` values.
pub fn decode_record(
    record: &[f32],
    layout: RecordLayout,
    confidence_threshold: f32,
    frame: FrameSize,
) -> Option<RawCandidate> {
    let scores = record.get(BOX_FIELDS..layout.stride())?;
    let (max_prob, class_index) = best_class(scores);
    let score = record[OBJECTNESS] * max_prob;
    if score.is_nan() || score <= confidence_threshold {
        return None;
    }

    let bbox = BoundingBox::from_normalized_center(record[0], record[1], record[2], record[3], frame);
    // Partially visible boxes are dropped, not clamped.
    if !bbox.is_within(frame) {
        return None;
    }

    Some(RawCandidate {
        bbox,
        class_index,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::{best_class, decode_record, RecordLayout};
    use crate::geometry::FrameSize;

    #[test]
    fn layout_stride_and_truncation() {
        let layout = RecordLayout::new(6);
        assert_eq!(layout.stride(), 11);
        assert_eq!(layout.num_records(22), 2);
        assert_eq!(layout.num_records(32), 2);
        assert_eq!(layout.num_records(10), 0);
    }

    #[test]
    fn best_class_prefers_first_on_ties() {
        assert_eq!(best_class(&[0.2, 0.7, 0.7]), (0.7, 1));
        assert_eq!(best_class(&[0.0, 0.0]), (0.0, 0));
        assert_eq!(best_class(&[-0.5, f32::NAN]), (0.0, 0));
    }

    #[test]
    fn decode_record_rejects_short_record() {
        let frame = FrameSize::new(100.0, 100.0).unwrap();
        let layout = RecordLayout::new(2);
        assert!(decode_record(&[0.5, 0.5, 0.1, 0.1, 1.0, 0.9], layout, 0.25, frame).is_none());
    }

    #[test]
    fn decode_record_scales_box_and_scores() {
        let frame = FrameSize::new(200.0, 100.0).unwrap();
        let layout = RecordLayout::new(2);
        let record = [0.5, 0.5, 0.2, 0.4, 0.8, 0.1, 0.5];
        let cand = decode_record(&record, layout, 0.25, frame).unwrap();
        assert_eq!(cand.class_index, 1);
        assert!((cand.score - 0.4).abs() < 1e-6);
        assert!((cand.bbox.x1 - 80.0).abs() < 1e-4);
        assert!((cand.bbox.y1 - 30.0).abs() < 1e-4);
        assert!((cand.bbox.x2 - 120.0).abs() < 1e-4);
        assert!((cand.bbox.y2 - 70.0).abs() < 1e-4);
    }
}
