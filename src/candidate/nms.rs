//! Greedy non-maximum suppression over decoded candidates.

use std::cmp::Ordering;

use crate::candidate::{Detection, RawCandidate};
use crate::trace::{trace_event, trace_span};
use crate::util::math::is_non_negative_finite;
use crate::util::{DetPipeError, DetPipeResult};

fn score_cmp_desc(a: &RawCandidate, b: &RawCandidate) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Sorts candidates by descending score.
///
/// The sort is stable, so equal scores keep their input order.
pub(crate) fn sort_candidates_desc(candidates: &mut [RawCandidate]) {
    candidates.sort_by(score_cmp_desc);
}

/// Applies class-agnostic greedy NMS.
///
/// Candidates are visited in descending score order. A candidate is kept
/// unless its IoU with an already kept box is strictly greater than
/// `iou_threshold`. The result is in selection order.
pub fn suppress(candidates: &[RawCandidate], iou_threshold: f32) -> DetPipeResult<Vec<Detection>> {
    if !is_non_negative_finite(iou_threshold) {
        return Err(DetPipeError::InvalidThreshold {
            name: "iou_threshold",
            value: iou_threshold,
        });
    }
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let _span = trace_span!("suppress", candidates = candidates.len()).entered();

    let mut sorted = candidates.to_vec();
    sort_candidates_desc(&mut sorted);

    let mut kept: Vec<Detection> = Vec::new();
    'outer: for candidate in sorted {
        for selected in kept.iter() {
            if selected.bbox.iou(&candidate.bbox) > iou_threshold {
                continue 'outer;
            }
        }
        kept.push(candidate.into());
    }

    trace_event!(
        "suppress_done",
        kept = kept.len(),
        suppressed = candidates.len() - kept.len()
    );
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::{sort_candidates_desc, suppress};
    use crate::candidate::RawCandidate;
    use crate::geometry::BoundingBox;

    fn cand(x1: f32, score: f32, class_index: usize) -> RawCandidate {
        RawCandidate {
            bbox: BoundingBox::new(x1, 0.0, x1 + 10.0, 10.0),
            class_index,
            score,
        }
    }

    #[test]
    fn sort_keeps_input_order_for_equal_scores() {
        let mut items = vec![cand(0.0, 0.5, 0), cand(20.0, 0.9, 1), cand(40.0, 0.5, 2)];
        sort_candidates_desc(&mut items);
        let classes: Vec<usize> = items.iter().map(|c| c.class_index).collect();
        assert_eq!(classes, vec![1, 0, 2]);
    }

    #[test]
    fn suppression_ignores_class_labels() {
        let out = suppress(&[cand(0.0, 0.8, 0), cand(1.0, 0.7, 3)], 0.45).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].class_index, 0);
    }

    #[test]
    fn iou_equal_to_threshold_is_not_suppressed() {
        // Same height, half-width overlap: IoU = 50 / 150 = 1/3.
        let a = RawCandidate {
            bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            class_index: 0,
            score: 0.9,
        };
        let b = RawCandidate {
            bbox: BoundingBox::new(5.0, 0.0, 15.0, 10.0),
            class_index: 0,
            score: 0.8,
        };
        let iou = a.bbox.iou(&b.bbox);
        assert_eq!(suppress(&[a, b], iou).unwrap().len(), 2);
        assert_eq!(suppress(&[a, b], iou - 1e-3).unwrap().len(), 1);
    }
}
