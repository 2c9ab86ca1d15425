//! Decoding of the raw network output into thresholded candidates.
//!
//! The buffer is a flat sequence of records, each `5 + num_classes` values
//! long: normalized box centre and size, objectness, then one probability
//! per class. A trailing partial record is ignored.

pub(crate) mod record;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

use crate::candidate::RawCandidate;
use crate::geometry::FrameSize;
use crate::trace::{trace_event, trace_span};
use crate::util::math::is_non_negative_finite;
use crate::util::{DetPipeError, DetPipeResult};

pub use record::{decode_record, RecordLayout, BOX_FIELDS};

pub(crate) fn validate_decode_params(
    num_classes: usize,
    confidence_threshold: f32,
) -> DetPipeResult<RecordLayout> {
    if num_classes == 0 {
        return Err(DetPipeError::InvalidClassCount { num_classes });
    }
    if !is_non_negative_finite(confidence_threshold) {
        return Err(DetPipeError::InvalidThreshold {
            name: "confidence_threshold",
            value: confidence_threshold,
        });
    }
    Ok(RecordLayout::new(num_classes))
}

/// Decodes every complete record in `buffer`.
///
/// A record survives when `objectness * max_class_prob` is strictly above
/// `confidence_threshold` and its pixel box lies fully inside `frame`.
/// Survivors are returned in record order.
pub fn decode(
    buffer: &[f32],
    num_classes: usize,
    confidence_threshold: f32,
    frame: FrameSize,
) -> DetPipeResult<Vec<RawCandidate>> {
    let layout = validate_decode_params(num_classes, confidence_threshold)?;
    Ok(decode_seq(buffer, layout, confidence_threshold, frame))
}

pub(crate) fn decode_seq(
    buffer: &[f32],
    layout: RecordLayout,
    confidence_threshold: f32,
    frame: FrameSize,
) -> Vec<RawCandidate> {
    let _span = trace_span!("decode", records = layout.num_records(buffer.len())).entered();

    let candidates: Vec<RawCandidate> = buffer
        .chunks_exact(layout.stride())
        .filter_map(|record| decode_record(record, layout, confidence_threshold, frame))
        .collect();

    trace_event!(
        "decode_done",
        records = layout.num_records(buffer.len()),
        candidates = candidates.len()
    );
    candidates
}
