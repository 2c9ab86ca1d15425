//! Record-parallel decoding (feature-gated).
//!
//! Records are independent, so they are split across the rayon pool; the
//! indexed collect keeps the output identical to the sequential path.

use crate::candidate::RawCandidate;
use crate::decode::record::{decode_record, RecordLayout};
use crate::geometry::FrameSize;
use crate::trace::{trace_event, trace_span};
use rayon::prelude::*;

/// Records per rayon task; keeps small tensors from being over-split.
const MIN_RECORDS_PER_TASK: usize = 256;

pub(crate) fn decode_par(
    buffer: &[f32],
    layout: RecordLayout,
    confidence_threshold: f32,
    frame: FrameSize,
) -> Vec<RawCandidate> {
    let _span = trace_span!("decode_par", records = layout.num_records(buffer.len())).entered();

    let candidates: Vec<RawCandidate> = buffer
        .par_chunks_exact(layout.stride())
        .with_min_len(MIN_RECORDS_PER_TASK)
        .filter_map(|record| decode_record(record, layout, confidence_threshold, frame))
        .collect();

    trace_event!(
        "decode_done",
        records = layout.num_records(buffer.len()),
        candidates = candidates.len()
    );
    candidates
}
