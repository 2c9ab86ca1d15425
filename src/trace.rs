//! Stage spans and counters for the detection pipeline.
//!
//! Spans, each with the size of its input as a field:
//!
//! - `decode` / `decode_par` (`records`)
//! - `suppress` (`candidates`)
//! - `aggregate` (`detections`)
//! - `detect` (`len`, `parallel`)
//! - `run_batch` (`inputs`)
//!
//! Each stage closes with an event that reports what it kept:
//! `decode_done`, `suppress_done`, `aggregate_done` and `detect_done`.
//!
//! With the `tracing` feature these forward to `tracing` at info level.
//! Without it `trace_span!` yields a `NoopSpan` and `trace_event!` only
//! evaluates its counters.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($stage:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($stage $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($stage:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

// Every stage event carries at least one counter.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($event:expr, $($counter:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $event, $($counter = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($event:expr, $($counter:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Guard returned by `trace_span!` when stage tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
