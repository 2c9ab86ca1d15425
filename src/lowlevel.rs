//! Building blocks for custom post-processing pipelines.
//!
//! These expose per-record decoding and the record layout for callers that
//! feed buffers of their own shape. Most users should prefer [`decode`],
//! [`suppress`] and [`aggregate`] or the [`Detector`] facade.
//!
//! [`decode`]: crate::decode()
//! [`suppress`]: crate::suppress()
//! [`aggregate`]: crate::aggregate()
//! [`Detector`]: crate::Detector

pub use crate::decode::{decode_record, RecordLayout, BOX_FIELDS};
pub use crate::geometry::BoundingBox;
