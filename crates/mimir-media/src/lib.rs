//! Mimir Media
//!
//! Temporal aggregation pipeline for video moderation: deterministic frame
//! sampling, per-frame scoring through the `FrameClassifier` capability,
//! and threshold-policy reduction to a document-level verdict.

pub mod aggregate;
pub mod sampler;
pub mod scan;
pub mod sources;

pub use aggregate::{aggregate, aggregate_single, AggregationPolicy};
pub use sampler::{FrameSampler, SampledFrame, VideoSource};
pub use scan::{scan_video, CancelFlag};
pub use sources::{decode_image, FrameBufferSource, MjpegSource};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregate::{aggregate, aggregate_single, AggregationPolicy};
    pub use crate::sampler::{FrameSampler, SampledFrame, VideoSource};
    pub use crate::scan::{scan_video, CancelFlag};
    pub use crate::sources::{decode_image, FrameBufferSource, MjpegSource};
}
