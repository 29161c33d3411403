//! Video scan driver
//!
//! Drives sampler, frame classifier, and aggregator for one video. Frames
//! are scored strictly in decode order; scans of different videos are
//! independent and share only the read-only classifier reference.

use crate::aggregate::{aggregate, AggregationPolicy};
use crate::sampler::{FrameSampler, VideoSource};
use mimir_classifiers::FrameClassifier;
use mimir_core::{Error, FrameScore, Result, VideoVerdict};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Best-effort cancellation flag for a long-running scan
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request early termination
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scan one video: sample frames, score each, aggregate to a verdict.
///
/// Classifier failures are caught at this boundary and surfaced as
/// `ClassifierUnavailable`; no partial verdict is returned on error. A
/// cancelled scan is not an error: it returns the verdict over the frames
/// scored so far.
pub async fn scan_video<S: VideoSource>(
    source: S,
    classifier: &dyn FrameClassifier,
    policy: AggregationPolicy,
    cancel: Option<&CancelFlag>,
) -> Result<VideoVerdict> {
    let mut sampler = FrameSampler::new(source);
    let mut scores: Vec<FrameScore> = Vec::new();

    loop {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            debug!(scored = scores.len(), "scan cancelled, aggregating partial scores");
            break;
        }

        let Some(frame) = sampler.next_sampled()? else {
            break;
        };

        let dist = classifier
            .score_frame(&frame.pixels)
            .await
            .map_err(|e| match e {
                Error::ClassifierUnavailable(_) => e,
                other => Error::classifier_unavailable(other.to_string()),
            })?;

        scores.push(FrameScore {
            frame_index: frame.index,
            prob_violent: dist.prob_violent,
        });
    }

    Ok(aggregate(scores, policy))
}
