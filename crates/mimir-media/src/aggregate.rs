//! Score aggregation
//!
//! Reduces per-frame scores to a document-level verdict. The per-frame
//! violence cut is fixed at `prob_violent > 0.5`; the document-level
//! threshold is policy, supplied by the caller.

use mimir_classifiers::FrameDistribution;
use mimir_core::{FrameScore, ImageVerdict, VideoVerdict};

/// Document-level aggregation policy
#[derive(Debug, Clone, Copy)]
pub struct AggregationPolicy {
    /// Verdict is `ratio > threshold`
    pub threshold: f32,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        // Shipping default; deployments tune this per product policy.
        Self { threshold: 0.3 }
    }
}

impl AggregationPolicy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

/// Reduce a sampled score sequence to a verdict.
///
/// The denominator is floored at 1, so zero sampled frames yield
/// `ratio = 0` and a non-violent verdict rather than a division fault.
pub fn aggregate(scores: Vec<FrameScore>, policy: AggregationPolicy) -> VideoVerdict {
    let total_sampled_frames = scores.len() as u64;
    let violent_frame_count = scores
        .iter()
        .filter(|s| s.prob_violent > 0.5)
        .count() as u64;

    let ratio = violent_frame_count as f32 / total_sampled_frames.max(1) as f32;

    VideoVerdict {
        frames: scores,
        violent_frame_count,
        total_sampled_frames,
        ratio,
        violent: ratio > policy.threshold,
    }
}

/// One-frame degenerate case for a still image
pub fn aggregate_single(dist: FrameDistribution) -> ImageVerdict {
    ImageVerdict::from_probs(dist.prob_violent, dist.prob_nonviolent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(frame_index: u64, prob_violent: f32) -> FrameScore {
        FrameScore {
            frame_index,
            prob_violent,
        }
    }

    #[test]
    fn zero_frames_is_benign() {
        let verdict = aggregate(Vec::new(), AggregationPolicy::new(0.1));
        assert_eq!(verdict.ratio, 0.0);
        assert!(!verdict.violent);
        assert_eq!(verdict.total_sampled_frames, 0);
    }

    #[test]
    fn two_of_ten_violent_at_threshold_point_one() {
        let mut scores: Vec<FrameScore> =
            (0..8).map(|i| score(i, 0.1)).collect();
        scores.push(score(8, 0.8));
        scores.push(score(9, 0.9));

        let verdict = aggregate(scores, AggregationPolicy::new(0.1));
        assert_eq!(verdict.violent_frame_count, 2);
        assert_eq!(verdict.total_sampled_frames, 10);
        assert!((verdict.ratio - 0.2).abs() < 1e-6);
        assert!(verdict.violent);
    }

    #[test]
    fn same_scores_under_higher_threshold_pass() {
        let mut scores: Vec<FrameScore> =
            (0..8).map(|i| score(i, 0.1)).collect();
        scores.push(score(8, 0.8));
        scores.push(score(9, 0.9));

        let verdict = aggregate(scores, AggregationPolicy::new(0.3));
        assert!(!verdict.violent);
    }

    #[test]
    fn per_frame_cut_is_strictly_greater_than_half() {
        let verdict = aggregate(
            vec![score(0, 0.5), score(1, 0.500001)],
            AggregationPolicy::default(),
        );
        assert_eq!(verdict.violent_frame_count, 1);
    }

    #[test]
    fn single_image_degenerates_cleanly() {
        let verdict = aggregate_single(FrameDistribution::from_violent(0.7));
        assert!(verdict.violent);
        assert!((verdict.prob_nonviolent - 0.3).abs() < 1e-6);

        let verdict = aggregate_single(FrameDistribution::from_violent(0.5));
        assert!(!verdict.violent);
    }
}
