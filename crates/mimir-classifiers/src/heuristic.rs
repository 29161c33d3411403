//! Heuristic frame classifier (fallback)
//!
//! Pixel-statistics baseline used when no external model capability is
//! wired in. Deterministic, so tests and the demo deployment behave
//! reproducibly; a real ViT-style backend plugs in through the same
//! `FrameClassifier` trait.

use crate::classifier::{FrameClassifier, FrameDistribution};
use async_trait::async_trait;
use mimir_core::{FramePixels, Result};

pub struct HeuristicFrameClassifier {
    name: String,
}

impl HeuristicFrameClassifier {
    pub fn new() -> Self {
        Self {
            name: "frame-heuristic".to_string(),
        }
    }

    /// Red-channel dominance score in [0, 1].
    ///
    /// Keeps confidence bounded for a statistics-only approach.
    fn red_dominance(&self, frame: &FramePixels) -> f32 {
        let pixel_count = frame.rgb.len() / 3;
        if pixel_count == 0 {
            return 0.0;
        }

        let mut excess = 0.0f32;
        for pixel in frame.rgb.chunks_exact(3) {
            let r = pixel[0] as f32;
            let g = pixel[1] as f32;
            let b = pixel[2] as f32;
            excess += (r - (g + b) / 2.0).max(0.0);
        }

        let mean = excess / pixel_count as f32 / 255.0;
        (mean * 4.0).clamp(0.0, 0.95)
    }
}

impl Default for HeuristicFrameClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameClassifier for HeuristicFrameClassifier {
    async fn score_frame(&self, frame: &FramePixels) -> Result<FrameDistribution> {
        Ok(FrameDistribution::from_violent(self.red_dominance(frame)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> FramePixels {
        let mut buf = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            buf.extend_from_slice(&rgb);
        }
        FramePixels::new(width, height, buf).unwrap()
    }

    #[tokio::test]
    async fn red_frame_scores_high() {
        let classifier = HeuristicFrameClassifier::new();
        let dist = classifier
            .score_frame(&solid(8, 8, [255, 0, 0]))
            .await
            .unwrap();
        assert!(dist.prob_violent > 0.5);
        assert!(dist.is_violent());
    }

    #[tokio::test]
    async fn gray_frame_scores_zero() {
        let classifier = HeuristicFrameClassifier::new();
        let dist = classifier
            .score_frame(&solid(8, 8, [120, 120, 120]))
            .await
            .unwrap();
        assert_eq!(dist.prob_violent, 0.0);
        assert!(!dist.is_violent());
    }

    #[tokio::test]
    async fn scoring_is_deterministic() {
        let classifier = HeuristicFrameClassifier::new();
        let frame = solid(4, 4, [200, 30, 10]);
        let a = classifier.score_frame(&frame).await.unwrap();
        let b = classifier.score_frame(&frame).await.unwrap();
        assert_eq!(a.prob_violent, b.prob_violent);
    }
}
