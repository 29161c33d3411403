//! Classifier capability traits and common types

use async_trait::async_trait;
use mimir_core::{FramePixels, Intent, Result};

/// Capability trait for text classifiers.
///
/// Implementations must be safe to call concurrently; the registry is the
/// canonical implementation, but tests inject deterministic stubs.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify the given text into an intent
    async fn classify(&self, text: &str) -> Result<TextClassification>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of text classification
#[derive(Debug, Clone)]
pub struct TextClassification {
    /// Predicted intent
    pub label: Intent,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Scores for every label the model knows, in fit order
    pub all_scores: Vec<(Intent, f32)>,
}

/// Capability trait for per-frame image classifiers.
///
/// The actual model backend is an external collaborator; the media pipeline
/// only depends on this contract. Failures are converted to
/// `ClassifierUnavailable` at the call boundary.
#[async_trait]
pub trait FrameClassifier: Send + Sync {
    /// Score one frame for violent content
    async fn score_frame(&self, frame: &FramePixels) -> Result<FrameDistribution>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Label distribution returned for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameDistribution {
    /// Probability in [0, 1] that the frame depicts violence
    pub prob_violent: f32,

    /// Probability in [0, 1] that the frame does not
    pub prob_nonviolent: f32,
}

impl FrameDistribution {
    /// Build a distribution from the violent probability
    pub fn from_violent(prob_violent: f32) -> Self {
        Self {
            prob_violent,
            prob_nonviolent: 1.0 - prob_violent,
        }
    }

    /// Per-frame violence cut, fixed independently of any document threshold
    pub fn is_violent(&self) -> bool {
        self.prob_violent > 0.5
    }
}
