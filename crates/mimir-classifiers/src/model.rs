//! Fitted intent model
//!
//! A nearest-centroid classifier over TF-IDF vectors. The model is an
//! immutable value: retraining fits a brand-new one, the registry swaps it
//! in, and in-flight readers keep whatever snapshot they captured.

use crate::classifier::TextClassification;
use crate::vectorizer::{sparse_dot, FittedVectorizer};
use mimir_core::{Error, Intent, LabeledExample, Result};

/// An immutable classifier model: fitted vectorizer plus one centroid per
/// label present in the training set
#[derive(Debug, Clone)]
pub struct IntentModel {
    vectorizer: FittedVectorizer,
    labels: Vec<Intent>,
    centroids: Vec<Vec<f32>>,
}

impl IntentModel {
    /// Fit a model from the given examples.
    ///
    /// Fails with `NoData` on an empty set and `InvalidLabel` when any
    /// example cannot be vectorized (empty text after trimming). The label
    /// set of the resulting model is exactly the labels present in
    /// `examples`, in first-seen order.
    pub fn fit(examples: &[LabeledExample]) -> Result<Self> {
        if examples.is_empty() {
            return Err(Error::NoData);
        }
        for example in examples {
            if example.text.trim().is_empty() {
                return Err(Error::invalid_label(format!(
                    "example for '{}' has empty text",
                    example.label
                )));
            }
        }

        let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let vectorizer = FittedVectorizer::fit(&texts);

        let mut labels: Vec<Intent> = Vec::new();
        for example in examples {
            if !labels.contains(&example.label) {
                labels.push(example.label);
            }
        }

        let vocab_size = vectorizer.vocab_size();
        let mut centroids = vec![vec![0.0f32; vocab_size]; labels.len()];
        let mut counts = vec![0usize; labels.len()];

        for example in examples {
            // Every example label was inserted into `labels` above.
            let slot = labels
                .iter()
                .position(|l| *l == example.label)
                .unwrap_or_default();
            for (index, weight) in vectorizer.transform(&example.text) {
                centroids[slot][index] += weight;
            }
            counts[slot] += 1;
        }

        for (centroid, count) in centroids.iter_mut().zip(&counts) {
            for weight in centroid.iter_mut() {
                *weight /= *count as f32;
            }
            let norm = centroid.iter().map(|w| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for weight in centroid.iter_mut() {
                    *weight /= norm;
                }
            }
        }

        Ok(Self {
            vectorizer,
            labels,
            centroids,
        })
    }

    /// Labels this model was fitted with, in fit order
    pub fn label_set(&self) -> &[Intent] {
        &self.labels
    }

    /// Predict the intent of the given text.
    ///
    /// Cosine similarity against each centroid (vectors are L2-normalized,
    /// so a plain dot product). Ties break toward the first label in fit
    /// order; text with no known tokens falls back to the first label with
    /// uniform confidence.
    pub fn predict(&self, text: &str) -> TextClassification {
        let vector = self.vectorizer.transform(text);

        let sims: Vec<f32> = self
            .centroids
            .iter()
            .map(|centroid| sparse_dot(&vector, centroid).max(0.0))
            .collect();

        let mut best = 0usize;
        for (slot, sim) in sims.iter().enumerate() {
            if *sim > sims[best] {
                best = slot;
            }
        }

        let total: f32 = sims.iter().sum();
        let confidence = if total > 0.0 {
            sims[best] / total
        } else {
            1.0 / self.labels.len() as f32
        };

        TextClassification {
            label: self.labels[best],
            confidence,
            all_scores: self.labels.iter().copied().zip(sims).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Vec<LabeledExample> {
        vec![
            LabeledExample::new("chào bạn", Intent::Greeting),
            LabeledExample::new("xin chào buổi sáng", Intent::Greeting),
            LabeledExample::new("mình bị đánh ở trường", Intent::Violence),
            LabeledExample::new("bạn ấy đánh mình", Intent::Violence),
            LabeledExample::new("cảm ơn bạn nhé", Intent::End),
        ]
    }

    #[test]
    fn fit_empty_set_is_no_data() {
        let err = IntentModel::fit(&[]).unwrap_err();
        assert!(matches!(err, Error::NoData));
    }

    #[test]
    fn fit_rejects_blank_text() {
        let examples = vec![LabeledExample::new("   ", Intent::Normal)];
        let err = IntentModel::fit(&examples).unwrap_err();
        assert!(matches!(err, Error::InvalidLabel(_)));
    }

    #[test]
    fn label_set_matches_training_labels() {
        let model = IntentModel::fit(&seed()).unwrap();
        assert_eq!(
            model.label_set(),
            &[Intent::Greeting, Intent::Violence, Intent::End]
        );
    }

    #[test]
    fn predict_returns_label_from_set() {
        let model = IntentModel::fit(&seed()).unwrap();
        let result = model.predict("mình bị đánh");
        assert!(model.label_set().contains(&result.label));
        assert_eq!(result.label, Intent::Violence);
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn single_label_model_always_predicts_it() {
        let examples = vec![
            LabeledExample::new("một", Intent::Complain),
            LabeledExample::new("hai", Intent::Complain),
        ];
        let model = IntentModel::fit(&examples).unwrap();

        for text in ["một", "hai", "something else entirely"] {
            assert_eq!(model.predict(text).label, Intent::Complain);
        }
    }

    #[test]
    fn unknown_vocabulary_falls_back_to_first_label() {
        let model = IntentModel::fit(&seed()).unwrap();
        let result = model.predict("zzz qqq www");
        assert_eq!(result.label, Intent::Greeting);
        let expected = 1.0 / model.label_set().len() as f32;
        assert!((result.confidence - expected).abs() < 1e-6);
    }

    #[test]
    fn all_scores_cover_every_label() {
        let model = IntentModel::fit(&seed()).unwrap();
        let result = model.predict("chào bạn");
        assert_eq!(result.all_scores.len(), model.label_set().len());
    }
}
