//! Hot-swappable intent model registry
//!
//! Read-mostly discipline: classification captures an `Arc` snapshot of the
//! active model under a read lock scoped to the pointer copy, then predicts
//! with no lock held. Retraining fits a complete replacement off to the
//! side and publishes it with a single pointer store, so overlapping reads
//! see either the old model or the new one, never a mixture.

use crate::classifier::{TextClassification, TextClassifier};
use crate::model::IntentModel;
use crate::store::TrainingStore;
use async_trait::async_trait;
use mimir_core::{Error, Intent, LabeledExample, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Registry holding the currently active text classifier
pub struct IntentRegistry {
    active: RwLock<Arc<IntentModel>>,
    store: Option<TrainingStore>,
}

impl IntentRegistry {
    /// Create a registry fitted from the given seed examples
    pub fn new(seed: &[LabeledExample]) -> Result<Self> {
        let model = IntentModel::fit(seed)?;
        Ok(Self {
            active: RwLock::new(Arc::new(model)),
            store: None,
        })
    }

    /// Create a registry backed by a training store.
    ///
    /// Loads the persisted set when present; falls back to the built-in
    /// default seed otherwise (mirrors first boot).
    pub fn with_store(store: TrainingStore) -> Result<Self> {
        let persisted = match store.load() {
            Ok(examples) => examples,
            Err(e) => {
                warn!(error = %e, "failed to load persisted training set, using defaults");
                Vec::new()
            }
        };

        let examples = if persisted.is_empty() {
            info!("no persisted training set, fitting from default seed");
            Self::default_seed()
        } else {
            info!(count = persisted.len(), "fitting from persisted training set");
            persisted
        };

        let model = IntentModel::fit(&examples)?;
        Ok(Self {
            active: RwLock::new(Arc::new(model)),
            store: Some(store),
        })
    }

    /// Built-in seed set covering every intent, used on first boot
    pub fn default_seed() -> Vec<LabeledExample> {
        vec![
            LabeledExample::new("Chào bạn", Intent::Greeting),
            LabeledExample::new("Xin chào Mimir", Intent::Greeting),
            LabeledExample::new("Hôm nay mình đi học bình thường", Intent::Normal),
            LabeledExample::new("Mình vừa ăn trưa xong", Intent::Normal),
            LabeledExample::new("Mình bị đánh", Intent::Violence),
            LabeledExample::new("Bạn ấy đánh mình ở trường", Intent::Violence),
            LabeledExample::new("Mình thấy mệt mỏi quá", Intent::Complain),
            LabeledExample::new("Áp lực học hành nhiều quá", Intent::Complain),
            LabeledExample::new("Bạn giúp mình với được không", Intent::AskHelp),
            LabeledExample::new("Mình cần trợ giúp", Intent::AskHelp),
            LabeledExample::new("Cảm ơn bạn", Intent::End),
            LabeledExample::new("Tạm biệt nhé", Intent::End),
        ]
    }

    /// Capture an immutable snapshot of the active model
    pub fn snapshot(&self) -> Arc<IntentModel> {
        Arc::clone(&self.active.read())
    }

    /// Classify text with the active model.
    ///
    /// Empty-after-trimming text fails with `EmptyInput` before the
    /// vectorizer is touched. Safe to call concurrently with `retrain`.
    pub fn classify(&self, text: &str) -> Result<TextClassification> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        let model = self.snapshot();
        Ok(model.predict(text))
    }

    /// Fit a brand-new model from `examples` and atomically swap it in.
    ///
    /// Validation and fitting happen entirely outside the lock; on any
    /// error the registry is left unchanged. Persisting the training set is
    /// a best-effort side channel and never fails the swap.
    pub fn retrain(&self, examples: &[LabeledExample]) -> Result<()> {
        let model = Arc::new(IntentModel::fit(examples)?);
        let label_count = model.label_set().len();

        *self.active.write() = model;
        info!(
            examples = examples.len(),
            labels = label_count,
            "published retrained model"
        );

        if let Some(store) = &self.store {
            if let Err(e) = store.replace(examples) {
                warn!(error = %e, "failed to persist training set; in-memory model is live");
            }
        }

        Ok(())
    }
}

#[async_trait]
impl TextClassifier for IntentRegistry {
    async fn classify(&self, text: &str) -> Result<TextClassification> {
        IntentRegistry::classify(self, text)
    }

    fn name(&self) -> &str {
        "intent-registry"
    }
}
