//! Mimir Classifiers
//!
//! Text intent classification with an online-retrainable model registry,
//! plus the frame-classifier capability seam for media scoring.
//!
//! The registry favors a read-mostly design: readers take an `Arc` snapshot
//! with no blocking, writers fit a complete replacement model off to the
//! side and publish it with a single atomic pointer update.

pub mod classifier;
pub mod heuristic;
pub mod model;
pub mod registry;
pub mod store;
pub mod vectorizer;

pub use classifier::{FrameClassifier, FrameDistribution, TextClassification, TextClassifier};
pub use heuristic::HeuristicFrameClassifier;
pub use model::IntentModel;
pub use registry::IntentRegistry;
pub use store::TrainingStore;
pub use vectorizer::{FittedVectorizer, SparseVector};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{
        FrameClassifier, FrameDistribution, TextClassification, TextClassifier,
    };
    pub use crate::heuristic::HeuristicFrameClassifier;
    pub use crate::model::IntentModel;
    pub use crate::registry::IntentRegistry;
    pub use crate::store::TrainingStore;
}
