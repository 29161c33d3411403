//! Shared application state

use crate::responses::ResponsePool;
use mimir_classifiers::{FrameClassifier, HeuristicFrameClassifier, IntentRegistry, TrainingStore};
use mimir_core::Result;
use mimir_media::AggregationPolicy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

/// Server configuration assembled from the CLI
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Document-level violence threshold for video verdicts
    pub threshold: f32,

    /// Path of the training-set snapshot file
    pub train_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            train_file: PathBuf::from("./train_data.jsonl"),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Hot-swappable text intent model
    pub registry: Arc<IntentRegistry>,

    /// Injected frame classifier capability
    pub frame_classifier: Arc<dyn FrameClassifier>,

    /// Chat reply pools
    pub responses: Arc<ResponsePool>,

    /// Video aggregation policy
    pub policy: AggregationPolicy,

    /// RNG for reply selection
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Build production state: store-backed registry, heuristic frame
    /// classifier fallback, built-in reply pools.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let registry = IntentRegistry::with_store(TrainingStore::new(&config.train_file))?;
        Ok(Self::from_parts(
            Arc::new(registry),
            Arc::new(HeuristicFrameClassifier::new()),
            Arc::new(ResponsePool::builtin()?),
            AggregationPolicy::new(config.threshold),
            StdRng::from_entropy(),
        ))
    }

    /// Assemble state from explicit parts (tests inject stubs and seeds here)
    pub fn from_parts(
        registry: Arc<IntentRegistry>,
        frame_classifier: Arc<dyn FrameClassifier>,
        responses: Arc<ResponsePool>,
        policy: AggregationPolicy,
        rng: StdRng,
    ) -> Self {
        Self {
            registry,
            frame_classifier,
            responses,
            policy,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}
