//! Mimir Core
//!
//! Core types and error handling shared across Mimir components.
//!
//! This crate provides:
//! - The closed intent label set and training/verdict types
//! - Frame and score types for the media pipeline
//! - The error taxonomy and result alias

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    FramePixels, FrameScore, ImageVerdict, Intent, LabeledExample, VideoVerdict,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        FramePixels, FrameScore, ImageVerdict, Intent, LabeledExample, VideoVerdict,
    };
}
