//! Error types for Mimir

/// Result type alias using Mimir's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Mimir operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied no usable text (empty after trimming)
    #[error("empty input")]
    EmptyInput,

    /// A retrain request carried no examples
    #[error("no training data provided")]
    NoData,

    /// A training example carried a label outside the closed label set,
    /// or was otherwise unfit for vectorization
    #[error("invalid label: {0}")]
    InvalidLabel(String),

    /// A media source could not be opened or demuxed at all
    #[error("unreadable source: {0}")]
    UnreadableSource(String),

    /// The external classifier capability failed or is down
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new invalid-label error
    pub fn invalid_label(msg: impl Into<String>) -> Self {
        Self::InvalidLabel(msg.into())
    }

    /// Create a new unreadable-source error
    pub fn unreadable_source(msg: impl Into<String>) -> Self {
        Self::UnreadableSource(msg.into())
    }

    /// Create a new classifier-unavailable error
    pub fn classifier_unavailable(msg: impl Into<String>) -> Self {
        Self::ClassifierUnavailable(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
