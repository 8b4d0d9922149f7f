use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanaError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Failed to persist progress: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for KanaError {
    fn from(error: std::io::Error) -> Self {
        KanaError::Io(Box::new(error))
    }
}

impl From<candle_core::Error> for KanaError {
    fn from(error: candle_core::Error) -> Self {
        KanaError::Inference(error.to_string())
    }
}

impl KanaError {
    /// Wrap any storage-side failure so callers see it as a persistence failure.
    pub fn persistence(context: &str, error: impl std::fmt::Display) -> Self {
        KanaError::Persistence(format!("{}: {}", context, error))
    }
}
