use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("could not read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VerifierError {
    /// True for failures that concern a single document rather than the run.
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            VerifierError::ImageRead { .. } | VerifierError::ImageEncode(_) | VerifierError::Ocr(_)
        )
    }
}
