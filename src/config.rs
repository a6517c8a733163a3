use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::processing::extractors::DEFAULT_GENDER_CUTOFF;
use crate::utils::VerifierError;

const MAX_PAGE_SEG_MODE: u8 = 13;

/// Which OCR output the extractor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrMode {
    /// Plain text split on whitespace
    #[default]
    Plain,
    /// Per-word TSV rows with geometry and confidence
    Detailed,
}

/// Runtime settings. Every field has a default so a config file may be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tesseract data directory; `None` lets Tesseract use its own default
    pub tessdata_dir: Option<PathBuf>,
    pub language: String,
    pub ocr_mode: OcrMode,
    pub page_seg_mode: u8,
    /// Grayscale and contrast-enhance images before OCR
    pub preprocess: bool,
    pub report_dir: PathBuf,
    pub gender_cutoff: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tessdata_dir: None,
            language: "eng".to_string(),
            ocr_mode: OcrMode::Plain,
            page_seg_mode: 3,
            preprocess: false,
            report_dir: PathBuf::from("."),
            gender_cutoff: DEFAULT_GENDER_CUTOFF,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, VerifierError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            VerifierError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, VerifierError> {
        let config: Config = serde_json::from_str(contents)
            .map_err(|e| VerifierError::Config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VerifierError> {
        if self.language.trim().is_empty() {
            return Err(VerifierError::Config("language must not be empty".to_string()));
        }
        if self.page_seg_mode > MAX_PAGE_SEG_MODE {
            return Err(VerifierError::Config(format!(
                "page_seg_mode must be 0-{}, got {}",
                MAX_PAGE_SEG_MODE, self.page_seg_mode
            )));
        }
        if !(self.gender_cutoff > 0.0 && self.gender_cutoff <= 1.0) {
            return Err(VerifierError::Config(format!(
                "gender_cutoff must be in (0, 1], got {}",
                self.gender_cutoff
            )));
        }
        Ok(())
    }
}
