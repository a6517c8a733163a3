use crate::config::Config;
use crate::models::{BatchItem, DocumentRecord, DocumentType, OcrOutput};
use crate::processing::{FieldExtractor, ImageProcessor, OcrEngine, TesseractEngine};
use crate::utils::VerifierError;
use crate::validation;
use image::DynamicImage;
use log::{info, warn};
use std::path::Path;

pub struct DocumentVerifier {
    engine: Box<dyn OcrEngine>,
    extractor: FieldExtractor,
    preprocess: bool,
}

impl DocumentVerifier {
    /// Verifier backed by Tesseract, configured from `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_engine(config, Box::new(TesseractEngine::new(config)))
    }

    pub fn with_engine(config: &Config, engine: Box<dyn OcrEngine>) -> Self {
        DocumentVerifier {
            engine,
            extractor: FieldExtractor::new().with_gender_cutoff(config.gender_cutoff),
            preprocess: config.preprocess,
        }
    }

    // Decode, OCR and extract a single image file
    pub fn verify_path(&self, path: &Path, kind: DocumentType) -> Result<DocumentRecord, VerifierError> {
        let image = ImageProcessor::load(path)?;
        self.verify_image(&image, &path.display().to_string(), kind)
    }

    pub fn verify_image(
        &self,
        image: &DynamicImage,
        source: &str,
        kind: DocumentType,
    ) -> Result<DocumentRecord, VerifierError> {
        let ocr = if self.preprocess {
            self.engine.recognize(&ImageProcessor::preprocess(image))?
        } else {
            self.engine.recognize(image)?
        };
        Ok(self.verify_ocr(ocr, source, kind))
    }

    /// Extraction and validation only, for OCR output obtained elsewhere.
    pub fn verify_ocr(&self, ocr: OcrOutput, source: &str, kind: DocumentType) -> DocumentRecord {
        let result = self.extractor.extract(kind, &ocr);
        let validation = validation::validate(&result);
        info!(
            "{}: {} card {}",
            source,
            kind,
            if validation.is_valid { "verified" } else { "not verified" }
        );
        DocumentRecord {
            source: source.to_string(),
            result,
            validation,
            raw_text: ocr.text,
        }
    }

    /// Processes every path in order. Per-document failures become
    /// [`BatchItem::Failed`]; anything else stops the batch.
    pub fn verify_batch<P: AsRef<Path>>(
        &self,
        paths: &[P],
        kind: DocumentType,
    ) -> Result<Vec<BatchItem>, VerifierError> {
        let mut items = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            match self.verify_path(path, kind) {
                Ok(record) => items.push(BatchItem::Processed(record)),
                Err(e) if e.is_per_document() => {
                    warn!("Skipping {}: {}", path.display(), e);
                    items.push(BatchItem::Failed {
                        source: path.display().to_string(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(items)
    }
}
