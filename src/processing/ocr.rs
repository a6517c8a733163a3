use image::DynamicImage;
use log::{debug, info};
use tesseract::{PageSegMode, Tesseract};

use crate::config::{Config, OcrMode};
use crate::models::{BoundingBox, OcrOutput, Token};
use crate::processing::ImageProcessor;
use crate::utils::VerifierError;

// TSV row level for individual words
const TSV_WORD_LEVEL: u32 = 5;
const TSV_COLUMNS: usize = 12;

/// Anything that can turn a raster image into words.
pub trait OcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrOutput, VerifierError>;
}

/// Tesseract-backed engine configured from [`Config`].
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    datapath: Option<String>,
    language: String,
    mode: OcrMode,
    page_seg_mode: u8,
}

impl TesseractEngine {
    pub fn new(config: &Config) -> Self {
        TesseractEngine {
            datapath: config
                .tessdata_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            language: config.language.clone(),
            mode: config.ocr_mode,
            page_seg_mode: config.page_seg_mode,
        }
    }

    pub fn with_mode(mut self, mode: OcrMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_page_seg_mode(mut self, psm: u8) -> Self {
        self.page_seg_mode = psm;
        self
    }

    fn run(&self, image: &DynamicImage) -> Result<OcrOutput, VerifierError> {
        // Tesseract reads from disk; the temp file lives until this call returns
        let temp_file = ImageProcessor::save_to_temp_file(image)?;
        let path_str = temp_file
            .path()
            .to_str()
            .ok_or_else(|| VerifierError::Ocr("Could not convert path to string".to_string()))?;

        let mut tess = Tesseract::new(self.datapath.as_deref(), Some(self.language.as_str()))
            .map_err(|e| VerifierError::Ocr(format!("Failed to initialize Tesseract: {}", e)))?;
        tess.set_page_seg_mode(page_seg_mode(self.page_seg_mode));
        let mut tess = tess
            .set_image(path_str)
            .map_err(|e| VerifierError::Ocr(format!("Failed to set image: {}", e)))?;

        let output = match self.mode {
            OcrMode::Plain => {
                let text = tess
                    .get_text()
                    .map_err(|e| VerifierError::Ocr(format!("Failed to extract text: {}", e)))?;
                OcrOutput::from_text(text)
            }
            OcrMode::Detailed => {
                let tsv = tess
                    .get_tsv_text(0)
                    .map_err(|e| VerifierError::Ocr(format!("Failed to extract words: {}", e)))?;
                OcrOutput::from_tokens(parse_tsv(&tsv))
            }
        };

        info!("OCR produced {} words", output.tokens.len());
        debug!("OCR text:\n{}", output.text);
        Ok(output)
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrOutput, VerifierError> {
        self.run(image)
    }
}

/// Word rows of Tesseract TSV output. Header lines, non-word levels and
/// empty words are dropped.
pub fn parse_tsv(tsv: &str) -> Vec<Token> {
    tsv.lines().filter_map(parse_tsv_row).collect()
}

fn parse_tsv_row(line: &str) -> Option<Token> {
    let fields: Vec<&str> = line.splitn(TSV_COLUMNS, '\t').collect();
    if fields.len() < TSV_COLUMNS {
        return None;
    }
    let level = fields[0].trim().parse::<u32>().ok()?;
    if level != TSV_WORD_LEVEL {
        return None;
    }
    let text = fields[11].trim();
    if text.is_empty() {
        return None;
    }

    let number = |i: usize| fields[i].trim().parse::<i64>().ok().map(|v| v.max(0) as u32);
    let bbox = BoundingBox {
        left: number(6)?,
        top: number(7)?,
        width: number(8)?,
        height: number(9)?,
    };
    let confidence = fields[10].trim().parse::<f32>().ok()?;
    Some(Token::with_geometry(text, bbox, confidence.clamp(0.0, 100.0)))
}

// Numeric page segmentation modes as accepted by the tesseract CLI
fn page_seg_mode(psm: u8) -> PageSegMode {
    match psm {
        0 => PageSegMode::PsmOsdOnly,
        1 => PageSegMode::PsmAutoOsd,
        2 => PageSegMode::PsmAutoOnly,
        3 => PageSegMode::PsmAuto,
        4 => PageSegMode::PsmSingleColumn,
        5 => PageSegMode::PsmSingleBlockVertText,
        6 => PageSegMode::PsmSingleBlock,
        7 => PageSegMode::PsmSingleLine,
        8 => PageSegMode::PsmSingleWord,
        9 => PageSegMode::PsmCircleWord,
        10 => PageSegMode::PsmSingleChar,
        11 => PageSegMode::PsmSparseText,
        12 => PageSegMode::PsmSparseTextOsd,
        13 => PageSegMode::PsmRawLine,
        _ => PageSegMode::PsmAuto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TSV: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t640\t400\t-1\t
4\t1\t1\t1\t1\t0\t40\t30\t300\t20\t-1\t
5\t1\t1\t1\t1\t1\t40\t30\t60\t20\t96.51\tName
5\t1\t1\t1\t1\t2\t104\t30\t6\t20\t91.0\t:
5\t1\t1\t1\t1\t3\t120\t30\t70\t20\t88.25\tAmit
5\t1\t1\t1\t1\t4\t200\t30\t10\t20\t-1\t
5\t1\t2\t1\t1\t1\t40\t80\t52\t22\t95\t2345";

    #[test]
    fn test_parse_tsv_keeps_words_only() {
        let tokens = parse_tsv(SAMPLE_TSV);
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Name", ":", "Amit", "2345"]);
    }

    #[test]
    fn test_parse_tsv_geometry_and_confidence() {
        let tokens = parse_tsv(SAMPLE_TSV);
        let amit = &tokens[2];
        assert_eq!(
            amit.bbox,
            Some(BoundingBox {
                left: 120,
                top: 30,
                width: 70,
                height: 20
            })
        );
        assert_eq!(amit.confidence, Some(88.25));
    }

    #[test]
    fn test_parse_tsv_ignores_malformed_rows() {
        assert!(parse_tsv("5\t1\t1\n\ngarbage").is_empty());
        assert!(parse_tsv("5\t1\t1\t1\t1\t1\tx\t30\t60\t20\t96\tName").is_empty());
    }

    #[test]
    fn test_detailed_text_joins_words() {
        let output = OcrOutput::from_tokens(parse_tsv(SAMPLE_TSV));
        assert_eq!(output.text, "Name : Amit 2345");
    }

    #[test]
    fn test_page_seg_mode_fallback() {
        assert!(matches!(page_seg_mode(4), PageSegMode::PsmSingleColumn));
        assert!(matches!(page_seg_mode(42), PageSegMode::PsmAuto));
    }
}
