pub mod annotate;
pub mod correction;
pub mod extractors;
pub mod image;
pub mod ocr;
pub mod similarity;

pub use extractors::FieldExtractor;
pub use image::ImageProcessor;
pub use ocr::{OcrEngine, TesseractEngine};
