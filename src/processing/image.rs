use crate::utils::VerifierError;
use image::{DynamicImage, GrayImage, ImageFormat};
use std::path::Path;
use tempfile::NamedTempFile;

pub struct ImageProcessor;

impl ImageProcessor {
    pub fn load(image_path: &Path) -> Result<DynamicImage, VerifierError> {
        image::open(image_path).map_err(|e| VerifierError::ImageRead {
            path: image_path.to_path_buf(),
            source: e,
        })
    }

    /// Grayscale plus a fixed contrast push away from mid-gray.
    pub fn preprocess(img: &DynamicImage) -> DynamicImage {
        let gray = img.to_luma8();
        DynamicImage::ImageLuma8(Self::enhance_contrast(&gray))
    }

    fn enhance_contrast(img: &GrayImage) -> GrayImage {
        let mut enhanced = img.clone();
        for pixel in enhanced.pixels_mut() {
            let value = pixel[0];
            pixel[0] = if value < 128 {
                value.saturating_sub(20)
            } else {
                value.saturating_add(20)
            };
        }
        enhanced
    }

    /// Writes the image as PNG to a temp file that is removed on drop.
    pub fn save_to_temp_file(img: &DynamicImage) -> Result<NamedTempFile, VerifierError> {
        Self::save_to_temp_file_in(img, &std::env::temp_dir())
    }

    // Errors map to ImageEncode so only the current document fails
    pub fn save_to_temp_file_in(img: &DynamicImage, dir: &Path) -> Result<NamedTempFile, VerifierError> {
        let temp_file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile_in(dir)
            .map_err(|e| {
                VerifierError::ImageEncode(format!(
                    "Failed to create temp file in {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        img.save_with_format(temp_file.path(), ImageFormat::Png)
            .map_err(|e| VerifierError::ImageEncode(e.to_string()))?;
        Ok(temp_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};
    use std::io::Write;

    #[test]
    fn test_contrast_pushes_away_from_midpoint() {
        let mut img = GrayImage::new(3, 1);
        img.put_pixel(0, 0, Luma([10]));
        img.put_pixel(1, 0, Luma([127]));
        img.put_pixel(2, 0, Luma([250]));
        let processed = ImageProcessor::preprocess(&DynamicImage::ImageLuma8(img)).to_luma8();
        assert_eq!(processed.get_pixel(0, 0)[0], 0);
        assert_eq!(processed.get_pixel(1, 0)[0], 107);
        assert_eq!(processed.get_pixel(2, 0)[0], 255);
    }

    #[test]
    fn test_temp_file_round_trips_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 5, Rgb([200, 10, 10])));
        let temp = ImageProcessor::save_to_temp_file(&img).unwrap();
        let loaded = ImageProcessor::load(temp.path()).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 5));
    }

    #[test]
    fn test_undecodable_file_is_image_read_error() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"definitely not a png").unwrap();
        let err = ImageProcessor::load(file.path()).unwrap_err();
        assert!(matches!(err, VerifierError::ImageRead { .. }));
        assert!(err.to_string().starts_with("could not read image"));
    }

    #[test]
    fn test_temp_file_failure_is_per_document() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let err = ImageProcessor::save_to_temp_file_in(&img, Path::new("/nonexistent/scratch"))
            .unwrap_err();
        assert!(matches!(err, VerifierError::ImageEncode(_)));
        assert!(err.is_per_document());
    }

    #[test]
    fn test_missing_file_is_image_read_error() {
        let err = ImageProcessor::load(Path::new("/nonexistent/card.png")).unwrap_err();
        assert!(matches!(err, VerifierError::ImageRead { .. }));
    }
}
