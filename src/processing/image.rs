use crate::utils::CardError;
use image::{GrayImage, ImageFormat};
use imageproc::filter::median_filter;
use std::path::Path;
use tempfile::NamedTempFile;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Grayscale, denoised and contrast-stretched copy of the image in a
    /// temporary PNG, removed when the returned handle drops.
    pub fn prepare_for_ocr(image_path: &Path) -> Result<NamedTempFile, CardError> {
        let img = image::open(image_path).map_err(|e| {
            CardError::ImageProcessingError(format!(
                "Failed to open {}: {}",
                image_path.display(),
                e
            ))
        })?;
        let gray = img.to_luma8();
        // Speckle from phone cameras breaks up thin glyphs
        let denoised = median_filter(&gray, 1, 1);
        let enhanced = Self::enhance_contrast(&denoised);

        let temp_file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| CardError::ImageProcessingError(e.to_string()))?;
        enhanced
            .save_with_format(temp_file.path(), ImageFormat::Png)
            .map_err(|e| CardError::ImageProcessingError(e.to_string()))?;
        Ok(temp_file)
    }

    /// Linear stretch of the grey levels onto the full 0..=255 range.
    pub fn enhance_contrast(img: &GrayImage) -> GrayImage {
        let (min, max) = img
            .pixels()
            .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
        if max <= min {
            return img.clone();
        }
        let range = (max - min) as u32;
        let mut enhanced = img.clone();
        for pixel in enhanced.pixels_mut() {
            pixel[0] = ((pixel[0] - min) as u32 * 255 / range) as u8;
        }
        enhanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn stretches_narrow_range() {
        let mut img = GrayImage::from_pixel(2, 1, Luma([100]));
        img.put_pixel(1, 0, Luma([150]));
        let out = ImageProcessor::enhance_contrast(&img);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn flat_image_is_unchanged() {
        let img = GrayImage::from_pixel(3, 3, Luma([42]));
        assert_eq!(ImageProcessor::enhance_contrast(&img), img);
    }

    #[test]
    fn prepares_png_copy() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("card.png");
        GrayImage::from_pixel(4, 4, Luma([90])).save(&source).unwrap();
        let prepared = ImageProcessor::prepare_for_ocr(&source).unwrap();
        assert!(image::open(prepared.path()).is_ok());
    }

    #[test]
    fn unreadable_image_is_processing_error() {
        let err = ImageProcessor::prepare_for_ocr(Path::new("/nonexistent/card.png")).unwrap_err();
        assert!(matches!(err, CardError::ImageProcessingError(_)));
    }
}
