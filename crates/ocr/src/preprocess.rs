use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use payscan_core::OcrConfig;
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Longest side allowed before the image is scaled down.
    pub max_dimension: u32,
    pub contrast_stretch: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self::from(&OcrConfig::default())
    }
}

impl From<&OcrConfig> for PreprocessOptions {
    fn from(config: &OcrConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            contrast_stretch: config.contrast_stretch,
        }
    }
}

/// Decode screenshot bytes (PNG / JPEG / WEBP / …), normalize, and return PNG
/// bytes ready for the OCR backend.
pub fn prepare_for_ocr_from_bytes(
    data: &[u8],
    options: &PreprocessOptions,
) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    encode_as_png(normalize(img, options))
}

fn normalize(img: DynamicImage, options: &PreprocessOptions) -> DynamicImage {
    let img = downscale(img, options.max_dimension);
    if options.contrast_stretch {
        DynamicImage::ImageLuma8(contrast_stretch(img.to_luma8()))
    } else {
        img
    }
}

fn downscale(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if max_dimension > 0 && (img.width() > max_dimension || img.height() > max_dimension) {
        img.resize(max_dimension, max_dimension, image::imageops::FilterType::Lanczos3)
    } else {
        img
    }
}

/// Map the darkest pixel to 0 and the brightest to 255. Dark-mode payment
/// screens come out of this with usable contrast.
fn contrast_stretch(gray: GrayImage) -> GrayImage {
    let (min_px, max_px) = gray
        .pixels()
        .fold((255u8, 0u8), |(mn, mx), p| (mn.min(p[0]), mx.max(p[0])));

    if max_px <= min_px {
        return gray;
    }

    let range = (max_px - min_px) as u32;
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0];
        Luma([((p - min_px) as u32 * 255 / range) as u8])
    })
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
