/// Image preprocessing for the disease classifier.
///
/// Decodes uploaded bytes (PNG/JPEG/BMP/GIF), converts any color mode to RGB,
/// resizes with a bilinear filter and scales pixels to [0, 1].
use image::imageops::FilterType;

use crate::error::{PipelineError, Result};

/// Three-channel image flattened as R, G, B, R, G, B, ... in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f64>,
}

impl ImageTensor {
    pub const CHANNELS: usize = 3;

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Decodes `bytes` and produces a `width × height` RGB tensor in [0, 1].
///
/// Fails with `InvalidImage` when the format is not recognized, decoding
/// fails (including truncated files), or the decoded buffer is unusable.
pub fn normalize_image(bytes: &[u8], width: u32, height: u32) -> Result<ImageTensor> {
    if bytes.is_empty() {
        return Err(PipelineError::InvalidImage("empty upload".into()));
    }
    let format = image::guess_format(bytes)
        .map_err(|e| PipelineError::InvalidImage(format!("unrecognized format: {}", e)))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PipelineError::InvalidImage(e.to_string()))?;

    // Integrity check on what the decoder handed back.
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    if w == 0 || h == 0 || rgb.as_raw().len() != w as usize * h as usize * ImageTensor::CHANNELS {
        return Err(PipelineError::InvalidImage(format!("decoded buffer is inconsistent ({}x{})", w, h)));
    }

    let resized = image::imageops::resize(&rgb, width, height, FilterType::Triangle);
    let data = resized
        .pixels()
        .flat_map(|p| p.0.iter().map(|&c| c as f64 / 255.0))
        .collect();
    Ok(ImageTensor { width, height, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png).unwrap();
        buf
    }

    #[test]
    fn output_shape_and_range() {
        let img = RgbImage::from_fn(40, 30, |x, y| Rgb([(x * 6) as u8, (y * 8) as u8, 255]));
        let tensor = normalize_image(&encode(DynamicImage::ImageRgb8(img)), 8, 8).unwrap();
        assert_eq!(tensor.len(), 8 * 8 * 3);
        assert!(tensor.data.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn grayscale_is_expanded_to_three_channels() {
        let img = GrayImage::from_pixel(5, 5, Luma([51]));
        let tensor = normalize_image(&encode(DynamicImage::ImageLuma8(img)), 2, 2).unwrap();
        assert_eq!(tensor.len(), 12);
        for v in &tensor.data {
            assert!((v - 0.2).abs() < 1e-9);
        }
    }

    #[test]
    fn same_bytes_give_same_tensor() {
        let img = RgbImage::from_fn(17, 11, |x, y| Rgb([x as u8 * 13, y as u8 * 7, 99]));
        let bytes = encode(DynamicImage::ImageRgb8(img));
        assert_eq!(normalize_image(&bytes, 6, 6).unwrap(), normalize_image(&bytes, 6, 6).unwrap());
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        let err = normalize_image(b"definitely not an image", 4, 4).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImage(_)));
    }

    #[test]
    fn truncated_png_is_rejected() {
        let img = RgbImage::from_pixel(64, 64, Rgb([10, 200, 30]));
        let bytes = encode(DynamicImage::ImageRgb8(img));
        let err = normalize_image(&bytes[..bytes.len() / 2], 4, 4).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImage(_)));
    }
}
