//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the
//! decoded RGBA image plus a single-channel grayscale view suitable for
//! the rest of the pipeline. Keeping the RGBA decode separate lets the
//! caller reuse the original image for the result overlay without
//! decoding twice.

use image::{GrayImage, RgbaImage};

use crate::types::DetectError;

/// Decode raw image bytes into an RGBA image.
///
/// Supports PNG, JPEG, BMP, and WebP (whatever the `image` crate can
/// decode with the enabled features).
///
/// # Errors
///
/// Returns [`DetectError::EmptyInput`] if `bytes` is empty.
/// Returns [`DetectError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, DetectError> {
    if bytes.is_empty() {
        return Err(DetectError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Convert an RGBA image to grayscale.
///
/// Uses the standard luminance weighting
/// (`0.299*R + 0.587*G + 0.114*B`); the alpha channel is ignored.
#[must_use = "returns the grayscale image"]
pub fn luma(image: &RgbaImage) -> GrayImage {
    image::imageops::grayscale(image)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_error() {
        let result = decode(&[]);
        assert!(matches!(result, Err(DetectError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(DetectError::ImageDecode(_))));
    }

    #[test]
    fn valid_png_decodes_with_matching_dimensions() {
        let img = RgbaImage::from_fn(17, 31, |_, _| image::Rgba([128, 64, 32, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();

        let decoded = decode(&buf).unwrap();
        assert_eq!(decoded.width(), 17);
        assert_eq!(decoded.height(), 31);
    }

    #[test]
    fn luma_uses_weighted_conversion() {
        // Different RGB channels must produce different grayscale values,
        // confirming a weighted luminance conversion (not a simple average).
        let r_val = single_channel_luma(image::Rgba([255, 0, 0, 255]));
        let g_val = single_channel_luma(image::Rgba([0, 255, 0, 255]));
        let b_val = single_channel_luma(image::Rgba([0, 0, 255, 255]));

        assert!(
            g_val > r_val && r_val > b_val,
            "expected green > red > blue luminance, got R={r_val} G={g_val} B={b_val}",
        );
    }

    #[test]
    fn luma_preserves_dimensions() {
        let img = RgbaImage::new(13, 29);
        let gray = luma(&img);
        assert_eq!(gray.width(), 13);
        assert_eq!(gray.height(), 29);
    }

    /// Helper: grayscale value of a 1x1 image of the given color.
    fn single_channel_luma(color: image::Rgba<u8>) -> u8 {
        let img = RgbaImage::from_pixel(1, 1, color);
        luma(&img).get_pixel(0, 0).0[0]
    }
}
