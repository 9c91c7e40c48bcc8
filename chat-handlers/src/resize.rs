//! Bounded image downscaling for the inline-image payload limit.

use anyhow::Context as _;
use image::imageops::FilterType;
use image::ImageFormat;
use std::io::Cursor;
use tracing::debug;

/// Inline-image payload ceiling (5 MB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Per-pass shrink applied to both dimensions.
const SHRINK_PERCENT: u32 = 10;
/// Hard cap on shrink passes; 32 passes reduce an edge to ~3% of its size.
const MAX_PASSES: usize = 32;
/// Dimensions are never shrunk below this floor.
const MIN_DIMENSION: u32 = 16;

/// Re-encodes `bytes` under `limit`, shrinking both dimensions by 10% per pass.
/// The loop ends when the encoding fits, the pass cap is reached, or a
/// dimension hits the floor; the last encoding is returned in the latter two
/// cases. Input already under the limit is returned unchanged. Lossy.
pub fn resize_to_limit(bytes: &[u8], format: ImageFormat, limit: usize) -> anyhow::Result<Vec<u8>> {
    if bytes.len() <= limit {
        return Ok(bytes.to_vec());
    }

    let mut img = image::load_from_memory_with_format(bytes, format)
        .context("Failed to decode image for resizing")?;
    let mut encoded = bytes.to_vec();

    for pass in 0..MAX_PASSES {
        if encoded.len() <= limit {
            break;
        }
        let (width, height) = (img.width(), img.height());
        if width <= MIN_DIMENSION || height <= MIN_DIMENSION {
            break;
        }
        let new_width = (width * (100 - SHRINK_PERCENT) / 100).max(MIN_DIMENSION);
        let new_height = (height * (100 - SHRINK_PERCENT) / 100).max(MIN_DIMENSION);
        img = img.resize_exact(new_width, new_height, FilterType::Lanczos3);

        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format)
            .context("Failed to re-encode resized image")?;
        encoded = buffer.into_inner();
        debug!(
            pass = pass + 1,
            width = new_width,
            height = new_height,
            encoded_len = encoded.len(),
            "Resized image"
        );
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};

    /// Incompressible noise so PNG size tracks pixel count.
    fn noise_png(width: u32, height: u32) -> Vec<u8> {
        let mut seed = 0x12345678u32;
        let img = RgbaImage::from_fn(width, height, |_, _| {
            // xorshift; plenty random for size purposes
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            image::Rgba(seed.to_le_bytes())
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_small_image_is_returned_unchanged() {
        let bytes = noise_png(32, 32);
        let result = resize_to_limit(&bytes, ImageFormat::Png, MAX_IMAGE_BYTES).unwrap();
        assert_eq!(result, bytes);
    }

    #[test]
    fn test_oversized_image_shrinks_under_limit() {
        let bytes = noise_png(128, 128);
        let limit = 10_000;
        assert!(bytes.len() > limit);

        let result = resize_to_limit(&bytes, ImageFormat::Png, limit).unwrap();
        assert!(result.len() <= limit, "got {} bytes", result.len());
    }

    #[test]
    fn test_loop_terminates_even_with_unreachable_limit() {
        let bytes = noise_png(64, 64);
        // 1-byte limit can never be met; the pass cap / dimension floor must end the loop.
        let result = resize_to_limit(&bytes, ImageFormat::Png, 1).unwrap();
        assert!(!result.is_empty());
        assert!(result.len() < bytes.len());
    }

    #[test]
    fn test_undecodable_input_is_an_error() {
        assert!(resize_to_limit(&[0u8; 64 * 1024], ImageFormat::Png, 1).is_err());
    }
}
