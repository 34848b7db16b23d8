// SPDX-License-Identifier: MPL-2.0

//! JPEG encoding for the virtual camera's test pattern
//!
//! Saved photos are never re-encoded; only synthetic frames pass through here.

use image::{Rgb, RgbImage};
use tracing::debug;

/// Encoding quality settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression)
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl EncodingQuality {
    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::High => 92,
            EncodingQuality::Maximum => 98,
        }
    }
}

/// SMPTE-style color bars
const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

/// Render color bars over a bottom luminance ramp
pub fn render_test_pattern(width: u32, height: u32) -> RgbImage {
    let bars_height = height - height / 4;
    RgbImage::from_fn(width, height, |x, y| {
        if y < bars_height {
            let index = (x as usize * BARS.len()) / width as usize;
            Rgb(BARS[index.min(BARS.len() - 1)])
        } else {
            let level = ((x as u64 * 255) / u64::from(width.max(2) - 1)) as u8;
            Rgb([level, level, level])
        }
    })
}

/// Encode the test pattern as JPEG
///
/// # Returns
/// * `Ok(Vec<u8>)` - JPEG bytes
/// * `Err(String)` - Zero-sized pattern or encoder failure
pub fn encode_test_pattern(
    width: u32,
    height: u32,
    quality: EncodingQuality,
) -> Result<Vec<u8>, String> {
    if width == 0 || height == 0 {
        return Err(format!("Invalid test pattern size {}x{}", width, height));
    }

    let image = render_test_pattern(width, height);
    let data = encode_jpeg(&image, quality)?;
    debug!(width, height, size = data.len(), "Test pattern encoded");
    Ok(data)
}

/// Encode image as JPEG
fn encode_jpeg(image: &RgbImage, quality: EncodingQuality) -> Result<Vec<u8>, String> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());

    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| format!("JPEG encoding failed: {}", e))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_quality_values() {
        assert_eq!(EncodingQuality::Low.jpeg_quality(), 60);
        assert_eq!(EncodingQuality::Medium.jpeg_quality(), 80);
        assert_eq!(EncodingQuality::High.jpeg_quality(), 92);
        assert_eq!(EncodingQuality::Maximum.jpeg_quality(), 98);
    }

    #[test]
    fn test_pattern_layout() {
        let image = render_test_pattern(70, 40);
        assert_eq!(image.get_pixel(0, 0), &Rgb(BARS[0]));
        assert_eq!(image.get_pixel(69, 0), &Rgb(BARS[6]));
        // Ramp starts black and ends white
        assert_eq!(image.get_pixel(0, 39), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(69, 39), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(encode_test_pattern(0, 10, EncodingQuality::High).is_err());
    }

    #[test]
    fn test_one_pixel_pattern_encodes() {
        let data = encode_test_pattern(1, 1, EncodingQuality::Low).unwrap();
        assert_eq!(&data[..2], &[0xFF, 0xD8]);
    }
}
