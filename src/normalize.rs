//! Image normalization: bounded dimensions, standard JPEG encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::SketchError;
use crate::payload::ImagePayload;

/// Maximum pixel count for the longer dimension of a normalized image.
pub const MAX_DIMENSION: u32 = 1024;

/// JPEG quality used for re-encoding (0-100 scale).
pub const JPEG_QUALITY: u8 = 85;

/// Normalize raw image bytes: decode, cap the longer dimension at
/// [`MAX_DIMENSION`] preserving aspect ratio, re-encode as JPEG.
///
/// Images already within bounds keep their dimensions.
///
/// # Errors
///
/// Returns `Decode` if the bytes are not a decodable image, `Encode` if the
/// JPEG re-encode fails.
pub fn normalize(bytes: &[u8]) -> Result<ImagePayload, SketchError> {
    let img = image::load_from_memory(bytes).map_err(|e| SketchError::Decode(e.to_string()))?;
    normalize_bitmap(&img)
}

/// Normalize an already-decoded bitmap (camera frames arrive here after
/// cropping).
///
/// # Errors
///
/// Returns `Encode` if the JPEG re-encode fails.
pub fn normalize_bitmap(img: &DynamicImage) -> Result<ImagePayload, SketchError> {
    let longer = img.width().max(img.height());
    let scaled = if longer > MAX_DIMENSION {
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        img.clone()
    };

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = scaled.to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    rgb.write_with_encoder(encoder).map_err(|e| SketchError::Encode(e.to_string()))?;

    Ok(ImagePayload::new("image/jpeg", buf.into_inner()))
}
