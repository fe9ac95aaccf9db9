//! File-upload capture: sniff the format, then normalize.

use std::path::Path;

use crate::error::SketchError;
use crate::normalize::normalize;
use crate::payload::ImagePayload;

/// Capture one payload from an image file.
///
/// The byte signature is sniffed before decoding so that non-image files are
/// rejected as `UnsupportedFormat` rather than a decode failure. JPEG, PNG,
/// and WebP are all accepted (along with everything else the `image` crate
/// recognizes).
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `UnsupportedFormat` if it is not
/// image data, or a normalizer error.
pub fn capture_from_file(path: &Path) -> Result<ImagePayload, SketchError> {
    let bytes = std::fs::read(path)?;
    image::guess_format(&bytes).map_err(|_| {
        SketchError::UnsupportedFormat(format!("{} is not image data", path.display()))
    })?;
    normalize(&bytes)
}
