//! Output file naming and saving.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SketchError;
use crate::payload::ImagePayload;
use crate::ports::sketch_generator::SketchStyle;

/// Generate an output filename for a sketch: `sketchify-<style>-<ts>.png`.
#[must_use]
pub fn auto_filename(style: SketchStyle) -> String {
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("sketchify-{}-{timestamp}.png", style.as_str())
}

/// Filename for the kept normalized original, derived from the sketch path.
#[must_use]
pub fn original_filename(sketch_path: &Path) -> PathBuf {
    let stem = sketch_path.file_stem().unwrap_or_default().to_string_lossy();
    sketch_path.with_file_name(format!("{stem}-original.jpg"))
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, style: SketchStyle) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(auto_filename(style)),
    }
}

/// Write an encoded payload to disk.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_payload(payload: &ImagePayload, output_path: &Path) -> Result<(), SketchError> {
    std::fs::write(output_path, &payload.data).map_err(SketchError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_filename_carries_style_and_extension() {
        let name = auto_filename(SketchStyle::Bw);
        assert!(name.starts_with("sketchify-bw-"));
        assert!(name.ends_with(".png"));

        let name = auto_filename(SketchStyle::Color);
        assert!(name.starts_with("sketchify-color-"));
    }

    #[test]
    fn resolve_explicit() {
        let path = resolve_output_path(Some("my-sketch.png"), SketchStyle::Bw);
        assert_eq!(path, PathBuf::from("my-sketch.png"));
    }

    #[test]
    fn resolve_auto() {
        let path = resolve_output_path(None, SketchStyle::Color);
        assert!(path.to_str().unwrap().starts_with("sketchify-color-"));
        assert_eq!(path.extension().unwrap(), "png");
    }

    #[test]
    fn original_filename_sits_next_to_sketch() {
        let path = original_filename(Path::new("out/sketchify-bw-123.png"));
        assert_eq!(path, PathBuf::from("out/sketchify-bw-123-original.jpg"));
    }

    #[test]
    fn save_writes_payload_bytes() {
        let dir = std::env::temp_dir().join("sketchify_output_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sketch.png");

        let payload = ImagePayload::new("image/png", vec![0x89, 0x50, 0x4E, 0x47]);
        save_payload(&payload, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), payload.data);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
