//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::capture::SourceKind;
use crate::ports::sketch_generator::SketchStyle;

/// Turn a photo into a pencil sketch via the Gemini image API.
#[derive(Parser, Debug)]
#[command(name = "sketchify", version, about)]
pub struct Cli {
    /// Path to the input photo (JPEG, PNG, WebP, ...).
    #[arg(conflicts_with = "camera")]
    pub input: Option<PathBuf>,

    /// Capture the input frame from a camera device snapshot instead.
    #[arg(short = 'c', long, value_name = "DEVICE")]
    pub camera: Option<PathBuf>,

    /// Sketch style (falls back to the config default when omitted).
    #[arg(short, long, value_enum)]
    pub style: Option<SketchStyle>,

    /// Model identifier override.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write the normalized input image next to the sketch.
    #[arg(long)]
    pub keep_original: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the capture source from the file argument or camera flag.
    ///
    /// # Errors
    ///
    /// Returns an error if neither an input file nor a camera device is
    /// given.
    pub fn resolve_source(&self) -> Result<SourceKind, std::io::Error> {
        if let Some(ref path) = self.input {
            Ok(SourceKind::Upload(path.clone()))
        } else if let Some(ref device) = self.camera {
            Ok(SourceKind::Camera(device.clone()))
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide an input photo or use -c/--camera",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_input_file() {
        let cli = Cli::parse_from(["sketchify", "photo.jpg"]);
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("photo.jpg")));
        assert!(cli.camera.is_none());
        assert_eq!(cli.resolve_source().unwrap(), SourceKind::Upload("photo.jpg".into()));
    }

    #[test]
    fn camera_flag() {
        let cli = Cli::parse_from(["sketchify", "--camera", "/dev/camera-frame.jpg"]);
        assert!(cli.input.is_none());
        assert_eq!(
            cli.resolve_source().unwrap(),
            SourceKind::Camera("/dev/camera-frame.jpg".into())
        );
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["sketchify", "photo.jpg"]);
        assert!(cli.style.is_none());
        assert!(cli.model.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.keep_original);
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "sketchify",
            "-s",
            "color",
            "-m",
            "gemini-3-pro-image-preview",
            "-o",
            "out.png",
            "--keep-original",
            "-v",
            "photo.png",
        ]);
        assert_eq!(cli.style, Some(SketchStyle::Color));
        assert_eq!(cli.model.as_deref(), Some("gemini-3-pro-image-preview"));
        assert_eq!(cli.output.as_deref(), Some("out.png"));
        assert!(cli.keep_original);
        assert!(cli.verbose);
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("photo.png")));
    }

    #[test]
    fn no_source_errors() {
        let cli = Cli::parse_from(["sketchify"]);
        assert!(cli.resolve_source().is_err());
    }

    #[test]
    fn file_and_camera_conflict() {
        assert!(Cli::try_parse_from(["sketchify", "photo.jpg", "--camera", "/dev/video0"])
            .is_err());
    }

    #[test]
    fn invalid_style_rejected() {
        assert!(Cli::try_parse_from(["sketchify", "-s", "sepia", "photo.jpg"]).is_err());
    }
}
