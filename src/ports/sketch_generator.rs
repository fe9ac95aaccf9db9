//! Sketch generator port for the external image-to-sketch service.

use std::future::Future;
use std::pin::Pin;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SketchError;
use crate::payload::ImagePayload;

/// Default model identifier for the sketch service.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Prompt template for the black & white style.
pub const BW_PROMPT: &str = "Transform this image into a high-quality, professional pencil \
     sketch. The style should be artistic, black and white, with strong shading and charcoal \
     textures. Do not include any colors. Return only the image.";

/// Prompt template for the colored style.
pub const COLOR_PROMPT: &str = "Transform this image into a high-quality, professional colored \
     pencil sketch. The style should be artistic, vibrant, with visible pencil strokes and \
     texture. Keep the original colors but render them as a hand-drawn sketch. Return only the \
     image.";

/// Which sketch rendering to request. Immutable once a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SketchStyle {
    /// Monochrome pencil sketch.
    Bw,
    /// Colored pencil sketch.
    Color,
}

impl SketchStyle {
    /// The fixed prompt template for this style.
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Bw => BW_PROMPT,
            Self::Color => COLOR_PROMPT,
        }
    }

    /// Short lowercase name, used in filenames.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bw => "bw",
            Self::Color => "color",
        }
    }

    /// Parse a short style name, as written in config files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bw" => Some(Self::Bw),
            "color" => Some(Self::Color),
            _ => None,
        }
    }
}

impl std::fmt::Display for SketchStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to render one captured image as a sketch. Stateless, no
/// identity beyond the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchRequest {
    /// The model identifier.
    pub model: String,
    /// The normalized input image.
    pub image: ImagePayload,
    /// The requested sketch style.
    pub style: SketchStyle,
}

/// The rendered sketch returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchResponse {
    /// The generated sketch image.
    pub sketch: ImagePayload,
}

/// Boxed future type returned by [`SketchGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SketchResponse, SketchError>> + Send + 'a>>;

/// Renders a captured image as a pencil sketch via an external service.
///
/// At most one attempt per call: implementations never retry, and a request
/// cannot be canceled once issued.
pub trait SketchGenerator: Send + Sync {
    /// Generate a sketch for the given request.
    fn generate(&self, request: &SketchRequest) -> GenerateFuture<'_>;
}
