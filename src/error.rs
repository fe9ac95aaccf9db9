//! Unified error type for sketchify.

use thiserror::Error;

/// Errors that can occur while capturing, normalizing, or generating a sketch.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Source bytes could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// A normalized bitmap could not be re-encoded.
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// The input file is not image data in a supported format.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Camera device access was refused or unavailable. Terminal for the
    /// camera path; the caller falls back to file upload.
    #[error("Camera access denied: {0}")]
    PermissionDenied(String),

    /// The service response carried no content parts.
    #[error("Empty response: no content was generated")]
    EmptyResponse,

    /// The service responded, but no part contained inline image data.
    #[error("No image data found in response")]
    NoImageInResponse,

    /// The service returned an error response.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Error message from the service.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No API key configured.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}
