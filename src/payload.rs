//! Self-describing encoded image passed between components.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::SketchError;

/// An encoded image: MIME type plus raw bytes.
///
/// Payloads produced by the normalizer are always decodable back into a
/// bitmap. Serializes with the byte buffer as base64 so payloads survive
/// cassette round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// MIME type of the encoded bytes (e.g., `"image/jpeg"`).
    pub mime_type: String,
    /// Encoded image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl ImagePayload {
    /// Create a payload from a MIME type and encoded bytes.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self { mime_type: mime_type.into(), data }
    }

    /// Render as a `data:<mime>;base64,<payload>` URI.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{encoded}", self.mime_type)
    }

    /// Parse a `data:` URI back into a payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the string is not a base64 data URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, SketchError> {
        let mime_type = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(mime, _)| mime)
            .ok_or_else(|| SketchError::InvalidArgument("not a base64 data URI".into()))?;
        let data = base64::engine::general_purpose::STANDARD
            .decode(strip_data_uri(uri))
            .map_err(|e| SketchError::InvalidArgument(format!("bad base64 payload: {e}")))?;
        Ok(Self { mime_type: mime_type.to_string(), data })
    }

    /// Base64-encode the raw bytes, with no data-URI prefix.
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Strip a `data:image/...;base64,` prefix, if present, leaving clean base64.
#[must_use]
pub fn strip_data_uri(value: &str) -> &str {
    match value.split_once(";base64,") {
        Some((header, body)) if header.starts_with("data:") => body,
        _ => value,
    }
}

/// Serde helper for serializing `Vec<u8>` as base64 strings.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
