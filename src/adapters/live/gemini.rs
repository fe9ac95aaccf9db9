//! Live adapter for the Gemini sketch-generation API.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::error::SketchError;
use crate::payload::ImagePayload;
use crate::ports::sketch_generator::{
    GenerateFuture, SketchGenerator, SketchRequest, SketchResponse,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Fixed sampling temperature. Low, to bias toward faithful composition.
const TEMPERATURE: f64 = 0.4;

/// Fixed output aspect ratio for consistent framing.
const OUTPUT_ASPECT_RATIO: &str = "1:1";

/// Live Gemini sketch generator that calls the Google AI API.
pub struct GeminiSketcher {
    client: Client,
    api_key: String,
}

impl GeminiSketcher {
    /// Create a new Gemini sketcher with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

impl SketchGenerator for GeminiSketcher {
    fn generate(&self, request: &SketchRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{GEMINI_API_BASE}/{}:generateContent", request.model);

            let body = serde_json::json!({
                "contents": [{
                    "parts": [
                        {
                            "inlineData": {
                                "mimeType": request.image.mime_type,
                                "data": request.image.to_base64(),
                            }
                        },
                        {"text": request.style.prompt()}
                    ]
                }],
                "generationConfig": {
                    "temperature": TEMPERATURE,
                    "imageConfig": {
                        "aspectRatio": OUTPUT_ASPECT_RATIO,
                    }
                }
            });

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status().as_u16();
            let response_text = response.text().await?;

            parse_body(status, &response_text)
        })
    }
}

/// Interpret one response body. Split from the transport so the error
/// taxonomy is testable without network I/O.
fn parse_body(status: u16, body: &str) -> Result<SketchResponse, SketchError> {
    if !(200..300).contains(&status) {
        return Err(SketchError::Upstream { status, message: body.to_string() });
    }

    let parsed: GeminiResponse = serde_json::from_str(body).map_err(|e| SketchError::Upstream {
        status,
        message: format!("Failed to parse response: {e}"),
    })?;

    // Only the first candidate is consulted; its parts are scanned in order.
    let parts = parsed
        .candidates
        .into_iter()
        .next()
        .map(|c| c.content.parts)
        .filter(|parts| !parts.is_empty())
        .ok_or(SketchError::EmptyResponse)?;

    for part in parts {
        if let Some(inline) = part.inline_data {
            let data = base64::engine::general_purpose::STANDARD
                .decode(&inline.data)
                .map_err(|e| SketchError::Upstream {
                    status,
                    message: format!("Failed to decode base64: {e}"),
                })?;
            // The service's sketch output is re-emitted as PNG regardless of
            // the declared part MIME.
            return Ok(SketchResponse { sketch: ImagePayload::new("image/png", data) });
        }
    }

    Err(SketchError::NoImageInResponse)
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[allow(dead_code)]
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    #[allow(dead_code)]
    mime_type: String,
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_maps_to_upstream() {
        let err = parse_body(429, "rate limited").unwrap_err();
        match err {
            SketchError::Upstream { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let err = parse_body(200, r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, SketchError::EmptyResponse));
    }

    #[test]
    fn zero_parts_is_empty_response() {
        let body = r#"{"candidates": [{"content": {"parts": []}}]}"#;
        let err = parse_body(200, body).unwrap_err();
        assert!(matches!(err, SketchError::EmptyResponse));
    }

    #[test]
    fn text_only_part_is_no_image_in_response() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "sorry, no"}]}}]}"#;
        let err = parse_body(200, body).unwrap_err();
        assert!(matches!(err, SketchError::NoImageInResponse));
    }

    #[test]
    fn first_inline_part_becomes_png_payload() {
        // base64 of [1, 2, 3]
        let body = r#"{"candidates": [{"content": {"parts": [
            {"text": "here you go"},
            {"inlineData": {"mimeType": "image/jpeg", "data": "AQID"}},
            {"inlineData": {"mimeType": "image/png", "data": "BAUG"}}
        ]}}]}"#;
        let response = parse_body(200, body).unwrap();
        assert_eq!(response.sketch.mime_type, "image/png");
        assert_eq!(response.sketch.data, vec![1, 2, 3]);
    }

    #[test]
    fn malformed_base64_is_upstream() {
        let body = r#"{"candidates": [{"content": {"parts": [
            {"inlineData": {"mimeType": "image/png", "data": "!!not-base64!!"}}
        ]}}]}"#;
        let err = parse_body(200, body).unwrap_err();
        assert!(matches!(err, SketchError::Upstream { .. }));
    }

    #[test]
    fn unparseable_body_is_upstream() {
        let err = parse_body(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, SketchError::Upstream { .. }));
    }
}
