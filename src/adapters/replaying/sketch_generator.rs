//! Replaying adapter for the `SketchGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::SketchError;
use crate::payload::ImagePayload;
use crate::ports::sketch_generator::{
    GenerateFuture, SketchGenerator, SketchRequest, SketchResponse,
};

/// Serves recorded sketch generation results from a cassette.
pub struct ReplayingSketchGenerator {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingSketchGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }
}

impl SketchGenerator for ReplayingSketchGenerator {
    fn generate(&self, _request: &SketchRequest) -> GenerateFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "sketch_generator", "generate");
        Box::pin(async move {
            let value = replay_result::<serde_json::Value>(output)
                .map_err(|e| SketchError::Upstream { status: 0, message: e.to_string() })?;
            decode_sketch(value)
        })
    }
}

/// Decode a recorded sketch: either the service's `data:image/png;base64,...`
/// emission string, or a structured response.
fn decode_sketch(value: serde_json::Value) -> Result<SketchResponse, SketchError> {
    if let serde_json::Value::String(uri) = value {
        let sketch = ImagePayload::from_data_uri(&uri)?;
        return Ok(SketchResponse { sketch });
    }
    serde_json::from_value(value).map_err(|e| SketchError::Upstream {
        status: 0,
        message: format!("Unreadable recorded sketch: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn data_uri_emission_decodes_to_png_payload() {
        // base64 of [1, 2, 3]
        let response = decode_sketch(json!("data:image/png;base64,AQID")).unwrap();
        assert_eq!(response.sketch.mime_type, "image/png");
        assert_eq!(response.sketch.data, vec![1, 2, 3]);
    }

    #[test]
    fn structured_response_still_decodes() {
        let value = json!({"sketch": {"mime_type": "image/png", "data": "AQID"}});
        let response = decode_sketch(value).unwrap();
        assert_eq!(response.sketch.data, vec![1, 2, 3]);
    }

    #[test]
    fn emission_round_trips_through_recording_shape() {
        let original = ImagePayload::new("image/png", vec![9, 8, 7]);
        let response = decode_sketch(json!(original.to_data_uri())).unwrap();
        assert_eq!(response.sketch, original);
    }

    #[test]
    fn malformed_emission_is_rejected() {
        assert!(decode_sketch(json!("not a data uri")).is_err());
        assert!(decode_sketch(json!({"bogus": true})).is_err());
    }
}
