//! Recording adapter for the `SketchGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::sketch_generator::{GenerateFuture, SketchGenerator, SketchRequest};

/// Records sketch generation interactions while delegating to an inner
/// implementation.
pub struct RecordingSketchGenerator {
    inner: Box<dyn SketchGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSketchGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn SketchGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl SketchGenerator for RecordingSketchGenerator {
    fn generate(&self, request: &SketchRequest) -> GenerateFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request_clone).await;
            // Cassettes store the sketch in the service's emission shape, a
            // `data:image/png;base64,...` string.
            let emission = result.as_ref().map(|r| r.sketch.to_data_uri());
            record_result(&recorder, "sketch_generator", "generate", &request_clone, &emission);
            result
        })
    }
}
