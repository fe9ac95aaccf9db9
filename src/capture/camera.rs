//! Live-camera capture: exclusive device ownership, 3:4 cropping.
//!
//! A [`LiveCamera`] owns its [`FrameSource`] between `open` and `close`, so
//! no two holders can share the device. `close` is idempotent and also runs
//! on drop, releasing the device on every exit path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::SketchError;
use crate::normalize::normalize_bitmap;
use crate::payload::ImagePayload;

/// Fixed portrait crop ratio (width : height) applied to every frame.
pub const TARGET_ASPECT: f64 = 3.0 / 4.0;

/// Default preferred capture width, matching a 1280px ideal-width hint.
pub const PREFERRED_WIDTH: u32 = 1280;

/// Camera acquisition settings.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Ideal frame width. Frames wider than this are downscaled to it before
    /// cropping; narrower frames are used as-is.
    pub preferred_width: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { preferred_width: PREFERRED_WIDTH }
    }
}

/// Produces decoded frames from a camera device.
pub trait FrameSource: Send {
    /// Grab the current frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be read or decoded.
    fn grab(&mut self) -> Result<DynamicImage, SketchError>;

    /// Release the underlying device. Called at most once.
    fn release(&mut self);
}

/// Frame source backed by a device snapshot path (a file the camera stack
/// keeps updated with the latest frame).
struct SnapshotFrameSource {
    path: PathBuf,
}

impl FrameSource for SnapshotFrameSource {
    fn grab(&mut self) -> Result<DynamicImage, SketchError> {
        let bytes = std::fs::read(&self.path)?;
        image::load_from_memory(&bytes).map_err(|e| SketchError::Decode(e.to_string()))
    }

    fn release(&mut self) {}
}

/// An open camera session. Holds exclusive use of the frame source until
/// closed or dropped.
pub struct LiveCamera {
    source: Option<Box<dyn FrameSource>>,
    config: CameraConfig,
}

impl std::fmt::Debug for LiveCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveCamera")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LiveCamera {
    /// Open the camera behind a device snapshot path.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` if the device is inaccessible or missing.
    /// This is terminal for the camera path; callers should offer the upload
    /// path instead.
    pub fn open(device: &Path, config: CameraConfig) -> Result<Self, SketchError> {
        match std::fs::metadata(device) {
            Ok(_) => {}
            Err(e) if matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::NotFound) => {
                return Err(SketchError::PermissionDenied(format!(
                    "camera device {} unavailable: {e}",
                    device.display()
                )));
            }
            Err(e) => return Err(SketchError::Io(e)),
        }
        Ok(Self::with_source(Box::new(SnapshotFrameSource { path: device.to_path_buf() }), config))
    }

    /// Open a camera over an arbitrary frame source. Used by tests to inject
    /// synthetic frames.
    #[must_use]
    pub fn with_source(source: Box<dyn FrameSource>, config: CameraConfig) -> Self {
        Self { source: Some(source), config }
    }

    /// Capture the current frame: grab, apply the preferred-width hint, crop
    /// to 3:4, and normalize.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the camera has been closed, or a grab or
    /// normalizer error.
    pub fn capture_frame(&mut self) -> Result<ImagePayload, SketchError> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| SketchError::InvalidArgument("camera is already closed".into()))?;

        let mut frame = source.grab()?;
        if frame.width() > self.config.preferred_width {
            let height = frame.height() * self.config.preferred_width / frame.width();
            frame = frame.resize(
                self.config.preferred_width,
                height.max(1),
                image::imageops::FilterType::Triangle,
            );
        }
        let cropped = crop_to_portrait(&frame);
        normalize_bitmap(&cropped)
    }

    /// Stop the camera and release the device. Safe to call twice.
    pub fn close(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
        }
    }
}

impl Drop for LiveCamera {
    fn drop(&mut self) {
        self.close();
    }
}

/// Crop a frame symmetrically to the fixed 3:4 portrait ratio.
///
/// Frames wider than 3:4 keep full height and lose width from both sides;
/// narrower frames keep full width and lose height from top and bottom.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn crop_to_portrait(frame: &DynamicImage) -> DynamicImage {
    let w = f64::from(frame.width());
    let h = f64::from(frame.height());

    if w / h > TARGET_ASPECT {
        let draw_w = h * TARGET_ASPECT;
        let x = (w - draw_w) / 2.0;
        frame.crop_imm(x.round() as u32, 0, draw_w.round() as u32, frame.height())
    } else {
        let draw_h = w / TARGET_ASPECT;
        let y = (h - draw_h) / 2.0;
        frame.crop_imm(0, y.round() as u32, frame.width(), draw_h.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    struct FakeFrames {
        width: u32,
        height: u32,
        released: Arc<AtomicBool>,
    }

    impl FrameSource for FakeFrames {
        fn grab(&mut self) -> Result<DynamicImage, SketchError> {
            Ok(DynamicImage::new_rgb8(self.width, self.height))
        }

        fn release(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn camera(width: u32, height: u32) -> (LiveCamera, Arc<AtomicBool>) {
        let released = Arc::new(AtomicBool::new(false));
        let source = FakeFrames { width, height, released: Arc::clone(&released) };
        (LiveCamera::with_source(Box::new(source), CameraConfig::default()), released)
    }

    #[test]
    fn landscape_frame_crops_width_symmetrically() {
        use image::GenericImageView;

        // 640x480: ratio 4/3 > 3/4, so width shrinks to 480*(3/4)=360 at x=140.
        // Markers at the crop-region corners pin the offset, not just the size.
        let mut img = image::RgbImage::new(640, 480);
        img.put_pixel(140, 0, image::Rgb([255, 255, 255]));
        img.put_pixel(499, 479, image::Rgb([255, 255, 255]));
        let cropped = crop_to_portrait(&DynamicImage::ImageRgb8(img));

        assert_eq!((cropped.width(), cropped.height()), (360, 480));
        assert_eq!(cropped.get_pixel(0, 0), image::Rgba([255, 255, 255, 255]));
        assert_eq!(cropped.get_pixel(359, 479), image::Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn tall_frame_crops_height_symmetrically() {
        // 500x1000: ratio 0.5 < 3/4, so height shrinks to 500/(3/4)≈667
        let frame = DynamicImage::new_rgb8(500, 1000);
        let cropped = crop_to_portrait(&frame);
        assert_eq!(cropped.width(), 500);
        assert_eq!(cropped.height(), 667);
    }

    #[test]
    fn exact_portrait_frame_is_untouched() {
        let frame = DynamicImage::new_rgb8(480, 640);
        let cropped = crop_to_portrait(&frame);
        assert_eq!((cropped.width(), cropped.height()), (480, 640));
    }

    #[test]
    fn crop_ratio_holds_for_arbitrary_inputs() {
        for (w, h) in [(1920, 1080), (1280, 720), (720, 1280), (333, 777), (1024, 1024)] {
            let cropped = crop_to_portrait(&DynamicImage::new_rgb8(w, h));
            let ratio = f64::from(cropped.width()) / f64::from(cropped.height());
            assert!(
                (ratio - TARGET_ASPECT).abs() < 0.01,
                "{w}x{h} cropped to {}x{} (ratio {ratio})",
                cropped.width(),
                cropped.height()
            );
        }
    }

    #[test]
    fn capture_frame_yields_portrait_jpeg() {
        let (mut cam, _) = camera(640, 480);
        let payload = cam.capture_frame().unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        let decoded = image::load_from_memory(&payload.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (360, 480));
    }

    #[test]
    fn wide_frames_are_downscaled_to_preferred_width() {
        // 2560-wide frame honors the 1280 hint before cropping, so the
        // cropped height is 720, not 1440.
        let (mut cam, _) = camera(2560, 1440);
        let payload = cam.capture_frame().unwrap();
        let decoded = image::load_from_memory(&payload.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (540, 720));
    }

    #[test]
    fn close_releases_the_device_and_is_idempotent() {
        let (mut cam, released) = camera(640, 480);
        cam.close();
        assert!(released.load(Ordering::SeqCst));
        cam.close(); // no-op
    }

    #[test]
    fn capture_after_close_fails() {
        let (mut cam, _) = camera(640, 480);
        cam.close();
        let err = cam.capture_frame().unwrap_err();
        assert!(matches!(err, SketchError::InvalidArgument(_)));
    }

    #[test]
    fn drop_releases_the_device() {
        let (cam, released) = camera(640, 480);
        drop(cam);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn missing_device_is_permission_denied() {
        let err =
            LiveCamera::open(Path::new("/nonexistent/video0"), CameraConfig::default()).unwrap_err();
        assert!(matches!(err, SketchError::PermissionDenied(_)));
    }
}
