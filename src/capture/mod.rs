//! Capture sources: the file-upload path and the live-camera path.
//!
//! Both variants produce one [`crate::payload::ImagePayload`] on demand and
//! release any underlying device resources when done or canceled.

pub mod camera;
pub mod upload;

use std::path::PathBuf;

/// Where the input frame comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// An image file on disk.
    Upload(PathBuf),
    /// A camera device frame source.
    Camera(PathBuf),
}
