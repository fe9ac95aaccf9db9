//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod sketch_generator;

pub use sketch_generator::{SketchGenerator, SketchRequest, SketchStyle};
