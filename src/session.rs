//! Caller-visible session state machine.
//!
//! `Idle → (capture) → Ready → (generate) → Processing → {Success | Error}`.
//! Both terminal states return to `Idle` only through an explicit [`Session::reset`]
//! that discards the held payloads. Transitions are methods consuming the
//! session, so generating without a captured image is a typed error rather
//! than a reachable state. `Processing` is a single non-interruptible
//! in-flight request; there is no cancellation path once it is issued.

use thiserror::Error;

use crate::payload::ImagePayload;
use crate::ports::sketch_generator::SketchStyle;

/// An invalid state transition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid transition: cannot {attempted} while {state}")]
pub struct TransitionError {
    /// What was attempted.
    pub attempted: &'static str,
    /// The state the session was in.
    pub state: &'static str,
}

/// One user session, from capture through generation.
#[derive(Debug)]
pub enum Session {
    /// No image held; waiting for a capture.
    Idle,
    /// A normalized image is held and generation may begin.
    Ready {
        /// The captured, normalized input.
        original: ImagePayload,
    },
    /// A generation request is in flight.
    Processing {
        /// The captured, normalized input.
        original: ImagePayload,
        /// The style locked in for this request.
        style: SketchStyle,
    },
    /// Generation completed; both images are held for display/download.
    Success {
        /// The captured, normalized input.
        original: ImagePayload,
        /// The generated sketch.
        sketch: ImagePayload,
    },
    /// Generation or capture failed; retry requires an explicit reset.
    Error {
        /// The user-visible failure message.
        message: String,
    },
}

impl Session {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready { .. } => "ready",
            Self::Processing { .. } => "processing",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    /// An image was captured and normalized.
    ///
    /// # Errors
    ///
    /// Only valid from `Idle`.
    pub fn captured(self, original: ImagePayload) -> Result<Self, TransitionError> {
        match self {
            Self::Idle => Ok(Self::Ready { original }),
            other => Err(TransitionError { attempted: "capture", state: other.name() }),
        }
    }

    /// A generation request is being issued. The style is immutable from
    /// here on.
    ///
    /// # Errors
    ///
    /// Only valid from `Ready`.
    pub fn begin_generation(self, style: SketchStyle) -> Result<Self, TransitionError> {
        match self {
            Self::Ready { original } => Ok(Self::Processing { original, style }),
            other => Err(TransitionError { attempted: "generate", state: other.name() }),
        }
    }

    /// The in-flight request returned a sketch.
    ///
    /// # Errors
    ///
    /// Only valid from `Processing`.
    pub fn completed(self, sketch: ImagePayload) -> Result<Self, TransitionError> {
        match self {
            Self::Processing { original, .. } => Ok(Self::Success { original, sketch }),
            other => Err(TransitionError { attempted: "complete", state: other.name() }),
        }
    }

    /// Capture or generation failed. Valid from any non-terminal state.
    #[must_use]
    pub fn failed(self, message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }

    /// Discard all held payloads and return to `Idle`.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::Idle
    }
}
