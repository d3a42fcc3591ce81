// src/error.rs

use thiserror::Error;

/// Unusable keypoints in an otherwise readable record. Recorded in the
/// loader's skip-list; never aborts a run.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Malformed frame {frame}: {reason}")]
    MalformedFrame { frame: String, reason: String },
}

impl FrameError {
    pub fn malformed(frame: impl Into<String>, reason: impl Into<String>) -> Self {
        FrameError::MalformedFrame {
            frame: frame.into(),
            reason: reason.into(),
        }
    }

    pub fn frame(&self) -> &str {
        match self {
            FrameError::MalformedFrame { frame, .. } => frame,
        }
    }
}
