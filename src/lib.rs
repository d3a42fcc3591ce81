// src/lib.rs
//
// Hands-off-wheel detection from per-frame pose keypoints.
//
// Signal flow (per wrist side):
//   pose records → frame_source → subject → classifier → temporal::debounce
//                → temporal::coalesce → events → JSONL sink

pub mod classifier;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod frame_source;
pub mod keypoints;
pub mod pipeline;
pub mod subject;
pub mod temporal;
pub mod types;

pub use classifier::WheelContactClassifier;
pub use error::FrameError;
pub use events::{frame_to_timestamp, EventSink};
pub use frame_source::{FrameSource, LoadedFrames};
pub use pipeline::{HandOffPipeline, PipelineReport, PipelineStats};
pub use subject::SubjectSelector;
pub use temporal::{coalesce, debounce};
pub use types::{Config, HandOffEvent, Rectangle, Side, TimeRange, WristObservation};
