// src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub subject: SubjectConfig,
    pub wheel: WheelConfig,
    pub temporal: TemporalConfig,
    pub video: VideoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Screen region the driver's wrists are expected in. The first person
    /// whose wrist falls inside it is taken as the driver.
    pub bounding_box: Rectangle,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            bounding_box: Rectangle::new((71.0, 55.0), (243.0, 235.0)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Rectangles approximating the steering wheel silhouette
    pub regions: Vec<Rectangle>,
    /// Symmetric outward expansion applied to every region
    pub padding: f32,
    /// Regions labelled on an image scaled by this factor are divided by it
    pub scale_factor: f32,
    /// Observations at or below this confidence count as absent
    pub min_confidence: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            regions: vec![
                Rectangle::new((157.0, 153.0), (165.0, 165.0)),
                Rectangle::new((160.0, 143.0), (167.0, 152.0)),
                Rectangle::new((162.0, 132.0), (174.0, 142.0)),
                Rectangle::new((170.0, 124.0), (183.0, 131.0)),
                Rectangle::new((169.0, 116.0), (196.0, 128.0)),
                Rectangle::new((192.0, 124.0), (199.0, 140.0)),
                Rectangle::new((156.0, 120.0), (173.0, 163.0)),
                Rectangle::new((157.0, 108.0), (201.0, 123.0)),
            ],
            padding: 10.0,
            scale_factor: 1.0,
            min_confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Max frame distance to a neighbouring off-wheel frame for a frame to survive debouncing
    pub debounce_buffer: u64,
    /// Max frame gap bridged when coalescing off-wheel frames into one range
    pub range_gap: u64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            debounce_buffer: 5,
            range_gap: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub input_dir: String,
    pub output_path: String,
    pub fps: f64,
    pub max_frames: Option<usize>,
    pub observations_csv: Option<String>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            input_dir: "driving_jsons".to_string(),
            output_path: "frames.txt".to_string(),
            fps: 15.0,
            max_frames: Some(1000),
            observations_csv: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Axis-aligned rectangle in keypoint pixel space. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub top_left: (f32, f32),
    pub bottom_right: (f32, f32),
}

impl Rectangle {
    pub fn new(top_left: (f32, f32), bottom_right: (f32, f32)) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.top_left.0
            && x <= self.bottom_right.0
            && y >= self.top_left.1
            && y <= self.bottom_right.1
    }

    /// Expand outward by `padding` on every side
    pub fn padded(&self, padding: f32) -> Self {
        Self {
            top_left: (self.top_left.0 - padding, self.top_left.1 - padding),
            bottom_right: (self.bottom_right.0 + padding, self.bottom_right.1 + padding),
        }
    }

    pub fn scaled_down(&self, factor: f32) -> Self {
        Self {
            top_left: (self.top_left.0 / factor, self.top_left.1 / factor),
            bottom_right: (self.bottom_right.0 / factor, self.bottom_right.1 / factor),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.top_left.0 <= self.bottom_right.0 && self.top_left.1 <= self.bottom_right.1
    }
}

// ============================================================================
// POSE DATA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Offset of the wrist (x, y, confidence) triple in a flat
    /// `pose_keypoints_2d` array.
    pub fn wrist_offset(self) -> usize {
        match self {
            Side::Left => 21,
            Side::Right => 12,
        }
    }

    pub fn event_label(self) -> &'static str {
        match self {
            Side::Left => "left hand off wheel",
            Side::Right => "right hand off wheel",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected person: flat keypoint array of (x, y, confidence) triples.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPose {
    #[serde(default)]
    pub pose_keypoints_2d: Vec<f32>,
}

/// One pose record, as written per frame by the pose estimator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoseRecord {
    #[serde(default)]
    pub people: Vec<PersonPose>,
}

#[derive(Debug, Clone)]
pub struct PoseFrame {
    pub frame_index: u64,
    /// File name or other identifier used in log lines
    pub source: String,
    pub people: Vec<PersonPose>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WristObservation {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
    pub frame_index: u64,
    pub side: Side,
}

// ============================================================================
// CLASSIFICATION / EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    OnWheel,
    OffWheel,
    /// No qualifying subject or no reliable wrist detection; counts as off-wheel
    Absent,
}

impl ContactStatus {
    pub fn is_off_wheel(self) -> bool {
        !matches!(self, ContactStatus::OnWheel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClassification {
    pub frame_index: u64,
    pub side: Side,
    pub off_wheel: bool,
    pub status: ContactStatus,
    pub observation: Option<WristObservation>,
}

/// Inclusive run of off-wheel frames, `start_frame <= end_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_frame: u64,
    pub end_frame: u64,
}

impl TimeRange {
    pub fn single(frame: u64) -> Self {
        Self {
            start_frame: frame,
            end_frame: frame,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, frame: u64) -> bool {
        frame >= self.start_frame && frame <= self.end_frame
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOffEvent {
    pub event: String,
    pub start: String,
    pub end: String,
}
