// src/pipeline.rs
//
// Wires the stages together, one side at a time:
//
//   PoseFrame → SubjectSelector → WheelContactClassifier → debounce → coalesce → events
//
// Per-frame stages have no cross-frame state; debounce and coalesce run over
// the whole side once classification is complete.

use crate::classifier::{off_wheel_frames, WheelContactClassifier};
use crate::events::build_events;
use crate::frame_source::LoadedFrames;
use crate::subject::SubjectSelector;
use crate::temporal::{coalesce, debounce};
use crate::types::{
    Config, ContactStatus, FrameClassification, HandOffEvent, Side, TemporalConfig, TimeRange,
};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SideReport {
    pub side: Side,
    /// One entry per usable frame, in frame order
    pub classifications: Vec<FrameClassification>,
    /// Frames dropped for this side only (wrist keypoint unusable)
    pub skipped_frames: Vec<u64>,
    pub off_wheel_frames: Vec<u64>,
    pub debounced_frames: Vec<u64>,
    pub ranges: Vec<TimeRange>,
    pub events: Vec<HandOffEvent>,
}

impl SideReport {
    pub fn stats(&self) -> SideStats {
        let count = |status: ContactStatus| {
            self.classifications
                .iter()
                .filter(|c| c.status == status)
                .count()
        };

        SideStats {
            side: self.side,
            classified_frames: self.classifications.len(),
            on_wheel_frames: count(ContactStatus::OnWheel),
            absent_frames: count(ContactStatus::Absent),
            skipped_frames: self.skipped_frames.len(),
            off_wheel_frames: self.off_wheel_frames.len(),
            debounced_frames: self.debounced_frames.len(),
            ranges: self.ranges.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SideStats {
    pub side: Side,
    pub classified_frames: usize,
    pub on_wheel_frames: usize,
    pub absent_frames: usize,
    pub skipped_frames: usize,
    pub off_wheel_frames: usize,
    pub debounced_frames: usize,
    pub ranges: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    pub total_frames: usize,
    pub skipped_frames: usize,
    pub events: usize,
    pub sides: Vec<SideStats>,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Left side first, then right
    pub sides: Vec<SideReport>,
    pub stats: PipelineStats,
}

impl PipelineReport {
    pub fn events(&self) -> Vec<HandOffEvent> {
        self.sides
            .iter()
            .flat_map(|s| s.events.iter().cloned())
            .collect()
    }

    pub fn side(&self, side: Side) -> Option<&SideReport> {
        self.sides.iter().find(|s| s.side == side)
    }
}

pub struct HandOffPipeline {
    selector: SubjectSelector,
    classifier: WheelContactClassifier,
    temporal: TemporalConfig,
    fps: f64,
}

impl HandOffPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            selector: SubjectSelector::new(config.subject.bounding_box),
            classifier: WheelContactClassifier::new(&config.wheel),
            temporal: config.temporal.clone(),
            fps: config.video.fps,
        }
    }

    pub fn run(&self, loaded: &LoadedFrames) -> PipelineReport {
        let sides: Vec<SideReport> = Side::BOTH
            .iter()
            .map(|&side| self.run_side(loaded, side))
            .collect();

        let stats = PipelineStats {
            total_frames: loaded.total_frames,
            skipped_frames: loaded.skipped.len(),
            events: sides.iter().map(|s| s.events.len()).sum(),
            sides: sides.iter().map(SideReport::stats).collect(),
        };

        PipelineReport { sides, stats }
    }

    pub fn run_side(&self, loaded: &LoadedFrames, side: Side) -> SideReport {
        let mut classifications = Vec::with_capacity(loaded.frames.len());
        let mut skipped_frames = Vec::new();

        for frame in &loaded.frames {
            match self.selector.select(frame, side) {
                Ok(observation) => {
                    classifications.push(self.classifier.classify(
                        frame.frame_index,
                        side,
                        observation.as_ref(),
                    ));
                }
                Err(e) => {
                    warn!("⚠️  Bad {} wrist point set at frame {}: {}", side, frame.frame_index, e);
                    skipped_frames.push(frame.frame_index);
                }
            }
        }

        let off_wheel = off_wheel_frames(&classifications);
        info!("{} wrist: {} off-wheel frames", side, off_wheel.len());
        debug!("{} wrist off-wheel frames: {:?}", side, off_wheel);

        let debounced = debounce(&off_wheel, self.temporal.debounce_buffer);
        info!("{} wrist: {} frames after debounce", side, debounced.len());
        debug!("{} wrist debounced frames: {:?}", side, debounced);

        let ranges = coalesce(&debounced, self.temporal.range_gap);
        let events = build_events(side, &ranges, self.fps);
        info!("{} wrist: {} hand-off ranges", side, ranges.len());

        SideReport {
            side,
            classifications,
            skipped_frames,
            off_wheel_frames: off_wheel,
            debounced_frames: debounced,
            ranges,
            events,
        }
    }
}
