// src/classifier.rs
//
// Wheel contact test. A wrist is on the wheel when it lies inside any padded
// wheel region. Confidence never changes the geometric test; it only decides
// whether the observation is usable at all.

use crate::types::{
    ContactStatus, FrameClassification, Rectangle, Side, WheelConfig, WristObservation,
};

pub struct WheelContactClassifier {
    /// Regions with scale and padding already applied
    padded_regions: Vec<Rectangle>,
    min_confidence: f32,
}

impl WheelContactClassifier {
    pub fn new(config: &WheelConfig) -> Self {
        let padded_regions = config
            .regions
            .iter()
            .map(|r| r.scaled_down(config.scale_factor).padded(config.padding))
            .collect();

        Self {
            padded_regions,
            min_confidence: config.min_confidence,
        }
    }

    pub fn is_on_wheel(&self, x: f32, y: f32) -> bool {
        self.padded_regions.iter().any(|r| r.contains(x, y))
    }

    pub fn status(&self, observation: Option<&WristObservation>) -> ContactStatus {
        match observation {
            Some(obs) if obs.confidence > self.min_confidence => {
                if self.is_on_wheel(obs.x, obs.y) {
                    ContactStatus::OnWheel
                } else {
                    ContactStatus::OffWheel
                }
            }
            _ => ContactStatus::Absent,
        }
    }

    pub fn classify(
        &self,
        frame_index: u64,
        side: Side,
        observation: Option<&WristObservation>,
    ) -> FrameClassification {
        let status = self.status(observation);
        FrameClassification {
            frame_index,
            side,
            off_wheel: status.is_off_wheel(),
            status,
            observation: observation.copied(),
        }
    }
}

/// Frame indices of off-wheel classifications, in input order
pub fn off_wheel_frames(classifications: &[FrameClassification]) -> Vec<u64> {
    classifications
        .iter()
        .filter(|c| c.off_wheel)
        .map(|c| c.frame_index)
        .collect()
}
