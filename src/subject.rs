// src/subject.rs
//
// Picks the driver's wrist out of a frame that may contain several people.
// Assumes the driver is the only person whose wrist lands in a fixed screen
// region; this is a per-frame filter, not a tracker.

use crate::error::FrameError;
use crate::keypoints::wrist_keypoint;
use crate::types::{PoseFrame, Rectangle, Side, WristObservation};
use tracing::debug;

pub struct SubjectSelector {
    bounding_box: Rectangle,
}

impl SubjectSelector {
    pub fn new(bounding_box: Rectangle) -> Self {
        Self { bounding_box }
    }

    /// First person (in record order) whose wrist is inside the subject box.
    /// `Ok(None)` when nobody qualifies.
    pub fn select(
        &self,
        frame: &PoseFrame,
        side: Side,
    ) -> Result<Option<WristObservation>, FrameError> {
        for (person_idx, person) in frame.people.iter().enumerate() {
            let (x, y, confidence) = wrist_keypoint(person, side).ok_or_else(|| {
                FrameError::malformed(
                    frame.source.clone(),
                    format!("person {} has no {} wrist keypoint", person_idx, side),
                )
            })?;

            if !(x.is_finite() && y.is_finite() && confidence.is_finite()) {
                return Err(FrameError::malformed(
                    frame.source.clone(),
                    format!("person {} has non-finite {} wrist", person_idx, side),
                ));
            }

            if self.bounding_box.contains(x, y) {
                return Ok(Some(WristObservation {
                    x,
                    y,
                    confidence,
                    frame_index: frame.frame_index,
                    side,
                }));
            }
        }

        debug!(
            "Frame {}: no {} wrist inside subject box ({} people)",
            frame.frame_index,
            side,
            frame.people.len()
        );
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonPose;

    fn person(side: Side, x: f32, y: f32, c: f32) -> PersonPose {
        let mut k = vec![0.0; 75];
        let o = side.wrist_offset();
        k[o] = x;
        k[o + 1] = y;
        k[o + 2] = c;
        PersonPose {
            pose_keypoints_2d: k,
        }
    }

    fn frame(people: Vec<PersonPose>) -> PoseFrame {
        PoseFrame {
            frame_index: 7,
            source: "frame_7.json".into(),
            people,
        }
    }

    fn selector() -> SubjectSelector {
        SubjectSelector::new(Rectangle::new((71.0, 55.0), (243.0, 235.0)))
    }

    #[test]
    fn test_skips_bystander_outside_box() {
        let f = frame(vec![
            person(Side::Left, 400.0, 300.0, 0.9),
            person(Side::Left, 160.0, 150.0, 0.8),
        ]);
        let obs = selector().select(&f, Side::Left).unwrap().unwrap();
        assert_eq!((obs.x, obs.y, obs.confidence), (160.0, 150.0, 0.8));
        assert_eq!(obs.frame_index, 7);
        assert_eq!(obs.side, Side::Left);
    }

    #[test]
    fn test_first_match_wins() {
        let f = frame(vec![
            person(Side::Right, 100.0, 100.0, 0.5),
            person(Side::Right, 200.0, 200.0, 0.9),
        ]);
        let obs = selector().select(&f, Side::Right).unwrap().unwrap();
        assert_eq!(obs.x, 100.0);
    }

    #[test]
    fn test_box_bounds_are_inclusive() {
        let f = frame(vec![person(Side::Left, 71.0, 235.0, 0.4)]);
        assert!(selector().select(&f, Side::Left).unwrap().is_some());
    }

    #[test]
    fn test_no_qualifying_person_is_absent_not_zero() {
        let f = frame(vec![person(Side::Left, 0.0, 0.0, 0.0)]);
        assert_eq!(selector().select(&f, Side::Left).unwrap(), None);
        assert_eq!(selector().select(&frame(vec![]), Side::Left).unwrap(), None);
    }

    #[test]
    fn test_non_finite_wrist_is_malformed() {
        // 1e39 in the JSON record overflows to +inf as f32
        let f = frame(vec![person(Side::Right, 150.0, 140.0, f32::INFINITY)]);
        let err = selector().select(&f, Side::Right).unwrap_err();
        assert!(matches!(err, FrameError::MalformedFrame { .. }));
        assert_eq!(err.frame(), "frame_7.json");

        let f = frame(vec![person(Side::Left, f32::NAN, 140.0, 0.9)]);
        assert!(selector().select(&f, Side::Left).is_err());
    }

    #[test]
    fn test_short_keypoints_is_malformed() {
        let f = frame(vec![PersonPose {
            pose_keypoints_2d: vec![100.0; 15],
        }]);
        assert!(selector().select(&f, Side::Left).is_err());
    }
}
