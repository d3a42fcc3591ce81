// src/keypoints.rs
//
// Flat keypoint layout: [x0, y0, c0, x1, y1, c1, ...]. Right wrist is
// keypoint 4 (offset 12), left wrist keypoint 7 (offset 21).

use crate::error::FrameError;
use crate::types::{PersonPose, PoseFrame, Side};

/// Shortest keypoint array that still holds both wrists
pub const MIN_KEYPOINT_VALUES: usize = 24;

/// Raw (x, y, confidence) triple for one side's wrist
pub fn wrist_keypoint(person: &PersonPose, side: Side) -> Option<(f32, f32, f32)> {
    let offset = side.wrist_offset();
    match person.pose_keypoints_2d.get(offset..offset + 3) {
        Some(&[x, y, c]) => Some((x, y, c)),
        _ => None,
    }
}

pub fn validate_frame(frame: &PoseFrame) -> Result<(), FrameError> {
    for (person_idx, person) in frame.people.iter().enumerate() {
        let len = person.pose_keypoints_2d.len();
        if len < MIN_KEYPOINT_VALUES {
            return Err(FrameError::malformed(
                frame.source.clone(),
                format!(
                    "person {} has {} keypoint values, need at least {}",
                    person_idx, len, MIN_KEYPOINT_VALUES
                ),
            ));
        }
        if len % 3 != 0 {
            return Err(FrameError::malformed(
                frame.source.clone(),
                format!(
                    "person {} keypoint array length {} is not a multiple of 3",
                    person_idx, len
                ),
            ));
        }
    }
    Ok(())
}
