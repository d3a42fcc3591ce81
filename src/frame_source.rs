// src/frame_source.rs
//
// Discovers and parses the per-frame pose records written by the pose
// estimator. One JSON file per frame; file-name order is frame order.

use crate::error::FrameError;
use crate::keypoints;
use crate::types::{PoseFrame, PoseRecord};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct SkippedFrame {
    pub frame_index: u64,
    pub error: FrameError,
}

/// Parsed frames plus the frames that could not be used.
/// Every frame index below `total_frames` is in exactly one of the two lists.
#[derive(Debug, Default)]
pub struct LoadedFrames {
    pub frames: Vec<PoseFrame>,
    pub skipped: Vec<SkippedFrame>,
    pub total_frames: usize,
}

impl LoadedFrames {
    pub fn from_frames(frames: Vec<PoseFrame>) -> Self {
        let total_frames = frames.len();
        Self {
            frames,
            skipped: Vec::new(),
            total_frames,
        }
    }

    pub fn skip(&mut self, frame_index: u64, error: FrameError) {
        warn!("⚠️  Skipping frame {} ({}): {}", frame_index, error.frame(), error);
        self.skipped.push(SkippedFrame { frame_index, error });
    }

    #[cfg(test)]
    pub fn is_skipped(&self, frame_index: u64) -> bool {
        self.skipped.iter().any(|s| s.frame_index == frame_index)
    }
}

pub struct FrameSource {
    files: Vec<PathBuf>,
}

impl FrameSource {
    /// List `*.json` records directly under `dir`, sorted by file name and
    /// truncated to `max_frames`.
    pub fn discover(dir: impl AsRef<Path>, max_frames: Option<usize>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            bail!("Pose record directory not found: {}", dir.display());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry
                .with_context(|| format!("Failed to list pose records in {}", dir.display()))?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|e| e.to_str()) == Some("json")
            {
                files.push(path.to_path_buf());
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        if let Some(cap) = max_frames {
            if files.len() > cap {
                info!(
                    "Frame cap reached: processing {} of {} records",
                    cap,
                    files.len()
                );
                files.truncate(cap);
            }
        }

        info!("Found {} pose records in {}", files.len(), dir.display());
        Ok(Self { files })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Parse every record. Unreadable or unparsable files are fatal; a record
    /// with unusable keypoints only skips that frame.
    pub fn load(&self) -> Result<LoadedFrames> {
        let mut loaded = LoadedFrames {
            total_frames: self.files.len(),
            ..Default::default()
        };

        for (idx, path) in self.files.iter().enumerate() {
            let frame_index = idx as u64;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read pose record {}", path.display()))?;

            let record: PoseRecord = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse pose record {}", path.display()))?;

            match frame_from_record(frame_index, &name, record) {
                Ok(frame) => loaded.frames.push(frame),
                Err(e) => loaded.skip(frame_index, e),
            }
        }

        debug!(
            "Loaded {} frames, skipped {}",
            loaded.frames.len(),
            loaded.skipped.len()
        );
        Ok(loaded)
    }
}

pub fn frame_from_record(
    frame_index: u64,
    source: &str,
    record: PoseRecord,
) -> Result<PoseFrame, FrameError> {
    let frame = PoseFrame {
        frame_index,
        source: source.to_string(),
        people: record.people,
    };
    keypoints::validate_frame(&frame)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn people(people: &[Vec<f32>]) -> serde_json::Value {
        let people: Vec<_> = people
            .iter()
            .map(|k| serde_json::json!({ "person_id": [-1], "pose_keypoints_2d": k }))
            .collect();
        serde_json::json!({ "version": 1.3, "people": people })
    }

    fn pose_record(people_keypoints: &[Vec<f32>]) -> PoseRecord {
        serde_json::from_value(people(people_keypoints)).unwrap()
    }

    #[test]
    fn test_frame_from_record_reads_people() {
        let record = pose_record(&[vec![0.0; 75], vec![1.0; 75]]);
        let frame = frame_from_record(3, "f3.json", record).unwrap();
        assert_eq!(frame.frame_index, 3);
        assert_eq!(frame.people.len(), 2);
    }

    #[test]
    fn test_record_without_people_is_empty_frame() {
        let record: PoseRecord = serde_json::from_str("{\"people\": []}").unwrap();
        let frame = frame_from_record(0, "f0.json", record).unwrap();
        assert!(frame.people.is_empty());
    }

    #[test]
    fn test_short_array_is_malformed() {
        let err = frame_from_record(0, "short.json", pose_record(&[vec![0.0; 15]])).unwrap_err();
        assert!(matches!(err, FrameError::MalformedFrame { .. }));
        assert_eq!(err.frame(), "short.json");
    }

    #[test]
    fn test_discover_sorts_filters_and_caps() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c_2.json", "a_0.json", "b_1.json", "notes.txt"] {
            fs::write(dir.path().join(name), "{\"people\": []}").unwrap();
        }

        let source = FrameSource::discover(dir.path(), None).unwrap();
        let names: Vec<_> = source
            .files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_0.json", "b_1.json", "c_2.json"]);

        let capped = FrameSource::discover(dir.path(), Some(2)).unwrap();
        assert_eq!(capped.files().len(), 2);
        assert_eq!(capped.files()[1].file_name().unwrap(), "b_1.json");
    }

    #[test]
    fn test_discover_missing_dir_is_fatal() {
        assert!(FrameSource::discover("/nonexistent/pose/records", None).is_err());
    }

    #[test]
    fn test_load_unparsable_record_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f0.json"), "{\"people\": []}").unwrap();
        fs::write(dir.path().join("f1.json"), "garbage").unwrap();

        let err = FrameSource::discover(dir.path(), None)
            .unwrap()
            .load()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("f1.json"));
    }

    #[test]
    fn test_load_skips_malformed_frames_and_keeps_indices() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, k: Vec<f32>| {
            fs::write(dir.path().join(name), people(&[k]).to_string()).unwrap();
        };
        write("f0.json", vec![0.0; 75]);
        write("f1.json", vec![0.0; 12]);
        write("f2.json", vec![0.0; 75]);

        let loaded = FrameSource::discover(dir.path(), None)
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(loaded.total_frames, 3);
        assert_eq!(loaded.frames.len(), 2);
        assert_eq!(loaded.frames[1].frame_index, 2);
        assert!(loaded.is_skipped(1));
        assert!(matches!(
            loaded.skipped[0].error,
            FrameError::MalformedFrame { .. }
        ));
    }
}
