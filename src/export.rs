// src/export.rs
//
// Per-frame wrist table as CSV, for inspecting a run by hand.

use crate::pipeline::PipelineReport;
use crate::types::ContactStatus;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct ObservationRow<'a> {
    frame_index: u64,
    side: &'a str,
    x: Option<f32>,
    y: Option<f32>,
    confidence: Option<f32>,
    status: &'a str,
}

/// One row per frame and side; skipped frames are listed with status `skipped`.
pub fn write_observations_csv(path: impl AsRef<Path>, report: &PipelineReport) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut rows = 0usize;

    for side_report in &report.sides {
        let side = side_report.side.as_str();

        // classifications are in frame order with gaps for skipped frames
        let mut classified = side_report.classifications.iter().peekable();

        for frame_index in 0..report.stats.total_frames as u64 {
            let classification = classified.next_if(|c| c.frame_index == frame_index);

            let row = match classification {
                Some(c) => ObservationRow {
                    frame_index,
                    side,
                    x: c.observation.map(|o| o.x),
                    y: c.observation.map(|o| o.y),
                    confidence: c.observation.map(|o| o.confidence),
                    status: status_name(c.status),
                },
                None => ObservationRow {
                    frame_index,
                    side,
                    x: None,
                    y: None,
                    confidence: None,
                    status: "skipped",
                },
            };
            wtr.serialize(row)?;
            rows += 1;
        }
    }

    wtr.flush()?;
    info!("Wrote {} observation rows to {}", rows, path.display());
    Ok(())
}

fn status_name(status: ContactStatus) -> &'static str {
    match status {
        ContactStatus::OnWheel => "on_wheel",
        ContactStatus::OffWheel => "off_wheel",
        ContactStatus::Absent => "absent",
    }
}
