// src/events.rs
//
// Frame ranges -> "hand off wheel" events, and the JSONL sink they are
// appended to.

use crate::types::{HandOffEvent, Side, TimeRange};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// `minutes:seconds` for a frame index, seconds rounded to 6 decimals and
/// always printed with a fractional part (`"0:15.0"`, `"1:2.066667"`).
pub fn frame_to_timestamp(frame_index: u64, fps: f64) -> String {
    let total_secs = frame_index as f64 / fps;
    let mut minutes = (total_secs / 60.0).floor() as u64;
    let mut secs = round_micro(total_secs.rem_euclid(60.0));

    // 59.9999996 rounds up to a full minute
    if secs >= 60.0 {
        minutes += 1;
        secs -= 60.0;
    }

    format!("{}:{}", minutes, format_seconds(secs))
}

fn round_micro(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

fn format_seconds(secs: f64) -> String {
    let s = secs.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

pub fn build_events(side: Side, ranges: &[TimeRange], fps: f64) -> Vec<HandOffEvent> {
    ranges
        .iter()
        .map(|range| HandOffEvent {
            event: side.event_label().to_string(),
            start: frame_to_timestamp(range.start_frame, fps),
            end: frame_to_timestamp(range.end_frame, fps),
        })
        .collect()
}

pub struct EventSink;

impl EventSink {
    /// Append one JSON object per line, creating the file if needed.
    pub fn append(path: impl AsRef<Path>, events: &[HandOffEvent]) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open event output {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        for event in events {
            let json_line = serde_json::to_string(event)?;
            writeln!(writer, "{}", json_line)?;
        }
        writer.flush()?;

        info!("💾 Wrote {} events to {}", events.len(), path.display());
        Ok(())
    }
}
