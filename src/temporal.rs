// src/temporal.rs
//
// Frame-index filters that run after classification. Both expect off-wheel
// frame indices in increasing order and must run sequentially.

use crate::types::TimeRange;

/// Keep only frames that have an off-wheel neighbour (previous or next in the
/// list) no more than `buffer` frames away. A lone frame never survives.
pub fn debounce(frames: &[u64], buffer: u64) -> Vec<u64> {
    let n = frames.len();
    if n < 2 {
        return Vec::new();
    }

    let near = |a: u64, b: u64| a.abs_diff(b) <= buffer;

    frames
        .iter()
        .enumerate()
        .filter(|&(i, &frame)| {
            let prev = i > 0 && near(frame, frames[i - 1]);
            let next = i + 1 < n && near(frame, frames[i + 1]);
            prev || next
        })
        .map(|(_, &frame)| frame)
        .collect()
}

/// Merge frames whose gap to the current range end is at most `gap` into
/// inclusive ranges, in one left-to-right pass.
pub fn coalesce(frames: &[u64], gap: u64) -> Vec<TimeRange> {
    let Some((&first, rest)) = frames.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut current = TimeRange::single(first);

    for &frame in rest {
        if frame.saturating_sub(current.end_frame) <= gap {
            current.end_frame = frame;
        } else {
            ranges.push(current);
            current = TimeRange::single(frame);
        }
    }

    ranges.push(current);
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(pairs: &[(u64, u64)]) -> Vec<TimeRange> {
        pairs
            .iter()
            .map(|&(start_frame, end_frame)| TimeRange {
                start_frame,
                end_frame,
            })
            .collect()
    }

    #[test]
    fn test_debounce_single_frame_is_dropped() {
        assert!(debounce(&[42], 5).is_empty());
        assert!(debounce(&[], 5).is_empty());
    }

    #[test]
    fn test_debounce_drops_isolated_tail() {
        assert_eq!(debounce(&[10, 11, 50], 5), vec![10, 11]);
    }

    #[test]
    fn test_debounce_edges_and_middle() {
        // 0 isolated at head, 30 isolated in the middle, 60/64 paired at tail
        assert_eq!(debounce(&[0, 20, 24, 30, 60, 64], 5), vec![20, 24, 60, 64]);
        // distance exactly equal to buffer is kept
        assert_eq!(debounce(&[5, 10], 5), vec![5, 10]);
        assert!(debounce(&[5, 11], 5).is_empty());
    }

    #[test]
    fn test_coalesce_documented_example() {
        let frames = [7, 10, 15, 31, 35, 37, 51, 60, 78];
        assert_eq!(
            coalesce(&frames, 15),
            ranges(&[(7, 15), (31, 37), (51, 60), (78, 78)])
        );
        assert_eq!(coalesce(&frames, 25), ranges(&[(7, 15), (31, 60), (78, 78)]));
    }

    #[test]
    fn test_coalesce_empty_and_single() {
        assert!(coalesce(&[], 15).is_empty());
        assert_eq!(coalesce(&[9], 15), ranges(&[(9, 9)]));
    }

    #[test]
    fn test_every_debounced_frame_lands_in_one_range() {
        let frames = [3, 4, 9, 40, 41, 42, 43, 90, 200, 203];
        let kept = debounce(&frames, 5);
        let out = coalesce(&kept, 15);

        for f in &kept {
            assert_eq!(out.iter().filter(|r| r.contains(*f)).count(), 1);
        }
        for pair in out.windows(2) {
            assert!(pair[0].end_frame < pair[1].start_frame);
        }
    }
}
