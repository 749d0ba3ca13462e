use crate::frame::buffer::ImageBuffer;

/// Counters describing one [`synchronize_with_report`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Consecutive boundary pairs visited.
    pub slices: usize,
    /// Pairs that contributed no frames (equal or inverted boundaries).
    pub empty_slices: usize,
    /// Pairs whose start boundary is after their end boundary.
    pub inverted_slices: usize,
    /// Frames in the output sequence.
    pub output_frames: usize,
}

impl SyncReport {
    /// `true` when synchronization produced no frames at all.
    pub fn is_degenerate(&self) -> bool {
        self.output_frames == 0
    }
}

/// Concatenate `frames[b[i]..b[i + 1]]` for every consecutive boundary pair.
///
/// Inverted pairs contribute nothing; fewer than two boundaries yields an empty sequence.
pub fn synchronize(frames: &[ImageBuffer], boundaries: &[usize]) -> Vec<ImageBuffer> {
    synchronize_with_report(frames, boundaries).0
}

/// [`synchronize`], also returning slice counters.
pub fn synchronize_with_report(
    frames: &[ImageBuffer],
    boundaries: &[usize],
) -> (Vec<ImageBuffer>, SyncReport) {
    let mut out = Vec::new();
    let mut report = SyncReport::default();

    for (i, pair) in boundaries.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        report.slices += 1;
        if start > end {
            report.inverted_slices += 1;
            tracing::warn!(slice = i, start, end, "inverted beat boundaries, slice is empty");
        }

        let end = end.min(frames.len());
        if start >= end {
            report.empty_slices += 1;
            continue;
        }
        out.extend_from_slice(&frames[start..end]);
    }

    report.output_frames = out.len();
    (out, report)
}

#[cfg(test)]
#[path = "../../tests/unit/sync/synchronizer.rs"]
mod tests;
