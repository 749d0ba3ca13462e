use crate::foundation::{
    core::Fps,
    error::{BeatfadeError, BeatfadeResult},
};

/// Convert beat timestamps (seconds) to frame indices at `fps`.
///
/// Each index is `floor(t * fps)` clamped to `[0, frame_count - 1]`. The output has one entry per
/// input timestamp in the same order; nothing is deduplicated or reordered.
pub fn map_beats_to_frames(
    beats: &[f64],
    frame_count: usize,
    fps: Fps,
) -> BeatfadeResult<Vec<usize>> {
    if frame_count == 0 {
        return Err(BeatfadeError::EmptyFrameSource);
    }
    let max_idx = (frame_count - 1) as u64;

    Ok(beats
        .iter()
        .map(|&t| fps.secs_to_frames_floor(t).min(max_idx) as usize)
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/sync/mapper.rs"]
mod tests;
