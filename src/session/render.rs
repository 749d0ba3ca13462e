use crate::{
    assets::loader::load_images,
    audio::beats::BeatDetector,
    config::{DegeneratePolicy, RenderConfig},
    encode::{
        ffmpeg::{FfmpegSink, FfmpegSinkOpts},
        sink::{FrameSink, SinkConfig},
    },
    foundation::{
        core::FrameIndex,
        error::{BeatfadeError, BeatfadeResult},
    },
    frame::buffer::ImageBuffer,
    sync::{mapper::map_beats_to_frames, synchronizer::synchronize_with_report},
    transition::pipeline::generate_transitions,
};

/// Counters for one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Source images.
    pub images: usize,
    /// Frames produced by the transition pipeline.
    pub transition_frames: usize,
    /// Beat timestamps returned by the detector.
    pub beats: usize,
    /// Frames handed to the sink.
    pub output_frames: usize,
    /// Boundary pairs that contributed no frames.
    pub empty_slices: usize,
}

/// Beat-synchronize crossfades between `images` and stream the result into `sink`.
///
/// Pipeline:
/// 1. crossfade every adjacent image pair ([`generate_transitions`])
/// 2. detect beats in `cfg.audio_path`
/// 3. map beats to frame boundaries ([`map_beats_to_frames`])
/// 4. keep the frames between consecutive boundaries ([`synchronize_with_report`])
/// 5. push the survivors to `sink`, with `cfg.audio_path` as the audio track
///
/// Any stage failing aborts the render before the sink is started. When no frames survive and
/// `cfg.degenerate` is [`DegeneratePolicy::Allow`], the sink is never started and no output is
/// written.
#[tracing::instrument(skip_all, fields(images = images.len(), audio = %cfg.audio_path.display()))]
pub fn create_video(
    cfg: &RenderConfig,
    images: &[ImageBuffer],
    detector: &dyn BeatDetector,
    sink: &mut dyn FrameSink,
) -> BeatfadeResult<RenderStats> {
    cfg.validate()?;
    let fps = cfg.fps()?;

    let transitions = generate_transitions(images, cfg.steps, &cfg.threading())?;
    let transition_frames = transitions.len();
    tracing::info!(frames = transition_frames, "generated transitions");

    let beats = detector.detect(&cfg.audio_path)?;
    let boundaries = map_beats_to_frames(&beats, transition_frames, fps)?;
    let (frames, report) = synchronize_with_report(&transitions, &boundaries);
    drop(transitions);
    tracing::info!(
        beats = beats.len(),
        output_frames = report.output_frames,
        empty_slices = report.empty_slices,
        "synchronized frames to beats"
    );

    let stats = RenderStats {
        images: images.len(),
        transition_frames,
        beats: beats.len(),
        output_frames: frames.len(),
        empty_slices: report.empty_slices,
    };

    let Some(first) = frames.first() else {
        let msg = format!(
            "{} beats over {} boundary pairs selected no frames",
            beats.len(),
            report.slices
        );
        return match cfg.degenerate {
            DegeneratePolicy::Error => Err(BeatfadeError::degenerate(msg)),
            DegeneratePolicy::Allow => {
                tracing::warn!("{msg}; nothing to encode, sink not started");
                Ok(stats)
            }
        };
    };

    sink.begin(SinkConfig {
        width: first.width(),
        height: first.height(),
        fps,
        audio: Some(cfg.audio_path.clone()),
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()?;

    Ok(stats)
}

/// Load `cfg.images_dir`, then [`create_video`] into an MP4 at `cfg.out_path` via `ffmpeg`.
pub fn render_video_file(
    cfg: &RenderConfig,
    detector: &dyn BeatDetector,
) -> BeatfadeResult<RenderStats> {
    cfg.validate()?;
    let images = load_images(&cfg.images_dir, cfg.canvas())?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: cfg.out_path.clone(),
        overwrite: cfg.overwrite,
        codec: cfg.codec.clone(),
    });
    create_video(cfg, &images, detector, &mut sink)
}

#[cfg(test)]
#[path = "../../tests/unit/session/render.rs"]
mod tests;
