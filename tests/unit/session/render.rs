use std::path::Path;

use super::*;
use crate::{
    audio::beats::StaticBeats,
    encode::sink::InMemorySink,
    foundation::{core::Fps, error::Stage},
};

struct FailingDetector;

impl BeatDetector for FailingDetector {
    fn detect(&self, _audio: &Path) -> BeatfadeResult<Vec<f64>> {
        Err(BeatfadeError::audio("no audio here"))
    }
}

fn images() -> Vec<ImageBuffer> {
    [[0u8, 0, 0], [200, 100, 0], [0, 100, 200]]
        .into_iter()
        .map(|rgb| ImageBuffer::filled(4, 2, rgb).unwrap())
        .collect()
}

fn cfg() -> RenderConfig {
    RenderConfig {
        width: 4,
        height: 2,
        ..RenderConfig::default()
    }
}

#[test]
fn beat_slice_is_pushed_to_the_sink_in_order() {
    let images = images();
    let cfg = cfg();
    let mut sink = InMemorySink::new();

    let stats = create_video(
        &cfg,
        &images,
        &StaticBeats::new(vec![0.0, 0.25]),
        &mut sink,
    )
    .unwrap();

    assert_eq!(
        stats,
        RenderStats {
            images: 3,
            transition_frames: 10,
            beats: 2,
            output_frames: 6,
            empty_slices: 0,
        }
    );
    let transitions = generate_transitions(&images, 5, &cfg.threading()).unwrap();
    let pushed: Vec<ImageBuffer> = sink.frames().iter().map(|(_, f)| f.clone()).collect();
    assert_eq!(pushed, transitions[0..6].to_vec());
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);

    let sink_cfg = sink.config().unwrap();
    assert_eq!((sink_cfg.width, sink_cfg.height), (4, 2));
    assert_eq!(sink_cfg.fps, Fps::integer(24).unwrap());
    assert_eq!(sink_cfg.audio, Some(cfg.audio_path.clone()));
    assert!(sink.is_finished());
}

#[test]
fn late_beats_are_degenerate_by_default() {
    let mut sink = InMemorySink::new();
    let err = create_video(
        &cfg(),
        &images(),
        &StaticBeats::new(vec![0.5, 1.0, 2.0]),
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, BeatfadeError::DegenerateSync(_)));
    assert!(sink.config().is_none());
}

#[test]
fn degenerate_output_can_be_allowed() {
    let cfg = RenderConfig {
        degenerate: DegeneratePolicy::Allow,
        ..cfg()
    };
    let mut sink = InMemorySink::new();
    let stats = create_video(
        &cfg,
        &images(),
        &StaticBeats::new(vec![0.5, 1.0, 2.0]),
        &mut sink,
    )
    .unwrap();

    assert_eq!(stats.output_frames, 0);
    assert_eq!(stats.empty_slices, 2);
    assert!(sink.frames().is_empty());
    assert!(sink.config().is_none());
    assert!(!sink.is_finished());
}

#[test]
fn allowed_degenerate_render_never_starts_the_encoder() {
    let dir = std::env::temp_dir().join(format!("beatfade-render-empty-{}", std::process::id()));
    let out = dir.join("video.mp4");
    let cfg = RenderConfig {
        degenerate: DegeneratePolicy::Allow,
        audio_path: dir.join("missing.mp3"),
        ..cfg()
    };
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));

    let stats = create_video(
        &cfg,
        &images(),
        &StaticBeats::new(vec![0.5, 1.0, 2.0]),
        &mut sink,
    )
    .unwrap();
    assert_eq!(stats.output_frames, 0);
    assert!(!out.exists());
    assert!(!dir.exists());
}

#[test]
fn identical_inputs_render_identical_frames() {
    let beats = StaticBeats::new(vec![0.05, 0.2, 0.3]);
    let mut first = InMemorySink::new();
    let mut second = InMemorySink::new();
    create_video(&cfg(), &images(), &beats, &mut first).unwrap();
    create_video(&cfg(), &images(), &beats, &mut second).unwrap();
    assert_eq!(first.frames(), second.frames());
    assert_eq!(first.frames().len(), 6);
}

#[test]
fn mismatched_images_abort_before_the_sink_starts() {
    let mut images = images();
    images[1] = ImageBuffer::filled(2, 2, [0, 0, 0]).unwrap();
    let mut sink = InMemorySink::new();

    let err = create_video(
        &cfg(),
        &images,
        &StaticBeats::new(vec![0.0, 0.25]),
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, BeatfadeError::DimensionMismatch { .. }));
    assert!(sink.config().is_none());
}

#[test]
fn single_image_has_no_frames_to_map() {
    let images = vec![ImageBuffer::filled(4, 2, [1, 2, 3]).unwrap()];
    let mut sink = InMemorySink::new();
    let err = create_video(
        &cfg(),
        &images,
        &StaticBeats::new(vec![0.0, 0.25]),
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, BeatfadeError::EmptyFrameSource));
}

#[test]
fn detector_errors_propagate() {
    let mut sink = InMemorySink::new();
    let err = create_video(&cfg(), &images(), &FailingDetector, &mut sink).unwrap_err();
    assert_eq!(err.stage(), Stage::Beats);
    assert!(sink.config().is_none());
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = RenderConfig {
        steps: 0,
        ..cfg()
    };
    let mut sink = InMemorySink::new();
    assert!(matches!(
        create_video(&cfg, &images(), &StaticBeats::default(), &mut sink),
        Err(BeatfadeError::Validation(_))
    ));
}
