use super::*;
use crate::foundation::error::Stage;

fn cfg(width: u32, height: u32, audio: Option<PathBuf>) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::integer(24).unwrap(),
        audio,
    }
}

fn args_of(cmd: &Command) -> Vec<String> {
    cmd.get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn position(args: &[String], needle: &str) -> usize {
    args.iter()
        .position(|a| a == needle)
        .unwrap_or_else(|| panic!("missing {needle} in {args:?}"))
}

#[test]
fn sink_config_requires_even_non_zero_dims() {
    assert!(validate_sink_config(&cfg(1280, 720, None)).is_ok());
    assert!(validate_sink_config(&cfg(0, 720, None)).is_err());
    assert!(validate_sink_config(&cfg(1279, 720, None)).is_err());
    assert!(validate_sink_config(&cfg(1280, 721, None)).is_err());
}

#[test]
fn command_streams_raw_rgb_at_the_frame_rate() {
    let opts = FfmpegSinkOpts::new("out/video.mp4");
    let args = args_of(&build_command(&opts, &cfg(1280, 720, None)));

    assert_eq!(args[0], "-y");
    assert_eq!(args[position(&args, "-s") + 1], "1280x720");
    assert_eq!(args[position(&args, "-pix_fmt") + 1], "rgb24");
    let rate = position(&args, "-r");
    assert_eq!(args[rate + 1], "24/1");
    assert!(rate < position(&args, "pipe:0"));
    assert!(args.contains(&"-an".to_string()));
    assert_eq!(args[position(&args, "-c:v") + 1], "libx264");
    assert_eq!(args.last().map(String::as_str), Some("out/video.mp4"));
}

#[test]
fn command_muxes_audio_and_stops_at_the_shorter_stream() {
    let opts = FfmpegSinkOpts::new("video.mp4").with_codec("libx265");
    let args = args_of(&build_command(
        &opts,
        &cfg(640, 360, Some(PathBuf::from("audio/music.mp3"))),
    ));

    assert!(args.windows(2).any(|w| w == ["-i", "audio/music.mp3"]));
    assert!(args.windows(2).any(|w| w == ["-map", "1:a:0"]));
    assert!(args.contains(&"-shortest".to_string()));
    assert!(!args.contains(&"-an".to_string()));
    assert_eq!(args[position(&args, "-c:v") + 1], "libx265");
    assert_eq!(args[position(&args, "-c:a") + 1], "aac");
}

#[test]
fn no_overwrite_uses_ffmpeg_n_flag() {
    let mut opts = FfmpegSinkOpts::new("video.mp4");
    opts.overwrite = false;
    let args = args_of(&build_command(&opts, &cfg(2, 2, None)));
    assert_eq!(args[0], "-n");
}

#[test]
fn begin_rejects_missing_audio_before_spawning() {
    let dir = std::env::temp_dir().join(format!("beatfade-ffmpeg-{}", std::process::id()));
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.join("out.mp4")));
    let err = sink
        .begin(cfg(4, 4, Some(dir.join("no-such-track.mp3"))))
        .unwrap_err();
    assert!(matches!(err, BeatfadeError::Encode(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn begin_refuses_to_replace_existing_output() {
    let dir = std::env::temp_dir().join(format!("beatfade-ffmpeg-keep-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("exists.mp4");
    std::fs::write(&out, b"keep me").unwrap();

    let mut opts = FfmpegSinkOpts::new(&out);
    opts.overwrite = false;
    let mut sink = FfmpegSink::new(opts);
    assert!(sink.begin(cfg(4, 4, None)).is_err());
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn frames_and_end_require_begin() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = ImageBuffer::filled(2, 2, [0, 0, 0]).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn ensure_parent_dir_creates_nested_directories() {
    let root = std::env::temp_dir().join(format!("beatfade-parent-{}", std::process::id()));
    let target = root.join("a/b/video.mp4");
    ensure_parent_dir(&target).unwrap();
    assert!(root.join("a/b").is_dir());
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn uncreatable_output_directory_is_an_encode_stage_error() {
    let root =
        std::env::temp_dir().join(format!("beatfade-parent-blocked-{}", std::process::id()));
    std::fs::create_dir_all(&root).unwrap();
    let file = root.join("plain-file");
    std::fs::write(&file, b"x").unwrap();

    let err = ensure_parent_dir(&file.join("sub/video.mp4")).unwrap_err();
    assert!(matches!(err, BeatfadeError::Encode(_)));
    assert_eq!(err.stage(), Stage::Encode);

    std::fs::remove_dir_all(&root).unwrap();
}
