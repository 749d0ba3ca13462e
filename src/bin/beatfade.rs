use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "beatfade", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a beat-synchronized MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the beat timestamps detected in an audio file as JSON.
    Beats(BeatsArgs),
    /// Write the beat-synchronized frames as a PNG sequence.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct ShapeArgs {
    /// Output frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Interpolated frames per image pair.
    #[arg(long)]
    steps: Option<usize>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Worker threads for blending.
    #[arg(long)]
    threads: Option<usize>,

    /// Blend image pairs on the calling thread.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Succeed without writing output instead of failing when no frames survive.
    #[arg(long, default_value_t = false)]
    allow_empty: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// JSON render config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of source images.
    #[arg(long)]
    images: Option<PathBuf>,

    /// Music track.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Output video path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// ffmpeg video codec.
    #[arg(long)]
    codec: Option<String>,

    /// JSON array of beat timestamps to use instead of detecting them.
    #[arg(long)]
    beats: Option<PathBuf>,

    /// Fail if the output file already exists.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    #[command(flatten)]
    shape: ShapeArgs,
}

#[derive(Parser, Debug)]
struct BeatsArgs {
    /// Audio file to analyse.
    #[arg(long)]
    audio: PathBuf,

    /// Slowest tempo considered.
    #[arg(long, default_value_t = 60.0)]
    min_bpm: f64,

    /// Fastest tempo considered.
    #[arg(long, default_value_t = 200.0)]
    max_bpm: f64,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Directory of source images.
    #[arg(long)]
    images: PathBuf,

    /// JSON array of beat timestamps.
    #[arg(long)]
    beats: PathBuf,

    /// Output directory for PNG frames.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    shape: ShapeArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Beats(args) => cmd_beats(args),
        Command::Frames(args) => cmd_frames(args),
    };

    if let Err(err) = &result
        && let Some(e) = err.downcast_ref::<beatfade::BeatfadeError>()
    {
        tracing::error!(stage = %e.stage(), "{e}");
    }
    result
}

fn apply_shape(cfg: &mut beatfade::RenderConfig, shape: &ShapeArgs) {
    if let Some(fps) = shape.fps {
        cfg.fps = fps;
    }
    if let Some(steps) = shape.steps {
        cfg.steps = steps;
    }
    if let Some(width) = shape.width {
        cfg.width = width;
    }
    if let Some(height) = shape.height {
        cfg.height = height;
    }
    if shape.threads.is_some() {
        cfg.threads = shape.threads;
    }
    if shape.sequential {
        cfg.parallel = false;
    }
    if shape.allow_empty {
        cfg.degenerate = beatfade::DegeneratePolicy::Allow;
    }
}

fn make_detector(beats: Option<&PathBuf>) -> anyhow::Result<Box<dyn beatfade::BeatDetector>> {
    Ok(match beats {
        Some(path) => Box::new(beatfade::StaticBeats::from_json_path(path)?),
        None => Box::new(beatfade::EnergyBeatDetector::default()),
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match args.config.as_ref() {
        Some(path) => beatfade::RenderConfig::from_path(path)?,
        None => beatfade::RenderConfig::default(),
    };
    if let Some(images) = args.images {
        cfg.images_dir = images;
    }
    if let Some(audio) = args.audio {
        cfg.audio_path = audio;
    }
    if let Some(out) = args.out {
        cfg.out_path = out;
    }
    if let Some(codec) = args.codec {
        cfg.codec = codec;
    }
    if args.no_overwrite {
        cfg.overwrite = false;
    }
    apply_shape(&mut cfg, &args.shape);

    let detector = make_detector(args.beats.as_ref())?;
    let stats = beatfade::render_video_file(&cfg, detector.as_ref())?;

    eprintln!(
        "wrote {} ({} frames from {} images, {} beats)",
        cfg.out_path.display(),
        stats.output_frames,
        stats.images,
        stats.beats
    );
    Ok(())
}

fn cmd_beats(args: BeatsArgs) -> anyhow::Result<()> {
    let detector = beatfade::EnergyBeatDetector::new(beatfade::BeatTrackerOpts {
        min_bpm: args.min_bpm,
        max_bpm: args.max_bpm,
        ..beatfade::BeatTrackerOpts::default()
    })?;
    let beats = beatfade::BeatDetector::detect(&detector, &args.audio)?;
    let json = serde_json::to_string_pretty(&beats).context("serialize beat timestamps")?;
    println!("{json}");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut cfg = beatfade::RenderConfig {
        images_dir: args.images,
        out_path: args.out.clone(),
        ..beatfade::RenderConfig::default()
    };
    apply_shape(&mut cfg, &args.shape);
    cfg.validate()?;

    let detector = beatfade::StaticBeats::from_json_path(&args.beats)?;
    let images = beatfade::load_images(&cfg.images_dir, cfg.canvas())?;
    let mut sink = beatfade::PngSequenceSink::new(&args.out);
    let stats = beatfade::create_video(&cfg, &images, &detector, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.output_frames,
        args.out.display()
    );
    Ok(())
}
