use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BeatfadeError, BeatfadeResult};
use crate::frame::buffer::{ImageBuffer, PixelFormat};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output video file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// `ffmpeg` video encoder name.
    pub codec: String,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an H.264 MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            codec: "libx264".to_string(),
        }
    }

    /// Replace the video codec.
    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }
}

/// Sink that spawns the system `ffmpeg`, streams raw RGB frames to stdin and muxes the audio
/// track given in `SinkConfig.audio`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> BeatfadeResult<()> {
        validate_sink_config(&cfg)?;
        if self.opts.codec.trim().is_empty() {
            return Err(BeatfadeError::validation("ffmpeg codec must be non-empty"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(BeatfadeError::encode(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if let Some(audio) = cfg.audio.as_ref()
            && !audio.is_file()
        {
            return Err(BeatfadeError::encode(format!(
                "audio file '{}' does not exist",
                audio.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(BeatfadeError::encode(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let mut cmd = build_command(&self.opts, &cfg);
        tracing::debug!(?cmd, "spawning ffmpeg");

        let mut child = cmd.spawn().map_err(|e| {
            BeatfadeError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BeatfadeError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| BeatfadeError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &ImageBuffer) -> BeatfadeResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BeatfadeError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(BeatfadeError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(BeatfadeError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        if frame.format() != PixelFormat::Rgb8 {
            return Err(BeatfadeError::encode("ffmpeg sink expects rgb8 frames"));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(BeatfadeError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(frame.as_bytes()).map_err(|e| {
            BeatfadeError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> BeatfadeResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| BeatfadeError::encode("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            BeatfadeError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| BeatfadeError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| BeatfadeError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(BeatfadeError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        tracing::info!(out = %self.opts.out_path.display(), "encoded video");
        Ok(())
    }
}

fn validate_sink_config(cfg: &SinkConfig) -> BeatfadeResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(BeatfadeError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(BeatfadeError::validation(
            "ffmpeg sink width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(BeatfadeError::validation(
            "ffmpeg sink width/height must be even (required for yuv420p output)",
        ));
    }
    Ok(())
}

fn build_command(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    if opts.overwrite {
        cmd.arg("-y");
    } else {
        cmd.arg("-n");
    }

    cmd.args([
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        PixelFormat::Rgb8.ffmpeg_name(),
        "-s",
        &format!("{}x{}", cfg.width, cfg.height),
    ]);
    push_input_fps(&mut cmd, cfg.fps);
    cmd.args(["-i", "pipe:0"]);

    if let Some(audio) = cfg.audio.as_ref() {
        cmd.arg("-i").arg(audio).args([
            "-map",
            "0:v:0",
            "-map",
            "1:a:0",
            "-c:v",
            opts.codec.as_str(),
            "-pix_fmt",
            "yuv420p",
            "-c:a",
            "aac",
            "-shortest",
            "-movflags",
            "+faststart",
        ]);
    } else {
        cmd.args([
            "-an",
            "-c:v",
            opts.codec.as_str(),
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
    }
    cmd.arg(&opts.out_path);
    cmd
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // rawvideo input needs `-r` before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> BeatfadeResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            BeatfadeError::encode(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
