use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BeatfadeError, BeatfadeResult};
use crate::frame::buffer::ImageBuffer;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Audio track to mux alongside the frames, if any.
    pub audio: Option<PathBuf>,
}

/// Sink contract for consuming the synchronized output sequence.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BeatfadeResult<()>;
    /// Push one frame in output order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &ImageBuffer) -> BeatfadeResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BeatfadeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, ImageBuffer)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, ImageBuffer)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BeatfadeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &ImageBuffer) -> BeatfadeResult<()> {
        if self.cfg.is_none() {
            return Err(BeatfadeError::encode("in-memory sink not started"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BeatfadeResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes each frame as `frame_000000.png`, `frame_000001.png`, ... into a directory.
///
/// Audio in [`SinkConfig`] is ignored.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    /// Write frames into `dir`, creating it on `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    /// Number of PNGs written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// File name used for frame `idx`.
    pub fn frame_file_name(idx: FrameIndex) -> String {
        format!("frame_{:06}.png", idx.0)
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> BeatfadeResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            BeatfadeError::encode(format!(
                "create frame directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &ImageBuffer) -> BeatfadeResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BeatfadeError::encode("png sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(BeatfadeError::encode(
                "png sink received out-of-order frame index",
            ));
        }
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(BeatfadeError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        self.last_idx = Some(idx);

        let path = self.dir.join(Self::frame_file_name(idx));
        image::save_buffer_with_format(
            &path,
            frame.as_bytes(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| BeatfadeError::encode(format!("write png '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> BeatfadeResult<()> {
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
