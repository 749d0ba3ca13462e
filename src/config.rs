use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        core::{Canvas, Fps},
        error::{BeatfadeError, BeatfadeResult},
    },
    transition::pipeline::TransitionThreading,
};

/// What to do when synchronization leaves no frames to encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Fail with [`BeatfadeError::DegenerateSync`].
    #[default]
    Error,
    /// Log a warning and finish without starting the sink; nothing is written.
    Allow,
}

/// Settings for one slideshow render.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Directory of source images, read in file-name order.
    pub images_dir: PathBuf,
    /// Music track used for beat detection and as the output's audio.
    pub audio_path: PathBuf,
    /// Output video path.
    pub out_path: PathBuf,
    /// Output frames per second.
    pub fps: u32,
    /// Interpolated frames per image pair.
    pub steps: usize,
    /// Output width; every image is resized to it.
    pub width: u32,
    /// Output height; every image is resized to it.
    pub height: u32,
    /// `ffmpeg` video codec name.
    pub codec: String,
    /// Blend image pairs in parallel.
    pub parallel: bool,
    /// Worker threads for blending; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Replace `out_path` if it exists.
    pub overwrite: bool,
    /// Behaviour when synchronization yields zero frames.
    pub degenerate: DegeneratePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            audio_path: PathBuf::from("audio/music.mp3"),
            out_path: PathBuf::from("output_video.mp4"),
            fps: 24,
            steps: 5,
            width: Canvas::HD.width,
            height: Canvas::HD.height,
            codec: "libx264".to_string(),
            parallel: true,
            threads: None,
            overwrite: true,
            degenerate: DegeneratePolicy::Error,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> BeatfadeResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            BeatfadeError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        let cfg: RenderConfig = serde_json::from_slice(&bytes).map_err(|e| {
            BeatfadeError::validation(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check numeric settings.
    pub fn validate(&self) -> BeatfadeResult<()> {
        if self.fps == 0 {
            return Err(BeatfadeError::validation("fps must be non-zero"));
        }
        if self.steps == 0 {
            return Err(BeatfadeError::validation("steps must be >= 1"));
        }
        self.canvas().validate()?;
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(BeatfadeError::validation("threads must be >= 1 when set"));
        }
        if self.codec.trim().is_empty() {
            return Err(BeatfadeError::validation("codec must be non-empty"));
        }
        Ok(())
    }

    /// Output frame rate.
    pub fn fps(&self) -> BeatfadeResult<Fps> {
        Fps::integer(self.fps)
    }

    /// Output resolution.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Blending worker-pool settings.
    pub fn threading(&self) -> TransitionThreading {
        TransitionThreading {
            parallel: self.parallel,
            threads: self.threads,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
