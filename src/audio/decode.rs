use std::path::Path;

use crate::foundation::error::{BeatfadeError, BeatfadeResult};

/// Sample rate used for beat analysis.
pub const ANALYSIS_SAMPLE_RATE: u32 = 22_050;

/// Decoded mono PCM.
#[derive(Clone, Debug)]
pub struct MonoPcm {
    /// Samples per second.
    pub sample_rate: u32,
    /// Samples in `[-1, 1]`.
    pub samples: Vec<f32>,
}

impl MonoPcm {
    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.samples.len() as f64 / f64::from(self.sample_rate)
        }
    }
}

/// Decode any audio file `ffmpeg` understands to mono `f32` at `sample_rate`.
#[cfg(feature = "media-ffmpeg")]
pub fn decode_audio_f32_mono(path: &Path, sample_rate: u32) -> BeatfadeResult<MonoPcm> {
    if sample_rate == 0 {
        return Err(BeatfadeError::validation("audio sample_rate must be non-zero"));
    }
    if !path.is_file() {
        return Err(BeatfadeError::audio(format!(
            "audio file '{}' does not exist",
            path.display()
        )));
    }

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "1",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| BeatfadeError::audio(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(BeatfadeError::audio(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    Ok(MonoPcm {
        sample_rate,
        samples: f32le_to_samples(&out.stdout)?,
    })
}

/// Decode any audio file `ffmpeg` understands to mono `f32` at `sample_rate`.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn decode_audio_f32_mono(_path: &Path, _sample_rate: u32) -> BeatfadeResult<MonoPcm> {
    Err(BeatfadeError::audio(
        "audio decoding requires the 'media-ffmpeg' feature",
    ))
}

pub(crate) fn f32le_to_samples(bytes: &[u8]) -> BeatfadeResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(BeatfadeError::audio(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
