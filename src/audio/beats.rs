use std::path::Path;

use crate::{
    audio::decode::{ANALYSIS_SAMPLE_RATE, MonoPcm, decode_audio_f32_mono},
    foundation::error::{BeatfadeError, BeatfadeResult},
};

/// Source of beat timestamps for an audio file.
///
/// Implementations return non-decreasing timestamps in seconds.
pub trait BeatDetector: Send + Sync {
    /// Detect beats in the audio file at `audio`.
    fn detect(&self, audio: &Path) -> BeatfadeResult<Vec<f64>>;
}

/// A fixed list of beat timestamps, independent of the audio content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticBeats {
    timestamps: Vec<f64>,
}

impl StaticBeats {
    /// Use `timestamps` verbatim.
    pub fn new(timestamps: Vec<f64>) -> Self {
        Self { timestamps }
    }

    /// Read a JSON array of seconds, e.g. `[0.5, 1.0, 1.5]`.
    pub fn from_json_path(path: &Path) -> BeatfadeResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            BeatfadeError::audio(format!("read beats file '{}': {e}", path.display()))
        })?;
        let timestamps: Vec<f64> = serde_json::from_slice(&bytes).map_err(|e| {
            BeatfadeError::audio(format!("parse beats file '{}': {e}", path.display()))
        })?;
        Ok(Self { timestamps })
    }

    /// Borrow the timestamps.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }
}

impl BeatDetector for StaticBeats {
    fn detect(&self, _audio: &Path) -> BeatfadeResult<Vec<f64>> {
        Ok(self.timestamps.clone())
    }
}

/// Tuning knobs for [`EnergyBeatDetector`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeatTrackerOpts {
    /// Analysis sample rate in Hz.
    pub sample_rate: u32,
    /// Samples between consecutive envelope frames.
    pub hop: usize,
    /// Samples per energy window.
    pub window: usize,
    /// Slowest tempo considered.
    pub min_bpm: f64,
    /// Fastest tempo considered.
    pub max_bpm: f64,
    /// Tempo the estimator is biased towards when several periods score alike.
    pub prior_bpm: f64,
    /// Half-width of the beat snapping window, as a fraction of the beat period.
    pub tolerance: f64,
}

impl Default for BeatTrackerOpts {
    fn default() -> Self {
        Self {
            sample_rate: ANALYSIS_SAMPLE_RATE,
            hop: 512,
            window: 1024,
            min_bpm: 60.0,
            max_bpm: 200.0,
            prior_bpm: 120.0,
            tolerance: 0.1,
        }
    }
}

impl BeatTrackerOpts {
    /// Reject settings the tracker cannot work with.
    pub fn validate(&self) -> BeatfadeResult<()> {
        if self.sample_rate == 0 {
            return Err(BeatfadeError::validation("beat sample_rate must be non-zero"));
        }
        if self.hop == 0 || self.window == 0 {
            return Err(BeatfadeError::validation(
                "beat hop/window must be non-zero",
            ));
        }
        if !(self.min_bpm > 0.0 && self.min_bpm < self.max_bpm && self.max_bpm.is_finite()) {
            return Err(BeatfadeError::validation(
                "beat bpm range must satisfy 0 < min_bpm < max_bpm",
            ));
        }
        if !(self.prior_bpm > 0.0 && self.prior_bpm.is_finite()) {
            return Err(BeatfadeError::validation("beat prior_bpm must be positive"));
        }
        if !(0.0..0.5).contains(&self.tolerance) {
            return Err(BeatfadeError::validation(
                "beat tolerance must be in [0, 0.5)",
            ));
        }
        Ok(())
    }

    /// Seconds between envelope frames.
    pub fn hop_secs(&self) -> f64 {
        self.hop as f64 / f64::from(self.sample_rate)
    }
}

/// Tempo-locked beat tracker over a log-energy onset envelope.
///
/// Audio is decoded to mono PCM through `ffmpeg`, reduced to an onset-strength envelope, the beat
/// period is picked by autocorrelation, and beats are placed one period apart, each snapped to the
/// strongest onset near its expected position.
#[derive(Clone, Debug, Default)]
pub struct EnergyBeatDetector {
    opts: BeatTrackerOpts,
}

impl EnergyBeatDetector {
    /// Build a detector with custom options.
    pub fn new(opts: BeatTrackerOpts) -> BeatfadeResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Options in use.
    pub fn opts(&self) -> &BeatTrackerOpts {
        &self.opts
    }
}

impl BeatDetector for EnergyBeatDetector {
    #[tracing::instrument(skip(self))]
    fn detect(&self, audio: &Path) -> BeatfadeResult<Vec<f64>> {
        let pcm = decode_audio_f32_mono(audio, self.opts.sample_rate)?;
        let beats = detect_beats_pcm(&pcm, &self.opts)?;
        tracing::info!(
            beats = beats.len(),
            duration_secs = pcm.duration_secs(),
            "detected beats"
        );
        Ok(beats)
    }
}

/// Beat timestamps (seconds) for already decoded PCM.
pub fn detect_beats_pcm(pcm: &MonoPcm, opts: &BeatTrackerOpts) -> BeatfadeResult<Vec<f64>> {
    opts.validate()?;
    if pcm.sample_rate != opts.sample_rate {
        return Err(BeatfadeError::audio(format!(
            "pcm sample rate {} does not match tracker sample rate {}",
            pcm.sample_rate, opts.sample_rate
        )));
    }

    let envelope = onset_envelope(&pcm.samples, opts.window, opts.hop);
    let Some(period) = estimate_period(&envelope, opts) else {
        tracing::debug!("no periodic onsets found");
        return Ok(Vec::new());
    };
    tracing::debug!(
        period_frames = period,
        bpm = 60.0 / (period as f64 * opts.hop_secs()),
        "estimated tempo"
    );

    let hop_secs = opts.hop_secs();
    Ok(track_beats(&envelope, period, opts.tolerance)
        .into_iter()
        .map(|f| f as f64 * hop_secs)
        .collect())
}

/// Half-wave rectified difference of compressed frame energy.
///
/// Frame `i` covers `samples[i * hop .. i * hop + window]`. The energy before the first frame is
/// taken as silence, so a signal that starts loud has an onset at frame 0.
pub fn onset_envelope(samples: &[f32], window: usize, hop: usize) -> Vec<f32> {
    if samples.is_empty() || window == 0 || hop == 0 {
        return Vec::new();
    }

    let frames = samples.len().div_ceil(hop);
    let mut out = Vec::with_capacity(frames);
    let mut prev = 0.0f32;
    for i in 0..frames {
        let start = i * hop;
        let end = (start + window).min(samples.len());
        let chunk = &samples[start..end];
        let energy = chunk.iter().map(|s| s * s).sum::<f32>() / window as f32;
        let compressed = (1.0 + 1000.0 * energy).ln();
        out.push((compressed - prev).max(0.0));
        prev = compressed;
    }
    out
}

/// Beat period in envelope frames, or `None` when the envelope carries no periodicity.
///
/// Candidates are scored by the length-normalized autocorrelation of the envelope, weighted by a
/// log-normal tempo prior centred on `opts.prior_bpm`.
pub fn estimate_period(envelope: &[f32], opts: &BeatTrackerOpts) -> Option<usize> {
    let hop_secs = opts.hop_secs();
    let min_lag = ((60.0 / (opts.max_bpm * hop_secs)).ceil() as usize).max(1);
    let max_lag = ((60.0 / (opts.min_bpm * hop_secs)).floor() as usize)
        .min(envelope.len().saturating_sub(1));
    if min_lag > max_lag {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for lag in min_lag..=max_lag {
        let n = envelope.len() - lag;
        let acf = envelope[..n]
            .iter()
            .zip(&envelope[lag..])
            .map(|(a, b)| f64::from(*a) * f64::from(*b))
            .sum::<f64>()
            / n as f64;
        let bpm = 60.0 / (lag as f64 * hop_secs);
        let octaves = (bpm / opts.prior_bpm).log2();
        let score = acf * (-0.5 * octaves * octaves).exp();
        if score > 0.0 && best.is_none_or(|(_, s)| score > s) {
            best = Some((lag, score));
        }
    }
    best.map(|(lag, _)| lag)
}

/// Envelope frame indices of beats spaced `period` apart.
///
/// The first beat is the strongest onset within one period of the first non-zero onset. Each
/// following beat is the strongest onset within `tolerance * period` frames of one period after
/// the previous beat, or exactly one period later when that window is silent.
pub fn track_beats(envelope: &[f32], period: usize, tolerance: f64) -> Vec<usize> {
    if envelope.is_empty() || period == 0 {
        return Vec::new();
    }

    let Some(start) = envelope.iter().position(|&v| v > 0.0) else {
        return Vec::new();
    };
    let first = argmax(envelope, start, (start + period).min(envelope.len())).unwrap_or(start);

    let slack = ((period as f64 * tolerance).round() as usize).max(1);
    let mut beats = vec![first];
    let mut pos = first;
    loop {
        let expected = pos + period;
        if expected >= envelope.len() {
            break;
        }
        let lo = expected.saturating_sub(slack).max(pos + 1);
        let hi = (expected + slack + 1).min(envelope.len());
        let next = argmax(envelope, lo, hi).unwrap_or(expected);
        beats.push(next);
        pos = next;
    }
    beats
}

/// Index of the largest positive value in `values[lo..hi]`, earliest on ties.
fn argmax(values: &[f32], lo: usize, hi: usize) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate().take(hi).skip(lo) {
        if v > 0.0 && best.is_none_or(|(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/beats.rs"]
mod tests;
