//! beatfade turns an ordered set of still images and a music track into a video whose crossfades
//! land on the beat.
//!
//! # Pipeline overview
//!
//! 1. **Load**: a directory of images -> `Vec<ImageBuffer>` at a fixed resolution
//! 2. **Transition**: every adjacent pair is crossfaded in parallel -> transition frames
//! 3. **Beats**: the audio track -> beat timestamps (seconds)
//! 4. **Map**: timestamps -> frame boundaries at the output frame rate
//! 5. **Synchronize**: the frames between consecutive boundaries form the output sequence
//! 6. **Encode**: the output sequence and the original audio are streamed to the system `ffmpeg`
//!
//! Steps 2, 4 and 5 are pure functions over immutable buffers. Loading, beat detection and
//! encoding sit behind replaceable seams ([`load_images`], [`BeatDetector`], [`FrameSink`]).
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce byte-identical output frames, whatever the
//!   completion order of parallel blend tasks.
//! - **All-or-nothing**: any stage failing aborts the render; there is no partial video.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod audio;
mod config;
mod encode;
mod foundation;
mod frame;
mod session;
mod sync;
mod transition;

pub use assets::loader::{decode_image_file, fit_to_canvas, list_image_candidates, load_images};
pub use audio::beats::{
    BeatDetector, BeatTrackerOpts, EnergyBeatDetector, StaticBeats, detect_beats_pcm,
    estimate_period, onset_envelope, track_beats,
};
pub use audio::decode::{ANALYSIS_SAMPLE_RATE, MonoPcm, decode_audio_f32_mono};
pub use config::{DegeneratePolicy, RenderConfig};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use foundation::core::{Canvas, Fps, FrameIndex};
pub use foundation::error::{BeatfadeError, BeatfadeResult, Stage};
pub use frame::buffer::{Geometry, ImageBuffer, PixelFormat};
pub use session::render::{RenderStats, create_video, render_video_file};
pub use sync::mapper::map_beats_to_frames;
pub use sync::synchronizer::{SyncReport, synchronize, synchronize_with_report};
pub use transition::blend::{blend, crossfade_frame, crossfade_weights};
pub use transition::pipeline::{
    TransitionThreading, generate_transitions, generate_transitions_with,
};
