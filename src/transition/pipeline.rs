use rayon::prelude::*;

use crate::{
    foundation::error::{BeatfadeError, BeatfadeResult},
    frame::buffer::ImageBuffer,
    transition::blend::blend,
};

/// Worker-pool controls for [`generate_transitions`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionThreading {
    /// Blend image pairs on a rayon pool when `true`, on the calling thread otherwise.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for TransitionThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl TransitionThreading {
    /// Blend every pair on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }
}

/// Crossfade every adjacent pair of `images` and concatenate the results in pair order.
///
/// Returns `(images.len() - 1) * steps` frames, or nothing when fewer than two images are given.
/// The first failing pair aborts the whole call; no partial sequence is returned.
pub fn generate_transitions(
    images: &[ImageBuffer],
    steps: usize,
    threading: &TransitionThreading,
) -> BeatfadeResult<Vec<ImageBuffer>> {
    generate_transitions_with(images, steps, threading, blend)
}

/// [`generate_transitions`] with a caller-supplied pair blender.
///
/// `blend_fn` runs once per adjacent pair, possibly concurrently. Its outputs are concatenated by
/// pair index, independent of the order in which tasks complete.
#[tracing::instrument(skip(images, blend_fn), fields(images = images.len()))]
pub fn generate_transitions_with<F>(
    images: &[ImageBuffer],
    steps: usize,
    threading: &TransitionThreading,
    blend_fn: F,
) -> BeatfadeResult<Vec<ImageBuffer>>
where
    F: Fn(&ImageBuffer, &ImageBuffer, usize) -> BeatfadeResult<Vec<ImageBuffer>> + Sync,
{
    if steps == 0 {
        return Err(BeatfadeError::validation("transition steps must be >= 1"));
    }
    if images.len() < 2 {
        tracing::debug!("fewer than two images, no transitions to generate");
        return Ok(Vec::new());
    }

    let per_pair: Vec<BeatfadeResult<Vec<ImageBuffer>>> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            images
                .par_windows(2)
                .map(|pair| blend_fn(&pair[0], &pair[1], steps))
                .collect()
        })
    } else {
        images
            .windows(2)
            .map(|pair| blend_fn(&pair[0], &pair[1], steps))
            .collect()
    };

    let mut out = Vec::with_capacity((images.len() - 1) * steps);
    for (pair_idx, frames) in per_pair.into_iter().enumerate() {
        let mut frames = frames?;
        if frames.len() != steps {
            return Err(BeatfadeError::validation(format!(
                "pair {pair_idx} produced {} frames, expected {steps}",
                frames.len()
            )));
        }
        out.append(&mut frames);
    }

    tracing::debug!(frames = out.len(), "generated transition frames");
    Ok(out)
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> BeatfadeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BeatfadeError::validation(
            "transition threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/transition/pipeline.rs"]
mod tests;
