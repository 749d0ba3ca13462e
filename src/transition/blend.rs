use crate::{
    foundation::error::{BeatfadeError, BeatfadeResult},
    frame::buffer::ImageBuffer,
};

/// `steps` evenly spaced weights over `[0, 1]`, both endpoints included.
///
/// A single step yields `[0.0]`. The last weight is exactly `1.0` for `steps >= 2`.
pub fn crossfade_weights(steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (steps - 1) as f64;
            let mut out: Vec<f32> = (0..steps).map(|i| (i as f64 / last) as f32).collect();
            out[steps - 1] = 1.0;
            out
        }
    }
}

/// Linearly interpolate `img1` towards `img2` in `steps` frames.
///
/// Frame `k` is `(1 - alpha_k) * img1 + alpha_k * img2` per channel, rounded half to even, with
/// `alpha_k` taken from [`crossfade_weights`]. The first frame equals `img1`; for `steps >= 2` the
/// last equals `img2`.
pub fn blend(
    img1: &ImageBuffer,
    img2: &ImageBuffer,
    steps: usize,
) -> BeatfadeResult<Vec<ImageBuffer>> {
    if steps == 0 {
        return Err(BeatfadeError::validation("blend steps must be >= 1"));
    }
    img1.ensure_same_geometry(img2)?;

    crossfade_weights(steps)
        .into_iter()
        .map(|alpha| crossfade_frame(img1, img2, alpha))
        .collect()
}

/// A single interpolated frame at weight `alpha` (clamped to `[0, 1]`).
pub fn crossfade_frame(
    a: &ImageBuffer,
    b: &ImageBuffer,
    alpha: f32,
) -> BeatfadeResult<ImageBuffer> {
    a.ensure_same_geometry(b)?;
    let alpha = alpha.clamp(0.0, 1.0);
    let mut data = vec![0u8; a.as_bytes().len()];
    crossfade_into(&mut data, a.as_bytes(), b.as_bytes(), alpha);
    ImageBuffer::from_raw(a.width(), a.height(), a.format(), data)
}

fn crossfade_into(dst: &mut [u8], a: &[u8], b: &[u8], alpha: f32) {
    if alpha <= 0.0 {
        dst.copy_from_slice(a);
        return;
    }
    if alpha >= 1.0 {
        dst.copy_from_slice(b);
        return;
    }
    let keep = 1.0 - alpha;
    for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
        *d = mix_u8(x, y, keep, alpha);
    }
}

fn mix_u8(x: u8, y: u8, keep: f32, alpha: f32) -> u8 {
    (keep * f32::from(x) + alpha * f32::from(y))
        .round_ties_even()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/transition/blend.rs"]
mod tests;
