use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        core::Canvas,
        error::{BeatfadeError, BeatfadeResult},
    },
    frame::buffer::ImageBuffer,
};

/// Decode every image in `dir` (lexicographic file-name order) and resize it to `canvas`.
///
/// Entries that are not regular files or fail to decode are skipped. An unreadable directory or a
/// directory without a single decodable image is a [`BeatfadeError::Load`].
#[tracing::instrument]
pub fn load_images(dir: &Path, canvas: Canvas) -> BeatfadeResult<Vec<ImageBuffer>> {
    canvas.validate()?;

    let mut images = Vec::new();
    for path in list_image_candidates(dir)? {
        match decode_image_file(&path) {
            Ok(img) => images.push(fit_to_canvas(img, canvas)?),
            Err(err) => tracing::debug!(path = %path.display(), %err, "skipping undecodable file"),
        }
    }

    if images.is_empty() {
        return Err(BeatfadeError::load(format!(
            "no decodable images found in '{}'",
            dir.display()
        )));
    }
    tracing::info!(count = images.len(), "loaded images");
    Ok(images)
}

/// Regular files in `dir`, sorted by file name.
pub fn list_image_candidates(dir: &Path) -> BeatfadeResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        BeatfadeError::load(format!("failed to read image directory '{}': {e}", dir.display()))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            BeatfadeError::load(format!(
                "failed to list image directory '{}': {e}",
                dir.display()
            ))
        })?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Decode a single image file of any format supported by the `image` crate.
pub fn decode_image_file(path: &Path) -> BeatfadeResult<image::DynamicImage> {
    let load_err = |what: &str, e: &dyn std::fmt::Display| {
        BeatfadeError::load(format!("{what} image '{}': {e}", path.display()))
    };
    image::ImageReader::open(path)
        .map_err(|e| load_err("open", &e))?
        .with_guessed_format()
        .map_err(|e| load_err("sniff format of", &e))?
        .decode()
        .map_err(|e| load_err("decode", &e))
}

/// Convert to RGB8 and resize (bilinear) to exactly `canvas`.
pub fn fit_to_canvas(img: image::DynamicImage, canvas: Canvas) -> BeatfadeResult<ImageBuffer> {
    let rgb = img.to_rgb8();
    let rgb = if rgb.dimensions() == (canvas.width, canvas.height) {
        rgb
    } else {
        image::imageops::resize(
            &rgb,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        )
    };
    ImageBuffer::try_from(rgb)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
