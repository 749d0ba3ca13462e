use crate::foundation::error::{BeatfadeError, BeatfadeResult};

/// Pixel layout of an [`ImageBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// Interleaved 8-bit RGB, no alpha.
    Rgb8,
}

impl PixelFormat {
    /// Channels per pixel.
    pub fn channels(self) -> u8 {
        match self {
            PixelFormat::Rgb8 => 3,
        }
    }

    /// Name understood by `ffmpeg -pix_fmt`.
    pub fn ffmpeg_name(self) -> &'static str {
        match self {
            PixelFormat::Rgb8 => "rgb24",
        }
    }
}

/// Width, height and channel count of a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel.
    pub channels: u8,
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// Fixed-resolution, tightly packed, row-major raster.
///
/// The geometry invariant (`data.len() == height * stride`, non-zero dimensions) is checked at
/// construction, so every `ImageBuffer` in circulation is well formed.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Wrap raw RGB8 bytes.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> BeatfadeResult<Self> {
        Self::from_raw(width, height, PixelFormat::Rgb8, data)
    }

    /// Wrap raw bytes in the given pixel format.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> BeatfadeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BeatfadeError::validation(
                "image buffer width/height must be non-zero",
            ));
        }
        let expected = byte_len(width, height, format);
        if data.len() != expected {
            return Err(BeatfadeError::validation(format!(
                "image buffer data has {} bytes, expected {expected} for {width}x{height} {format:?}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// A buffer with every pixel set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> BeatfadeResult<Self> {
        let px = width as usize * height as usize;
        let mut data = Vec::with_capacity(px * 3);
        for _ in 0..px {
            data.extend_from_slice(&rgb);
        }
        Self::from_rgb8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * usize::from(self.format.channels())
    }

    /// Width, height and channel count.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.width,
            height: self.height,
            channels: self.format.channels(),
        }
    }

    /// Raw pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Channel values of the pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let ch = usize::from(self.format.channels());
        let off = y as usize * self.stride() + x as usize * ch;
        self.data.get(off..off + ch)
    }

    /// Fail with [`BeatfadeError::DimensionMismatch`] unless both buffers share a geometry.
    pub fn ensure_same_geometry(&self, other: &ImageBuffer) -> BeatfadeResult<()> {
        let (left, right) = (self.geometry(), other.geometry());
        if left != right || self.format != other.format {
            return Err(BeatfadeError::DimensionMismatch { left, right });
        }
        Ok(())
    }
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl TryFrom<image::RgbImage> for ImageBuffer {
    type Error = BeatfadeError;

    fn try_from(img: image::RgbImage) -> BeatfadeResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgb8(width, height, img.into_raw())
    }
}

impl TryFrom<ImageBuffer> for image::RgbImage {
    type Error = BeatfadeError;

    fn try_from(buf: ImageBuffer) -> BeatfadeResult<Self> {
        let (w, h) = (buf.width, buf.height);
        image::RgbImage::from_raw(w, h, buf.data).ok_or_else(|| {
            BeatfadeError::validation(format!("buffer does not fit a {w}x{h} rgb image"))
        })
    }
}

fn byte_len(width: u32, height: u32, format: PixelFormat) -> usize {
    width as usize * height as usize * usize::from(format.channels())
}

#[cfg(test)]
#[path = "../../tests/unit/frame/buffer.rs"]
mod tests;
