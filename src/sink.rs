//! Where finished framebuffers go.  The renderer only produces pixel
//! values; persisting them is up to a sink.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::info;

use crate::errors::RenderError;
use crate::framebuffer::Framebuffer;

/// Accepts a fully painted framebuffer.
pub trait FrameSink {
    /// Persists or otherwise consumes the frame.
    fn accept(&self, frame: &Framebuffer) -> Result<(), RenderError>;
}

/// Writes frames as PNG files.
#[derive(Debug, Clone)]
pub struct PngFile {
    path: PathBuf,
}

impl PngFile {
    /// A sink writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        PngFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Where the image goes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSink for PngFile {
    fn accept(&self, frame: &Framebuffer) -> Result<(), RenderError> {
        let img = RgbaImage::from_raw(
            frame.width() as u32,
            frame.height() as u32,
            frame.as_raw().to_vec(),
        )
        .ok_or_else(|| RenderError::EmptyImage(frame.width(), frame.height()))?;
        img.save_with_format(&self.path, image::ImageFormat::Png)?;
        info!("saved: {}", self.path.display());
        Ok(())
    }
}

/// The name of the second, stamped copy of an image:
/// `image_{W}x{H}_{TX}x{TY}_{seconds}.png` next to `base`.
pub fn stamped_name(
    base: &Path,
    size: (usize, usize),
    tiles: (usize, usize),
    seconds: f64,
) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = format!(
        "{}_{}x{}_{}x{}_{:4.2}.png",
        stem, size.0, size.1, tiles.0, tiles.1, seconds
    );
    base.with_file_name(name)
}
