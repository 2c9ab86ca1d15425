//! Frame-size helpers backed by the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Only the image header
//! is read; pixel data is never decoded.

use crate::geometry::FrameSize;
use crate::util::{DetPipeError, DetPipeResult};
use std::path::Path;

/// Reads the pixel dimensions of the image at `path`.
pub fn frame_size_from_path<P: AsRef<Path>>(path: P) -> DetPipeResult<FrameSize> {
    let (width, height) =
        image::image_dimensions(path).map_err(|err| DetPipeError::ImageIo {
            reason: err.to_string(),
        })?;
    FrameSize::new(width as f32, height as f32)
}

/// Returns the frame size of an already loaded image.
pub fn frame_size_of(img: &image::DynamicImage) -> DetPipeResult<FrameSize> {
    FrameSize::new(img.width() as f32, img.height() as f32)
}
