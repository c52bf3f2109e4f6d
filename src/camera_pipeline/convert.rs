//! Raw buffer conversions
//!
//! Each converter reads one raw or owned buffer and produces a typed channel image.
//! Converters are pure: the same buffer always yields the same image.

mod color;
mod debayer;
mod depth;
mod gray;

#[cfg(test)]
mod tests;

pub use color::convert_color;
pub use debayer::{convert_bayer, BayerPattern};
pub use depth::{
    convert_depth_f32, convert_depth_mm_to_m, widen_depth_native, MILLIMETERS_TO_METERS,
};
pub use gray::{convert_gray16, convert_gray16_with_row_offset, convert_gray8};

use crate::camera_pipeline::common::error::{CameraError, Result};
use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer};

/// Rejects buffers whose format is not one of `accepted` or whose payload is
/// too short for the declared geometry. Returns the payload length in bytes.
pub(crate) fn check_buffer(
    buffer: &RawFrameBuffer<'_>,
    accepted: &[PixelFormat],
) -> Result<usize> {
    if !accepted.contains(&buffer.format) {
        return Err(CameraError::UnsupportedFormat(format!(
            "{:?} (expected one of {:?})",
            buffer.format, accepted
        )));
    }
    match buffer.expected_len() {
        Some(required) if buffer.data.len() >= required => Ok(required),
        _ => Err(CameraError::InvalidDimensions(buffer.width, buffer.height)),
    }
}
