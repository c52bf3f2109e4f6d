use crate::camera_pipeline::common::error::Result;
use crate::camera_pipeline::convert::check_buffer;
use crate::camera_pipeline::image::ColorImage;
use crate::camera_pipeline::raw::{PixelFormat, RawFrameBuffer};

/// Reorders packed BGR or BGRA pixels into RGB. Alpha is dropped, no color space
/// conversion is applied.
pub fn convert_color(buffer: &RawFrameBuffer<'_>) -> Result<ColorImage> {
    check_buffer(buffer, &[PixelFormat::Bgra8, PixelFormat::Bgr8])?;

    let stride = buffer.format.bytes_per_pixel();
    let pixels = buffer.width * buffer.height;
    let data = buffer.data[..pixels * stride]
        .chunks_exact(stride)
        .map(|bgr| [bgr[2], bgr[1], bgr[0]])
        .collect();

    Ok(ColorImage::from_vec(buffer.width, buffer.height, data))
}
